//! Session view: the logged-in admin and their permission flags.

use serde::Serialize;

use bazaar_core::{AdminRole, AdminSession, StoreId, Tier};
use bazaar_store::Snapshot;

/// The current admin session with its role flags unpacked.
///
/// The session mirrors the user's scoping fields as they were at login (plus
/// any syncs from [`bazaar_store::Store::update_admin_user`]). It can refer
/// to a user that no longer exists; the flags still answer from the session
/// record itself.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub session: Option<AdminSession>,
    pub is_logged_in: bool,
    pub is_super_admin: bool,
    pub is_store_admin: bool,
    /// The store this session is scoped to; `None` for the superadmin.
    pub store_id: Option<StoreId>,
    pub store_name: Option<String>,
    pub tier: Option<Tier>,
}

impl SessionView {
    #[must_use]
    pub fn project(snapshot: &Snapshot) -> Self {
        let Some(session) = snapshot.admin_session() else {
            return Self::default();
        };
        Self {
            is_logged_in: true,
            is_super_admin: session.role == AdminRole::SuperAdmin,
            is_store_admin: session.role == AdminRole::Admin,
            store_id: session.store_id.clone(),
            store_name: session.store_name.clone(),
            tier: session.tier,
            session: Some(session.clone()),
        }
    }
}
