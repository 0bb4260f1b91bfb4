//! Admin user and session records.

use serde::{Deserialize, Serialize};

use crate::types::{AdminRole, AdminUserId, StoreId, Tier};

/// An admin panel account: the platform superadmin or a store owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminUser {
    pub id: AdminUserId,
    pub username: String,
    /// Plaintext demo credential. There is no real auth boundary in this
    /// system; login is an equality check against the same persisted data
    /// the client controls.
    pub password: String,
    pub name: String,
    pub role: AdminRole,
    /// `None` for the superadmin; store owners always have one.
    pub store_id: Option<StoreId>,
    pub store_name: Option<String>,
    pub tier: Option<Tier>,
}

/// The persisted singleton admin session.
///
/// Mirrors the authenticated user's scoping fields at login time. Deleting
/// that user does not clear an active session; scoped queries simply stop
/// resolving.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminSession {
    pub user_id: AdminUserId,
    pub role: AdminRole,
    pub store_id: Option<StoreId>,
    pub store_name: Option<String>,
    pub tier: Option<Tier>,
    pub name: String,
    pub username: String,
}

impl AdminSession {
    /// Build the session mirror of an admin user.
    #[must_use]
    pub fn for_user(user: &AdminUser) -> Self {
        Self {
            user_id: user.id.clone(),
            role: user.role,
            store_id: user.store_id.clone(),
            store_name: user.store_name.clone(),
            tier: user.tier,
            name: user.name.clone(),
            username: user.username.clone(),
        }
    }
}
