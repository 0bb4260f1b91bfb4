//! Store directory: the selling stores behind the marketplace.
//!
//! Stores are not a persisted collection of their own; they are derived from
//! the store-owner accounts in the admin roster.

use serde::Serialize;

use bazaar_core::{AdminRole, AdminUser, Product, StoreId, Tier};
use bazaar_store::Snapshot;

/// One selling store as the storefront presents it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreInfo {
    pub id: StoreId,
    /// Store display name; falls back to the raw store id when the owner
    /// never named their store.
    pub name: String,
    /// The owner's display name.
    pub owner: String,
    pub tier: Tier,
    pub product_count: usize,
}

impl StoreInfo {
    fn for_owner(owner: &AdminUser, store_id: StoreId, snapshot: &Snapshot) -> Self {
        let product_count = snapshot
            .admin_products
            .iter()
            .filter(|p| p.store_id == store_id)
            .count();
        Self {
            name: owner
                .store_name
                .clone()
                .unwrap_or_else(|| store_id.as_str().to_string()),
            owner: owner.name.clone(),
            tier: owner.tier.unwrap_or_default(),
            product_count,
            id: store_id,
        }
    }

    /// Every selling store, in roster order.
    #[must_use]
    pub fn directory(snapshot: &Snapshot) -> Vec<Self> {
        snapshot
            .admin_users
            .iter()
            .filter(|user| user.role == AdminRole::Admin)
            .filter_map(|user| {
                user.store_id
                    .clone()
                    .map(|store_id| Self::for_owner(user, store_id, snapshot))
            })
            .collect()
    }
}

/// Look up one store by id.
#[must_use]
pub fn store_by_id(snapshot: &Snapshot, store_id: &StoreId) -> Option<StoreInfo> {
    StoreInfo::directory(snapshot)
        .into_iter()
        .find(|store| &store.id == store_id)
}

/// All products a store sells, in stored catalog order.
#[must_use]
pub fn store_products(snapshot: &Snapshot, store_id: &StoreId) -> Vec<Product> {
    snapshot
        .admin_products
        .iter()
        .filter(|p| &p.store_id == store_id)
        .cloned()
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use bazaar_store::{AdminUserForm, Store};

    use super::*;

    #[test]
    fn test_directory_lists_store_owners_only() {
        let store = Store::in_memory();
        let directory = StoreInfo::directory(&store.snapshot());

        assert_eq!(directory.len(), 2);
        let fashion = directory.first().unwrap();
        assert_eq!(fashion.id, StoreId::new("store-1"));
        assert_eq!(fashion.name, "Fashion Hub");
        assert_eq!(fashion.owner, "Admin One");
        assert_eq!(fashion.tier, Tier::Free);
        assert_eq!(fashion.product_count, 6);
    }

    #[test]
    fn test_unnamed_store_falls_back_to_id() {
        let store = Store::in_memory();
        let user = store
            .create_admin_user(AdminUserForm {
                username: "owner3".to_string(),
                store_name: Some(String::new()),
                ..AdminUserForm::default()
            })
            .unwrap();
        // An empty name is still a name; only a missing one falls back.
        let info = store_by_id(&store.snapshot(), user.store_id.as_ref().unwrap()).unwrap();
        assert_eq!(info.name, "");
        assert_eq!(info.product_count, 0);
    }

    #[test]
    fn test_store_products_scoped_to_store() {
        let store = Store::in_memory();
        let products = store_products(&store.snapshot(), &StoreId::new("store-2"));
        assert_eq!(products.len(), 6);
        assert!(
            products
                .iter()
                .all(|p| p.store_id == StoreId::new("store-2"))
        );
    }

    #[test]
    fn test_store_by_id_misses_unknown_store() {
        let store = Store::in_memory();
        assert!(store_by_id(&store.snapshot(), &StoreId::new("store-404")).is_none());
    }
}
