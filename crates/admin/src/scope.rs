//! Store scoping: the snapshot slice the current session may see.
//!
//! Superadmins see everything. A store owner sees products and discounts
//! filtered by store id, and orders matched by a three-way fallback that
//! reflects the order schema's single-store to multi-store migration:
//! the `store_ids` array is canonical when present, the legacy order-level
//! `store_id` answers for seeded orders, and per-line store ids catch
//! anything written between the two shapes.

use bazaar_core::{AdminRole, Discount, Order, Product, StoreId};
use bazaar_store::Snapshot;

/// Whether `order` belongs to `store_id` under the fallback rules.
///
/// Each strategy is only consulted when the previous one has no data at all,
/// so an order that names stores in `store_ids` is never re-matched through
/// its legacy field.
#[must_use]
pub fn order_belongs_to_store(order: &Order, store_id: &StoreId) -> bool {
    if !order.store_ids.is_empty() {
        return order.store_ids.contains(store_id);
    }
    if let Some(legacy) = &order.store_id {
        return legacy == store_id;
    }
    order
        .items
        .iter()
        .any(|line| line.store_id.as_ref() == Some(store_id))
}

/// The collections an admin page works with, already scoped.
#[derive(Debug, Clone, Default)]
pub struct ScopedState {
    pub orders: Vec<Order>,
    pub products: Vec<Product>,
    pub discounts: Vec<Discount>,
}

impl ScopedState {
    /// Scope the snapshot to the current session.
    ///
    /// A superadmin session, a session without a store id, and no session at
    /// all each see the unfiltered collections.
    #[must_use]
    pub fn project(snapshot: &Snapshot) -> Self {
        let store_id = snapshot
            .admin_session()
            .filter(|session| session.role == AdminRole::Admin)
            .and_then(|session| session.store_id.as_ref());
        let Some(store_id) = store_id else {
            return Self {
                orders: snapshot.orders.as_ref().clone(),
                products: snapshot.admin_products.as_ref().clone(),
                discounts: snapshot.admin_discounts.as_ref().clone(),
            };
        };
        Self {
            orders: snapshot
                .orders
                .iter()
                .filter(|order| order_belongs_to_store(order, store_id))
                .cloned()
                .collect(),
            products: snapshot
                .admin_products
                .iter()
                .filter(|product| &product.store_id == store_id)
                .cloned()
                .collect(),
            discounts: snapshot
                .admin_discounts
                .iter()
                .filter(|discount| &discount.store_id == store_id)
                .cloned()
                .collect(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use bazaar_core::{Customer, DeliveryInfo, OrderLine, PaymentMethod, ProductId};
    use bazaar_store::{OrderDraft, Store};
    use rust_decimal_macros::dec;

    use super::*;

    fn draft(store_id: Option<&str>, store_ids: &[&str], line_store: Option<&str>) -> OrderDraft {
        OrderDraft {
            items: vec![OrderLine {
                product_id: ProductId::new("p-1"),
                quantity: 1,
                store_id: line_store.map(StoreId::new),
            }],
            store_id: store_id.map(StoreId::new),
            store_ids: store_ids.iter().copied().map(StoreId::new).collect(),
            subtotal: dec!(25),
            discount: dec!(0),
            delivery: dec!(5),
            total: dec!(30),
            discount_code: None,
            discount_store_id: None,
            customer: Customer::default(),
            delivery_info: DeliveryInfo::default(),
            payment_method: PaymentMethod::Card,
        }
    }

    #[test]
    fn test_store_ids_array_is_canonical() {
        let order = |d: OrderDraft| Store::in_memory().create_order(d).unwrap();

        let multi = order(draft(Some("store-1"), &["store-2"], None));
        // The array wins; the stale legacy field is not consulted.
        assert!(!order_belongs_to_store(&multi, &StoreId::new("store-1")));
        assert!(order_belongs_to_store(&multi, &StoreId::new("store-2")));
    }

    #[test]
    fn test_legacy_field_answers_when_array_missing() {
        let store = Store::in_memory();
        let legacy = store.create_order(draft(Some("store-1"), &[], None)).unwrap();
        assert!(order_belongs_to_store(&legacy, &StoreId::new("store-1")));
        assert!(!order_belongs_to_store(&legacy, &StoreId::new("store-2")));
    }

    #[test]
    fn test_line_store_ids_are_the_last_resort() {
        let store = Store::in_memory();
        let lines_only = store.create_order(draft(None, &[], Some("store-2"))).unwrap();
        assert!(order_belongs_to_store(&lines_only, &StoreId::new("store-2")));
        assert!(!order_belongs_to_store(&lines_only, &StoreId::new("store-1")));
    }

    #[test]
    fn test_superadmin_sees_everything() {
        let store = Store::in_memory();
        store.admin_login("superadmin", "superadmin").unwrap();
        let snapshot = store.snapshot();
        let scoped = ScopedState::project(&snapshot);
        assert_eq!(scoped.orders.len(), snapshot.orders.len());
        assert_eq!(scoped.products.len(), 12);
        assert_eq!(scoped.discounts.len(), 2);
    }

    #[test]
    fn test_logged_out_sees_everything() {
        let store = Store::in_memory();
        let scoped = ScopedState::project(&store.snapshot());
        assert_eq!(scoped.products.len(), 12);
    }

    #[test]
    fn test_store_admin_scoped_to_own_store() {
        let store = Store::in_memory();
        store.admin_login("admin1", "admin1").unwrap();
        let scoped = ScopedState::project(&store.snapshot());

        assert_eq!(scoped.products.len(), 6);
        assert!(
            scoped
                .products
                .iter()
                .all(|p| p.store_id == StoreId::new("store-1"))
        );
        assert_eq!(scoped.discounts.len(), 1);
        assert_eq!(scoped.discounts.first().unwrap().code, "FASHION20");
        // Seed orders carry the legacy shape; only store-1 ones remain.
        assert!(!scoped.orders.is_empty());
        assert!(
            scoped
                .orders
                .iter()
                .all(|o| o.store_id == Some(StoreId::new("store-1")))
        );
    }
}
