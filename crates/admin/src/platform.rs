//! Platform overview: the superadmin's per-store financial table.
//!
//! Store revenue is attributed through the legacy order-level `store_id`
//! only. Multi-store checkout orders carry no single owning store, so they
//! appear in the platform totals but in no store row.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

use bazaar_core::{AdminRole, OrderStatus, StoreId, Tier};
use bazaar_store::Snapshot;

/// Share of store revenue the platform keeps.
pub const PLATFORM_FEE_RATE: Decimal = dec!(0.15);

/// One store's row in the overview table.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreRow {
    pub store_id: StoreId,
    pub store_name: String,
    pub owner: String,
    pub tier: Tier,
    pub products_count: usize,
    pub orders_count: usize,
    pub revenue: Decimal,
    pub delivered_count: usize,
    pub cancelled_count: usize,
    /// Orders still in flight: created or accepted.
    pub pending_count: usize,
    /// `PLATFORM_FEE_RATE` of revenue, rounded to cents.
    pub platform_fee: Decimal,
    /// What the store keeps: revenue minus the fee.
    pub payout: Decimal,
}

/// The whole platform at a glance.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformOverview {
    /// Store rows sorted by revenue, biggest first.
    pub rows: Vec<StoreRow>,
    pub store_count: usize,
    /// Across every order, attributed or not.
    pub total_revenue: Decimal,
    pub total_orders: usize,
    pub total_products: usize,
}

impl PlatformOverview {
    #[must_use]
    pub fn project(snapshot: &Snapshot) -> Self {
        let mut rows: Vec<StoreRow> = snapshot
            .admin_users
            .iter()
            .filter(|user| user.role == AdminRole::Admin)
            .filter_map(|user| {
                let store_id = user.store_id.clone()?;
                let mut row = StoreRow {
                    store_name: user
                        .store_name
                        .clone()
                        .unwrap_or_else(|| store_id.as_str().to_string()),
                    owner: user.name.clone(),
                    tier: user.tier.unwrap_or_default(),
                    products_count: snapshot
                        .admin_products
                        .iter()
                        .filter(|p| p.store_id == store_id)
                        .count(),
                    orders_count: 0,
                    revenue: Decimal::ZERO,
                    delivered_count: 0,
                    cancelled_count: 0,
                    pending_count: 0,
                    platform_fee: Decimal::ZERO,
                    payout: Decimal::ZERO,
                    store_id,
                };
                for order in snapshot
                    .orders
                    .iter()
                    .filter(|o| o.store_id.as_ref() == Some(&row.store_id))
                {
                    row.orders_count += 1;
                    row.revenue += order.total;
                    match order.status {
                        OrderStatus::Delivered => row.delivered_count += 1,
                        OrderStatus::Cancelled => row.cancelled_count += 1,
                        OrderStatus::Created | OrderStatus::Accepted => row.pending_count += 1,
                        OrderStatus::Refunded => {}
                    }
                }
                row.platform_fee = (row.revenue * PLATFORM_FEE_RATE).round_dp(2);
                row.payout = row.revenue - row.platform_fee;
                Some(row)
            })
            .collect();
        rows.sort_by(|a, b| b.revenue.cmp(&a.revenue));

        Self {
            store_count: rows.len(),
            total_revenue: snapshot.orders.iter().map(|o| o.total).sum(),
            total_orders: snapshot.orders.len(),
            total_products: snapshot.admin_products.len(),
            rows,
        }
    }

    /// The highest-revenue store, when any store exists.
    #[must_use]
    pub fn top_store(&self) -> Option<&StoreRow> {
        self.rows.first()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use bazaar_core::{Customer, DeliveryInfo, OrderLine, PaymentMethod, ProductId};
    use bazaar_store::{OrderDraft, Store};

    use super::*;

    #[test]
    fn test_rows_cover_both_seed_stores() {
        let store = Store::in_memory();
        let overview = PlatformOverview::project(&store.snapshot());

        assert_eq!(overview.store_count, 2);
        assert_eq!(overview.total_orders, 25);
        assert_eq!(overview.total_products, 12);
        let attributed: usize = overview.rows.iter().map(|r| r.orders_count).sum();
        // Every seed order carries a legacy store id.
        assert_eq!(attributed, 25);
        for row in &overview.rows {
            assert_eq!(row.products_count, 6);
            assert_eq!(
                row.orders_count,
                row.pending_count + row.delivered_count + row.cancelled_count
                    + seed_refunded(&store, &row.store_id)
            );
        }
    }

    fn seed_refunded(store: &Store, store_id: &StoreId) -> usize {
        store
            .snapshot()
            .orders
            .iter()
            .filter(|o| o.store_id.as_ref() == Some(store_id))
            .filter(|o| o.status == OrderStatus::Refunded)
            .count()
    }

    #[test]
    fn test_rows_sorted_by_revenue_and_fee_math() {
        let store = Store::in_memory();
        let overview = PlatformOverview::project(&store.snapshot());

        let top = overview.top_store().unwrap();
        let second = overview.rows.get(1).unwrap();
        assert!(top.revenue >= second.revenue);
        for row in &overview.rows {
            assert_eq!(row.platform_fee, (row.revenue * dec!(0.15)).round_dp(2));
            assert_eq!(row.payout, row.revenue - row.platform_fee);
        }
    }

    #[test]
    fn test_multi_store_order_counts_toward_totals_only() {
        let store = Store::in_memory();
        store.clear_orders().unwrap();
        store
            .create_order(OrderDraft {
                items: vec![OrderLine {
                    product_id: ProductId::new("p-1"),
                    quantity: 1,
                    store_id: Some(StoreId::new("store-1")),
                }],
                // A checkout order's legacy field points at its first store,
                // but an order written without one is attributed to nobody.
                store_id: None,
                store_ids: vec![StoreId::new("store-1"), StoreId::new("store-2")],
                subtotal: dec!(25),
                discount: dec!(0),
                delivery: dec!(5),
                total: dec!(30),
                discount_code: None,
                discount_store_id: None,
                customer: Customer::default(),
                delivery_info: DeliveryInfo::default(),
                payment_method: PaymentMethod::Card,
            })
            .unwrap();

        let overview = PlatformOverview::project(&store.snapshot());
        assert_eq!(overview.total_orders, 1);
        assert_eq!(overview.total_revenue, dec!(30));
        assert!(overview.rows.iter().all(|row| row.orders_count == 0));
    }

    #[test]
    fn test_empty_platform() {
        let store = Store::in_memory();
        store.reset_admin_users().unwrap();
        store.clear_orders().unwrap();
        let overview = PlatformOverview::project(&store.snapshot());
        assert_eq!(overview.store_count, 2);
        assert_eq!(overview.total_revenue, Decimal::ZERO);
        assert!(overview.top_store().is_some());
    }
}
