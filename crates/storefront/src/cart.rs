//! Cart projection: stored cart lines resolved against the catalog.

use bazaar_core::Product;
use bazaar_store::Snapshot;
use rust_decimal::Decimal;
use serde::Serialize;

/// One cart line with its product resolved and the line total computed.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineView {
    pub product: Product,
    pub quantity: u32,
    pub line_total: Decimal,
}

/// The cart as the shopper sees it.
///
/// Lines whose product no longer exists are filtered from the view but left
/// in storage, so a product restored later reappears with its quantity
/// intact. `count` sums resolved lines only and can therefore be lower than
/// the raw badge count from [`Snapshot::counts`].
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub lines: Vec<CartLineView>,
    pub count: u32,
    pub subtotal: Decimal,
}

impl CartView {
    #[must_use]
    pub fn project(snapshot: &Snapshot) -> Self {
        let lines: Vec<CartLineView> = snapshot
            .cart
            .iter()
            .filter_map(|line| {
                snapshot.product(&line.product_id).map(|product| CartLineView {
                    product: product.clone(),
                    quantity: line.quantity,
                    line_total: product.price * Decimal::from(line.quantity),
                })
            })
            .collect();
        let count = lines.iter().map(|line| line.quantity).sum();
        let subtotal = lines.iter().map(|line| line.line_total).sum();
        Self {
            lines,
            count,
            subtotal,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use bazaar_core::ProductId;
    use bazaar_store::Store;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn test_project_resolves_products_and_totals() {
        let store = Store::in_memory();
        store.add_to_cart(&ProductId::new("p-1"), 2).unwrap();
        store.add_to_cart(&ProductId::new("p-7"), 1).unwrap();

        let view = CartView::project(&store.snapshot());
        assert_eq!(view.lines.len(), 2);
        assert_eq!(view.count, 3);
        // p-1 at 25 x2 plus p-7 at 89.
        assert_eq!(view.subtotal, dec!(139));
        let first = view.lines.first().unwrap();
        assert_eq!(first.product.id, ProductId::new("p-1"));
        assert_eq!(first.line_total, dec!(50));
    }

    #[test]
    fn test_dangling_lines_filtered_but_not_purged() {
        let store = Store::in_memory();
        store.add_to_cart(&ProductId::new("p-1"), 2).unwrap();
        store.add_to_cart(&ProductId::new("ghost"), 5).unwrap();

        let snapshot = store.snapshot();
        let view = CartView::project(&snapshot);
        assert_eq!(view.lines.len(), 1);
        assert_eq!(view.count, 2);
        // The raw badge still counts the unresolvable line.
        assert_eq!(snapshot.counts().cart_count, 7);
        assert_eq!(snapshot.cart.len(), 2);
    }

    #[test]
    fn test_empty_cart_projects_empty_view() {
        let store = Store::in_memory();
        let view = CartView::project(&store.snapshot());
        assert!(view.is_empty());
        assert_eq!(view.count, 0);
        assert_eq!(view.subtotal, Decimal::ZERO);
    }
}
