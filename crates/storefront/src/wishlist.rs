//! Wishlist projection.

use bazaar_core::Product;
use bazaar_store::Snapshot;
use serde::Serialize;

/// Wishlist ids resolved to products.
///
/// `count` reads the raw id list, matching the header badge, so a dangling
/// id still counts even though it yields no product card.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistView {
    pub products: Vec<Product>,
    pub count: usize,
}

impl WishlistView {
    #[must_use]
    pub fn project(snapshot: &Snapshot) -> Self {
        let products = snapshot
            .wishlist
            .iter()
            .filter_map(|id| snapshot.product(id).cloned())
            .collect();
        Self {
            products,
            count: snapshot.wishlist.len(),
        }
    }
}
