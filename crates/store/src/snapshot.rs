//! Immutable snapshots of the store state.
//!
//! Every commit builds a new [`Snapshot`] and swaps it in atomically.
//! Collections that a mutation did not touch keep their `Arc`, so readers can
//! detect change per collection with [`Arc::ptr_eq`].

use std::sync::Arc;

use bazaar_core::{
    AdminSession, AdminUser, Banner, CartLine, Category, Discount, Highlights, Order, Product,
    ProductId, ShopperProfile,
};

/// One immutable view of every persisted collection.
///
/// Cloning a snapshot is cheap; it only bumps the collection `Arc`s.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    /// Cart lines, one per distinct product.
    pub cart: Arc<Vec<CartLine>>,
    /// Wishlisted product ids.
    pub wishlist: Arc<Vec<ProductId>>,
    /// Shopper sign-in state and contact details.
    pub auth: Arc<ShopperProfile>,
    /// Order history, newest first.
    pub orders: Arc<Vec<Order>>,
    /// Product catalog in stored order.
    pub admin_products: Arc<Vec<Product>>,
    /// Category list in stored order.
    pub admin_categories: Arc<Vec<Category>>,
    /// Admin user roster.
    pub admin_users: Arc<Vec<AdminUser>>,
    /// Current admin session, `None` when logged out.
    pub admin_session: Arc<Option<AdminSession>>,
    /// Discount codes, newest first.
    pub admin_discounts: Arc<Vec<Discount>>,
    /// Home page banners in stored order.
    pub banners: Arc<Vec<Banner>>,
    /// Featured product per store.
    pub highlights: Arc<Highlights>,
}

/// Header badge counts derived from a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Counts {
    /// Total quantity across all cart lines.
    pub cart_count: u32,
    /// Number of wishlisted products.
    pub wishlist_count: usize,
}

impl Snapshot {
    /// Badge counts for the cart and wishlist.
    #[must_use]
    pub fn counts(&self) -> Counts {
        Counts {
            cart_count: self.cart.iter().map(|line| line.quantity).sum(),
            wishlist_count: self.wishlist.len(),
        }
    }

    /// Whether `product_id` is currently wishlisted.
    #[must_use]
    pub fn is_in_wishlist(&self, product_id: &ProductId) -> bool {
        self.wishlist.iter().any(|id| id == product_id)
    }

    /// Look up a catalog product by id.
    #[must_use]
    pub fn product(&self, product_id: &ProductId) -> Option<&Product> {
        self.admin_products.iter().find(|p| &p.id == product_id)
    }

    /// The current admin session, if someone is logged in.
    #[must_use]
    pub fn admin_session(&self) -> Option<&AdminSession> {
        self.admin_session.as_ref().as_ref()
    }

    /// Resolve a promo code a shopper typed.
    ///
    /// The input is trimmed and uppercased, then matched against stored codes.
    /// Returns the first discount that matches, is active, and still has
    /// redemptions left. Does not consume a redemption.
    #[must_use]
    pub fn validate_discount_code(&self, code: &str) -> Option<&Discount> {
        let normalized = Discount::normalize_input(code);
        self.admin_discounts
            .iter()
            .find(|d| d.code == normalized && d.active && d.remaining() > 0)
    }
}
