//! Summarize the current store state.

use bazaar_store::Store;

pub fn run(store: &Store) {
    let snapshot = store.snapshot();
    let counts = snapshot.counts();
    tracing::info!(
        products = snapshot.admin_products.len(),
        categories = snapshot.admin_categories.len(),
        orders = snapshot.orders.len(),
        users = snapshot.admin_users.len(),
        discounts = snapshot.admin_discounts.len(),
        banners = snapshot.banners.len(),
        cart_items = counts.cart_count,
        wishlist = counts.wishlist_count,
        "Store state"
    );
    match snapshot.admin_session() {
        Some(session) => tracing::info!(
            username = %session.username,
            role = %session.role,
            "Admin session active"
        ),
        None => tracing::info!("No admin session"),
    }
}
