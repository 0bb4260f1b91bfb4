//! Reset every collection to its seed data.

use bazaar_store::Store;

/// Restore seed users, categories, products, discounts, and orders, and
/// clear the shopper's cart.
///
/// # Errors
///
/// Returns an error if any collection could not be persisted.
pub fn run(store: &Store) -> Result<(), bazaar_store::StoreError> {
    store.reset_admin_users()?;
    store.reset_admin_categories()?;
    store.reset_admin_products()?;
    store.reset_admin_discounts()?;
    store.reset_orders()?;
    store.clear_cart()?;
    tracing::info!("Seeded demo data");
    Ok(())
}
