//! Manage the shopper's cart.

use rand::seq::IndexedRandom;

use bazaar_core::ProductId;
use bazaar_store::{Store, StoreError};
use bazaar_storefront::CartView;

/// Add a product to the cart. With no id, picks a random in-stock product,
/// which makes demo loops (`bazaar cart add` a few times, then checkout)
/// one-liners.
///
/// # Errors
///
/// Returns an error if the catalog has no in-stock product to pick, or if
/// the cart could not be persisted.
pub fn add(
    store: &Store,
    product_id: Option<&str>,
    quantity: u32,
) -> Result<(), Box<dyn std::error::Error>> {
    let product_id = match product_id {
        Some(id) => ProductId::new(id),
        None => {
            let snapshot = store.snapshot();
            let in_stock: Vec<&bazaar_core::Product> = snapshot
                .admin_products
                .iter()
                .filter(|p| p.in_stock)
                .collect();
            let pick = in_stock
                .choose(&mut rand::rng())
                .ok_or("No in-stock products to pick from")?;
            tracing::info!(id = %pick.id, "Picked {}", pick.title);
            pick.id.clone()
        }
    };
    store.add_to_cart(&product_id, quantity)?;
    tracing::info!(id = %product_id, quantity, "Added to cart");
    Ok(())
}

/// # Errors
///
/// Returns an error if the cart could not be persisted.
pub fn remove(store: &Store, product_id: &str) -> Result<(), StoreError> {
    store.remove_from_cart(&ProductId::new(product_id))?;
    tracing::info!(id = product_id, "Removed from cart");
    Ok(())
}

/// # Errors
///
/// Returns an error if the cart could not be persisted.
pub fn set_quantity(store: &Store, product_id: &str, quantity: u32) -> Result<(), StoreError> {
    store.update_cart_quantity(&ProductId::new(product_id), quantity)?;
    tracing::info!(id = product_id, quantity, "Updated cart line");
    Ok(())
}

pub fn show(store: &Store) {
    let view = CartView::project(&store.snapshot());
    if view.is_empty() {
        tracing::info!("Cart is empty");
        return;
    }
    for line in &view.lines {
        tracing::info!(
            id = %line.product.id,
            quantity = line.quantity,
            line_total = %line.line_total,
            "{}",
            line.product.title
        );
    }
    tracing::info!(items = view.count, subtotal = %view.subtotal, "Cart");
}

/// # Errors
///
/// Returns an error if the cart could not be persisted.
pub fn clear(store: &Store) -> Result<(), StoreError> {
    store.clear_cart()?;
    tracing::info!("Cart cleared");
    Ok(())
}
