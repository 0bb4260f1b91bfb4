//! Quote and place an order for the current cart.

use bazaar_store::Store;
use bazaar_storefront::{CartView, CheckoutForm, CheckoutQuote, apply_promo, place_order};

/// # Errors
///
/// Returns an error for an empty cart, a promo code that does not apply,
/// or a persistence failure while placing the order.
pub fn run(
    store: &Store,
    form: CheckoutForm,
    promo: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let snapshot = store.snapshot();
    let cart = CartView::project(&snapshot);
    if cart.is_empty() {
        return Err("Cart is empty".into());
    }

    let discount = promo.map(|code| apply_promo(&snapshot, code)).transpose()?;
    let quote = CheckoutQuote::compute(&cart.lines, form.delivery_method, discount.as_ref());
    tracing::info!(
        subtotal = %quote.subtotal,
        discount = %quote.discount,
        delivery = %quote.delivery,
        total = %quote.total,
        "Checkout quote"
    );

    let order = place_order(store, form, discount.as_ref())?;
    tracing::info!(id = %order.id, status = %order.status, "Order placed");
    Ok(())
}
