//! Checkout: quote math, promo validation, and order placement.
//!
//! A quote is pure arithmetic over resolved cart lines. Placement drives the
//! store through three independent commits - redeem the promo, create the
//! order, clear the cart - with no transaction spanning them; a crash between
//! commits can leave a redeemed code with no order, which matches the
//! original system's behavior.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use thiserror::Error;

use bazaar_core::{Customer, DeliveryInfo, DeliveryMethod, Discount, Order, PaymentMethod, StoreId};
use bazaar_store::{OrderDraft, Snapshot, Store, StoreError};

use crate::cart::{CartLineView, CartView};

/// Subtotal above which standard delivery is free.
pub const FREE_SHIPPING_THRESHOLD: Decimal = dec!(80);

/// Flat fee for standard delivery below the threshold.
pub const STANDARD_DELIVERY_FEE: Decimal = dec!(5);

/// Flat fee for express delivery, charged regardless of subtotal.
pub const EXPRESS_DELIVERY_FEE: Decimal = dec!(9);

/// Why a promo code could not be applied.
///
/// Display strings are shown to the shopper as-is. "Invalid" deliberately
/// covers unknown, inactive, and exhausted codes alike.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PromoError {
    #[error("Invalid or expired promo code")]
    Invalid,

    #[error("No items from this store in your cart")]
    NoStoreItems,
}

/// Everything the shopper fills in on the checkout page.
#[derive(Debug, Clone, Default)]
pub struct CheckoutForm {
    pub customer: Customer,
    pub delivery_info: DeliveryInfo,
    pub delivery_method: DeliveryMethod,
    pub payment_method: PaymentMethod,
}

/// Computed order totals for the current cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutQuote {
    pub subtotal: Decimal,
    /// Discount actually applied, capped at the matching store's subtotal.
    pub discount: Decimal,
    pub delivery: Decimal,
    pub total: Decimal,
}

impl CheckoutQuote {
    /// Price the cart.
    ///
    /// A discount only counts against lines sold by the discount's store, so
    /// in a mixed-store cart it can never eat into another store's items:
    /// the applied amount is `min(discount_value, store_subtotal)`.
    #[must_use]
    pub fn compute(
        lines: &[CartLineView],
        delivery_method: DeliveryMethod,
        discount: Option<&Discount>,
    ) -> Self {
        let subtotal: Decimal = lines.iter().map(|line| line.line_total).sum();
        let applied = discount.map_or(Decimal::ZERO, |discount| {
            discount
                .discount_value
                .min(store_subtotal(lines, &discount.store_id))
        });
        let delivery = match delivery_method {
            DeliveryMethod::Express => EXPRESS_DELIVERY_FEE,
            DeliveryMethod::Standard if subtotal > FREE_SHIPPING_THRESHOLD => Decimal::ZERO,
            DeliveryMethod::Standard => STANDARD_DELIVERY_FEE,
        };
        Self {
            subtotal,
            discount: applied,
            delivery,
            total: (subtotal - applied + delivery).max(Decimal::ZERO),
        }
    }
}

/// Subtotal of the lines sold by `store_id`.
fn store_subtotal(lines: &[CartLineView], store_id: &StoreId) -> Decimal {
    lines
        .iter()
        .filter(|line| &line.product.store_id == store_id)
        .map(|line| line.line_total)
        .sum()
}

/// Resolve a promo code against the current cart.
///
/// Validation is pure: no redemption is consumed until [`place_order`]. The
/// code must exist, be active, have redemptions left, and match at least one
/// resolvable cart line's store.
///
/// # Errors
///
/// [`PromoError::Invalid`] when the code does not validate,
/// [`PromoError::NoStoreItems`] when it does but nothing in the cart is sold
/// by its store.
pub fn apply_promo(snapshot: &Snapshot, code: &str) -> Result<Discount, PromoError> {
    let discount = snapshot
        .validate_discount_code(code)
        .ok_or(PromoError::Invalid)?;
    let cart = CartView::project(snapshot);
    if !cart
        .lines
        .iter()
        .any(|line| line.product.store_id == discount.store_id)
    {
        return Err(PromoError::NoStoreItems);
    }
    Ok(discount.clone())
}

/// Place an order for the current cart.
///
/// Runs redeem, create, clear as three separate store commits. Retrying
/// after a mid-sequence failure redeems the promo again; there is no
/// idempotency key on order creation.
///
/// # Errors
///
/// Returns a [`StoreError`] if any of the three commits fails to persist.
/// An error from the later commits does not roll back the earlier ones.
pub fn place_order(
    store: &Store,
    form: CheckoutForm,
    discount: Option<&Discount>,
) -> Result<Order, StoreError> {
    let snapshot = store.snapshot();
    let cart = CartView::project(&snapshot);
    let quote = CheckoutQuote::compute(&cart.lines, form.delivery_method, discount);

    if let Some(discount) = discount {
        store.use_discount_code(&discount.id)?;
    }

    let items = cart
        .lines
        .iter()
        .map(|line| bazaar_core::OrderLine {
            product_id: line.product.id.clone(),
            quantity: line.quantity,
            store_id: Some(line.product.store_id.clone()),
        })
        .collect();
    let mut store_ids: Vec<StoreId> = Vec::new();
    for line in &cart.lines {
        if !store_ids.contains(&line.product.store_id) {
            store_ids.push(line.product.store_id.clone());
        }
    }

    let order = store.create_order(OrderDraft {
        items,
        store_id: store_ids.first().cloned(),
        store_ids,
        subtotal: quote.subtotal,
        discount: quote.discount,
        delivery: quote.delivery,
        total: quote.total,
        discount_code: discount.map(|d| d.code.clone()),
        discount_store_id: discount.map(|d| d.store_id.clone()),
        customer: form.customer,
        delivery_info: form.delivery_info,
        payment_method: form.payment_method,
    })?;
    store.clear_cart()?;
    tracing::info!(order_id = %order.id, total = %order.total, "Order placed");
    Ok(order)
}
