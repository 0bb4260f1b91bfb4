//! Cart-to-order flows through the storefront checkout.

#![allow(clippy::unwrap_used)]

use rust_decimal_macros::dec;

use bazaar_core::{DeliveryMethod, OrderStatus, ProductId};
use bazaar_store::Store;
use bazaar_storefront::{CartView, CheckoutQuote, PromoError, apply_promo, place_order};
use integration_tests::checkout_form;

fn used_count(store: &Store, code: &str) -> u32 {
    store
        .snapshot()
        .admin_discounts
        .iter()
        .find(|d| d.code == code)
        .unwrap()
        .used_count
}

#[test]
fn test_full_checkout_flow_with_promo() {
    let store = Store::in_memory();
    store.add_to_cart(&ProductId::new("p-1"), 2).unwrap(); // 2 x 25
    store.add_to_cart(&ProductId::new("p-2"), 1).unwrap(); // 1 x 79
    let orders_before = store.snapshot().orders.len();

    // lowercase on purpose; validation normalizes the code
    let discount = apply_promo(&store.snapshot(), "fashion20").unwrap();
    let cart = CartView::project(&store.snapshot());
    let quote = CheckoutQuote::compute(&cart.lines, DeliveryMethod::Standard, Some(&discount));
    assert_eq!(quote.subtotal, dec!(129));
    assert_eq!(quote.discount, dec!(20));
    // 129 > 80, standard delivery is free
    assert_eq!(quote.delivery, dec!(0));
    assert_eq!(quote.total, dec!(109));

    let order = place_order(
        &store,
        checkout_form(DeliveryMethod::Standard),
        Some(&discount),
    )
    .unwrap();

    assert_eq!(order.status, OrderStatus::Created);
    assert_eq!(order.total, dec!(109));
    assert_eq!(order.discount_code.as_deref(), Some("FASHION20"));
    assert_eq!(order.store_id.as_ref().unwrap().as_str(), "store-1");
    assert_eq!(order.store_ids.len(), 1);
    assert!(order.items.iter().all(|line| line.store_id.is_some()));

    let snapshot = store.snapshot();
    assert!(snapshot.cart.is_empty());
    assert_eq!(snapshot.orders.len(), orders_before + 1);
    assert_eq!(snapshot.orders.first().unwrap().id, order.id);
    assert_eq!(used_count(&store, "FASHION20"), 1);
}

#[test]
fn test_mixed_store_cart_records_every_store() {
    let store = Store::in_memory();
    store.add_to_cart(&ProductId::new("p-1"), 1).unwrap(); // store-1
    store.add_to_cart(&ProductId::new("p-7"), 1).unwrap(); // store-2

    let order = place_order(&store, checkout_form(DeliveryMethod::Standard), None).unwrap();

    assert_eq!(
        order
            .store_ids
            .iter()
            .map(bazaar_core::StoreId::as_str)
            .collect::<Vec<_>>(),
        ["store-1", "store-2"]
    );
    // legacy field points at the first store in cart order
    assert_eq!(order.store_id.as_ref().unwrap().as_str(), "store-1");
}

#[test]
fn test_promo_rejected_without_matching_store_items() {
    let store = Store::in_memory();
    store.add_to_cart(&ProductId::new("p-7"), 1).unwrap(); // store-2 only

    let err = apply_promo(&store.snapshot(), "FASHION20").unwrap_err();
    assert_eq!(err, PromoError::NoStoreItems);
    assert_eq!(err.to_string(), "No items from this store in your cart");
}

#[test]
fn test_unknown_promo_is_invalid() {
    let store = Store::in_memory();
    store.add_to_cart(&ProductId::new("p-1"), 1).unwrap();

    let err = apply_promo(&store.snapshot(), "NOPE").unwrap_err();
    assert_eq!(err, PromoError::Invalid);
    assert_eq!(err.to_string(), "Invalid or expired promo code");
}

#[test]
fn test_placing_twice_redeems_the_promo_twice() {
    let store = Store::in_memory();

    for _ in 0..2 {
        store.add_to_cart(&ProductId::new("p-2"), 1).unwrap();
        let discount = apply_promo(&store.snapshot(), "FASHION20").unwrap();
        place_order(
            &store,
            checkout_form(DeliveryMethod::Standard),
            Some(&discount),
        )
        .unwrap();
    }

    // no idempotency key: each placement consumes a redemption
    assert_eq!(used_count(&store, "FASHION20"), 2);
}

#[test]
fn test_express_delivery_is_charged_above_the_threshold() {
    let store = Store::in_memory();
    store.add_to_cart(&ProductId::new("p-2"), 2).unwrap(); // 158

    let order = place_order(&store, checkout_form(DeliveryMethod::Express), None).unwrap();
    assert_eq!(order.subtotal, dec!(158));
    assert_eq!(order.delivery, dec!(9));
    assert_eq!(order.total, dec!(167));
}

#[test]
fn test_standard_delivery_fee_below_the_threshold() {
    let store = Store::in_memory();
    store.add_to_cart(&ProductId::new("p-1"), 1).unwrap(); // 25

    let order = place_order(&store, checkout_form(DeliveryMethod::Standard), None).unwrap();
    assert_eq!(order.delivery, dec!(5));
    assert_eq!(order.total, dec!(30));
}
