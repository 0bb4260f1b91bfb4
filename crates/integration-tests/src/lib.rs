//! Cross-crate flow tests for Bazaar.
//!
//! Each file under `tests/` drives a real [`bazaar_store::Store`] through a
//! storefront or admin flow end to end:
//!
//! - `checkout_flow` - cart to placed order, promo codes included
//! - `admin_scoping` - per-store visibility, product quotas, tier upgrades
//! - `persistence` - file-backed state across store instances
//! - `subscriptions` - change notification semantics
//!
//! Shared fixtures live here.

#![cfg_attr(not(test), forbid(unsafe_code))]

use bazaar_core::{Customer, DeliveryInfo, DeliveryMethod, PaymentMethod};
use bazaar_storefront::CheckoutForm;

/// A filled-in checkout form for tests that place orders.
#[must_use]
pub fn checkout_form(delivery_method: DeliveryMethod) -> CheckoutForm {
    CheckoutForm {
        customer: Customer {
            name: "Anna Ivanova".to_string(),
            phone: "+7 (900) 100-00-00".to_string(),
            email: "anna@mail.ru".to_string(),
        },
        delivery_info: DeliveryInfo {
            city: "Moscow".to_string(),
            address: "ul. Lenina 10".to_string(),
            comment: String::new(),
        },
        delivery_method,
        payment_method: PaymentMethod::Card,
    }
}
