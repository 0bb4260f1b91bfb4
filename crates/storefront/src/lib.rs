//! Bazaar Storefront - shopper-facing read models and the checkout flow.
//!
//! Everything here is a pure projection over a [`bazaar_store::Snapshot`]:
//! views never fail, never mutate, and silently skip dangling references.
//! The one exception is [`checkout::place_order`], which drives the store
//! through the redeem, create-order, clear-cart sequence.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod home;
pub mod stores;
pub mod wishlist;

pub use cart::{CartLineView, CartView};
pub use catalog::{CatalogQuery, CatalogSort, CatalogView, PAGE_SIZE};
pub use checkout::{CheckoutForm, CheckoutQuote, PromoError, apply_promo, place_order};
pub use home::HomeView;
pub use stores::StoreInfo;
pub use wishlist::WishlistView;
