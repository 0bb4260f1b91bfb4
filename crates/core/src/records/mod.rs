//! Persisted domain records.
//!
//! Every struct here is one of the JSON shapes the store writes under its
//! fixed storage keys. Field names serialize in camelCase, matching the
//! persisted format.

pub mod admin;
pub mod cart;
pub mod catalog;
pub mod content;
pub mod discount;
pub mod order;
pub mod shopper;

pub use admin::{AdminSession, AdminUser};
pub use cart::CartLine;
pub use catalog::{Category, Product};
pub use content::{Banner, Highlights};
pub use discount::Discount;
pub use order::{Customer, DeliveryInfo, Order, OrderLine};
pub use shopper::ShopperProfile;
