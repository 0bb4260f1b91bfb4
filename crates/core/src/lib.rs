//! Bazaar Core - Shared domain types library.
//!
//! This crate provides the common types used across all Bazaar components:
//! - `store` - The reactive, persisted state engine
//! - `storefront` - Shopper-facing read models and checkout
//! - `admin` - Admin panel read models and analytics
//! - `cli` - Command-line demo and management tools
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no persistence, no
//! subscriptions. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, status enums, and the tier plan table
//! - [`records`] - The persisted domain records (products, orders, users, ...)

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod records;
pub mod types;

pub use records::*;
pub use types::*;
