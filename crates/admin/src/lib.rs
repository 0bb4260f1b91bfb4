//! Bazaar Admin - admin panel read models over the store snapshot.
//!
//! Everything here is a pure projection: views never fail and never mutate.
//! Mutations stay on [`bazaar_store::Store`]; the admin pages call those
//! directly and re-project after the subscriber fires.
//!
//! # Modules
//!
//! - [`session`] - who is logged in and what they may see
//! - [`scope`] - the snapshot filtered to the caller's store
//! - [`stats`] - dashboard aggregates and the customer roll-up
//! - [`orders`] - the order workbench (buckets, search, sorting, paging)
//! - [`platform`] - the superadmin per-store overview

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod orders;
pub mod platform;
pub mod scope;
pub mod session;
pub mod stats;

pub use orders::{OrderBucket, OrderColumn, OrderFilter, OrdersTable, SortDir};
pub use platform::{PlatformOverview, StoreRow};
pub use scope::ScopedState;
pub use session::SessionView;
pub use stats::{CustomerStat, DashboardStats};
