//! CLI subcommand implementations.
//!
//! Commands log their output through `tracing` so it lands in the same
//! stream as the store's own diagnostics.

pub mod admin;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod orders;
pub mod seed;
pub mod state;
