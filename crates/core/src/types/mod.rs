//! Core types for Bazaar.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod status;
pub mod tier;

pub use id::*;
pub use status::*;
pub use tier::{Tier, TierPlan};
