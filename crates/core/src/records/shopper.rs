//! Shopper identity on the storefront side.

use serde::{Deserialize, Serialize};

/// The storefront's singleton auth profile.
///
/// Sign-in overwrites the whole record, profile updates patch fields, and
/// sign-out resets it to the unauthenticated default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopperProfile {
    pub is_authenticated: bool,
    pub name: String,
    pub phone: String,
    pub email: String,
}
