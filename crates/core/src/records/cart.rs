//! Cart line records.

use serde::{Deserialize, Serialize};

use crate::types::ProductId;

/// One line in the shopper's cart. Unique by product id; a product added
/// twice increments the existing line instead of creating a second one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub product_id: ProductId,
    pub quantity: u32,
}

impl CartLine {
    #[must_use]
    pub const fn new(product_id: ProductId, quantity: u32) -> Self {
        Self {
            product_id,
            quantity,
        }
    }
}
