//! Discount code records.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{DiscountId, StoreId};

/// A store-scoped, quantity-limited fixed-amount coupon.
///
/// Codes are stored uppercase with all whitespace stripped. Uniqueness is
/// expected but not enforced; the first match wins on lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Discount {
    pub id: DiscountId,
    pub code: String,
    pub store_id: StoreId,
    pub discount_value: Decimal,
    pub quantity: u32,
    pub used_count: u32,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl Discount {
    /// Redemptions left. Negative when over-redeemed: `use` has no bounds
    /// check, only `validate` does.
    #[must_use]
    pub fn remaining(&self) -> i64 {
        i64::from(self.quantity) - i64::from(self.used_count)
    }

    /// Normalize a stored code: uppercase, every whitespace run removed.
    #[must_use]
    pub fn normalize_code(code: &str) -> String {
        code.to_uppercase()
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect()
    }

    /// Normalize user input for lookup: trimmed and uppercased only.
    #[must_use]
    pub fn normalize_input(code: &str) -> String {
        code.trim().to_uppercase()
    }
}
