//! Product and category records.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{CategoryId, ProductId, StoreId};

/// A product listed by exactly one store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub store_id: StoreId,
    pub title: String,
    pub brand: String,
    /// Category NAME, not id. Category deletion reassigns products by name.
    pub category: String,
    pub price: Decimal,
    pub rating: Decimal,
    /// Derived: `stock_quantity > 0`. Kept on the record because consumers
    /// filter on it directly.
    pub in_stock: bool,
    pub fast_delivery: bool,
    pub stock_quantity: u32,
    pub colors: Vec<String>,
    pub sizes: Vec<String>,
    pub image: String,
    pub thumbnail: String,
    pub description: String,
}

/// A catalog category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub slug: String,
    pub description: String,
}

impl Category {
    /// Derive a URL slug from a category name: lowercased, spaces to dashes.
    #[must_use]
    pub fn slug_from_name(name: &str) -> String {
        name.to_lowercase().split_whitespace().collect::<Vec<_>>().join("-")
    }
}
