//! Order records.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{OrderId, OrderStatus, PaymentMethod, ProductId, StoreId};

/// A placed order.
///
/// Orders created at checkout carry the multi-store shape (`store_ids` plus
/// per-line store ids); seeded orders keep the legacy single-store shape
/// (only `store_id`). Store scoping in the admin crate handles both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub created_at: DateTime<Utc>,
    pub status: OrderStatus,
    #[serde(default)]
    pub store_id: Option<StoreId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub store_ids: Vec<StoreId>,
    pub items: Vec<OrderLine>,
    pub subtotal: Decimal,
    pub discount: Decimal,
    pub delivery: Decimal,
    pub total: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_store_id: Option<StoreId>,
    pub customer: Customer,
    pub delivery_info: DeliveryInfo,
    pub payment_method: PaymentMethod,
}

impl Order {
    /// Total quantity across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|line| line.quantity).sum()
    }
}

/// One line of an order. `store_id` is absent on legacy (seeded) orders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub product_id: ProductId,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_id: Option<StoreId>,
}

/// Who placed the order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub name: String,
    pub phone: String,
    pub email: String,
}

/// Where the order goes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryInfo {
    pub city: String,
    pub address: String,
    pub comment: String,
}
