//! Typed payloads for store mutators.
//!
//! Upsert forms leave every field optional; the store fills defaults in one
//! place when it creates a record and only overwrites provided fields when it
//! patches one.

use bazaar_core::{
    CategoryId, Customer, DeliveryInfo, DiscountId, OrderLine, PaymentMethod, ProductId, StoreId,
    Tier,
};
use rust_decimal::Decimal;

/// Contact details supplied at shopper sign-in.
#[derive(Debug, Clone, Default)]
pub struct SignInDetails {
    pub name: String,
    pub phone: String,
    pub email: String,
}

/// Partial update of the shopper profile. `None` keeps the current value.
#[derive(Debug, Clone, Default)]
pub struct ProfilePatch {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

/// Everything checkout computed for a new order.
///
/// The store stamps id, creation time, and initial status on top of this.
#[derive(Debug, Clone)]
pub struct OrderDraft {
    pub items: Vec<OrderLine>,
    pub store_id: Option<StoreId>,
    pub store_ids: Vec<StoreId>,
    pub subtotal: Decimal,
    pub discount: Decimal,
    pub delivery: Decimal,
    pub total: Decimal,
    pub discount_code: Option<String>,
    pub discount_store_id: Option<StoreId>,
    pub customer: Customer,
    pub delivery_info: DeliveryInfo,
    pub payment_method: PaymentMethod,
}

/// Create-or-patch payload for a catalog product.
///
/// `id: Some` patches that product; `id: None` creates one with defaults for
/// every missing field.
#[derive(Debug, Clone, Default)]
pub struct ProductForm {
    pub id: Option<ProductId>,
    pub store_id: Option<StoreId>,
    pub title: Option<String>,
    pub brand: Option<String>,
    pub category: Option<String>,
    pub price: Option<Decimal>,
    pub rating: Option<Decimal>,
    pub stock_quantity: Option<u32>,
    pub fast_delivery: Option<bool>,
    pub colors: Option<Vec<String>>,
    pub sizes: Option<Vec<String>>,
    pub image: Option<String>,
    pub thumbnail: Option<String>,
    pub description: Option<String>,
}

/// Create-or-patch payload for a category.
#[derive(Debug, Clone, Default)]
pub struct CategoryForm {
    pub id: Option<CategoryId>,
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
}

/// Payload for creating an admin user. Only the username is required.
#[derive(Debug, Clone, Default)]
pub struct AdminUserForm {
    pub username: String,
    pub password: Option<String>,
    pub name: Option<String>,
    pub store_name: Option<String>,
    pub tier: Option<Tier>,
}

/// Partial update of an admin user. Role and store id are not patchable.
#[derive(Debug, Clone, Default)]
pub struct AdminUserPatch {
    pub username: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
    pub store_name: Option<String>,
    pub tier: Option<Tier>,
}

/// Create-or-patch payload for a discount code.
#[derive(Debug, Clone, Default)]
pub struct DiscountForm {
    pub id: Option<DiscountId>,
    pub code: Option<String>,
    pub store_id: Option<StoreId>,
    pub discount_value: Option<Decimal>,
    pub quantity: Option<u32>,
    pub active: Option<bool>,
}

/// Payload for creating a banner.
#[derive(Debug, Clone, Default)]
pub struct BannerForm {
    pub title: String,
    pub image: String,
}

/// Partial update of a banner.
#[derive(Debug, Clone, Default)]
pub struct BannerPatch {
    pub title: Option<String>,
    pub image: Option<String>,
}
