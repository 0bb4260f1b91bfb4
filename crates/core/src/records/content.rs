//! Storefront content curated from the admin panel: banners and highlights.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::types::{BannerId, ProductId, StoreId};

/// A carousel banner. `order` drives carousel position; lower sorts first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Banner {
    pub id: BannerId,
    pub title: String,
    pub image: String,
    pub order: u32,
}

/// One highlighted product per store, keyed by store id.
pub type Highlights = HashMap<StoreId, ProductId>;
