//! Bazaar Store - The reactive, persisted state engine.
//!
//! One [`Store`] owns every domain collection (cart, wishlist, shopper
//! profile, orders, products, categories, store owners, discounts, the admin
//! session, banners, highlights). Each collection is mirrored to a
//! [`storage::StorageBackend`] as JSON under a fixed key, and every committed
//! mutation rebuilds an immutable [`Snapshot`] and synchronously notifies
//! subscribers.
//!
//! # Example
//!
//! ```rust
//! use bazaar_core::ProductId;
//! use bazaar_store::Store;
//!
//! let store = Store::in_memory();
//! store.add_to_cart(&ProductId::new("p-1"), 2)?;
//! assert_eq!(store.snapshot().counts().cart_count, 2);
//! # Ok::<(), bazaar_store::StoreError>(())
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

mod error;
mod forms;
mod snapshot;
mod store;

pub mod seed;
pub mod storage;

pub use error::{Result, StorageError, StoreError};
pub use forms::{
    AdminUserForm, AdminUserPatch, BannerForm, BannerPatch, CategoryForm, DiscountForm,
    OrderDraft, ProductForm, ProfilePatch, SignInDetails,
};
pub use snapshot::{Counts, Snapshot};
pub use store::{Store, Subscription};
