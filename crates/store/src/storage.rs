//! Key-value persistence backends.
//!
//! The store keeps every collection under a fixed string key and serializes
//! it to JSON. Backends only move strings: [`FileBackend`] maps each key to a
//! `<key>.json` file in a data directory, [`MemoryBackend`] holds keys in a
//! map for tests and ephemeral runs.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::error::StorageError;

/// Storage keys for the store's persisted collections.
pub mod keys {
    /// Key for the shopper's cart lines.
    pub const CART: &str = "bazaar_cart";

    /// Key for the shopper's wishlist product ids.
    pub const WISHLIST: &str = "bazaar_wishlist";

    /// Key for the shopper profile.
    pub const AUTH: &str = "bazaar_auth";

    /// Key for the order history.
    pub const ORDERS: &str = "bazaar_orders";

    /// Key for the product catalog.
    pub const ADMIN_PRODUCTS: &str = "bazaar_admin_products";

    /// Key for the category list.
    pub const ADMIN_CATEGORIES: &str = "bazaar_admin_categories";

    /// Key for the admin user roster.
    pub const ADMIN_USERS: &str = "bazaar_admin_users";

    /// Key for the current admin session.
    pub const ADMIN_SESSION: &str = "bazaar_admin_session";

    /// Key for the discount codes.
    pub const ADMIN_DISCOUNTS: &str = "bazaar_admin_discounts";

    /// Key for the home page banners.
    pub const BANNERS: &str = "bazaar_banners";

    /// Key for the per-store highlight picks.
    pub const HIGHLIGHTS: &str = "bazaar_highlights";
}

/// A key-value backend the store persists its collections through.
///
/// Implementations must be safe to share across threads; the store calls
/// [`save`](StorageBackend::save) while holding its state lock.
pub trait StorageBackend: Send + Sync {
    /// Read the JSON string stored under `key`.
    ///
    /// Returns `Ok(None)` when the key has never been written.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend could not read the key.
    fn load(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write `json` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend could not write the key.
    fn save(&self, key: &str, json: &str) -> Result<(), StorageError>;
}

impl<B: StorageBackend + ?Sized> StorageBackend for Arc<B> {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).load(key)
    }

    fn save(&self, key: &str, json: &str) -> Result<(), StorageError> {
        (**self).save(key, json)
    }
}

// ============================================================================
// File backend
// ============================================================================

/// Backend that stores each key as a `<key>.json` file in one directory.
#[derive(Debug)]
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    /// Create a backend rooted at `dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory could not be created.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        tracing::info!(dir = %dir.display(), "Opened file storage");
        Ok(Self { dir })
    }

    /// Directory this backend reads and writes.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl StorageBackend for FileBackend {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(json) => Ok(Some(json)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn save(&self, key: &str, json: &str) -> Result<(), StorageError> {
        std::fs::write(self.path_for(key), json)?;
        Ok(())
    }
}

// ============================================================================
// Memory backend
// ============================================================================

/// In-memory backend for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryBackend {
    /// Create an empty in-memory backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryBackend {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self
            .entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn save(&self, key: &str, json: &str) -> Result<(), StorageError> {
        let mut entries = self
            .entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        entries.insert(key.to_string(), json.to_string());
        Ok(())
    }
}
