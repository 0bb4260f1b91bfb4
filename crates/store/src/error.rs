//! Error types for the store and its storage backends.
//!
//! Storage failures and domain-rule rejections are kept separate: a
//! [`StorageError`] means a backend could not read or write a key, while
//! [`StoreError`] is what mutators return to callers. Display strings on the
//! domain variants are shown to shoppers and admins as-is.

use thiserror::Error;

/// Failure while reading or writing a persistence key.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying filesystem operation failed.
    #[error("storage io: {0}")]
    Io(#[from] std::io::Error),

    /// Stored value could not be serialized or deserialized.
    #[error("storage serialization: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Error returned by store mutators.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Admin login with an unknown username or wrong password.
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// A store hit the product cap of its current tier.
    #[error("Your {plan} plan allows up to {max_products} products. Upgrade your tier to add more.")]
    ProductQuotaExceeded {
        /// Display name of the plan that was exceeded.
        plan: &'static str,
        /// Product cap of that plan.
        max_products: usize,
    },

    /// Tier purchase attempted without a store-owner session.
    #[error("Only store owners can buy tiers.")]
    NotAStoreOwner,

    /// Persisting the mutated collection failed. State was not committed.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Result type alias for `StoreError`.
pub type Result<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_display() {
        let err = StoreError::InvalidCredentials;
        assert_eq!(err.to_string(), "Invalid username or password");

        let err = StoreError::NotAStoreOwner;
        assert_eq!(err.to_string(), "Only store owners can buy tiers.");
    }

    #[test]
    fn test_quota_error_names_the_plan() {
        let err = StoreError::ProductQuotaExceeded {
            plan: "Free",
            max_products: 2,
        };
        assert_eq!(
            err.to_string(),
            "Your Free plan allows up to 2 products. Upgrade your tier to add more."
        );
    }

    #[test]
    fn test_storage_error_wraps_io() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = StoreError::from(StorageError::from(io));
        assert!(matches!(err, StoreError::Storage(StorageError::Io(_))));
        assert!(err.to_string().contains("denied"));
    }
}
