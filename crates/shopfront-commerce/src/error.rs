//! Commerce error types.

use thiserror::Error;

/// Errors that can occur in storefront operations.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Product not found.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Two catalog entries share an id.
    #[error("Duplicate product id in catalog: {0}")]
    DuplicateProduct(String),

    /// Unknown sort key.
    #[error("Invalid sort key: {0:?} (expected price-asc, price-desc or name-asc)")]
    InvalidSortKey(String),

    /// Postal code is not 8 digits.
    #[error("Invalid postal code: {0:?}")]
    InvalidPostalCode(String),

    /// Checkout attempted with no items.
    #[error("Cart is empty")]
    EmptyCart,

    /// Storage error.
    #[error("Storage error: {0}")]
    StorageError(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Validation error.
    #[error("Validation error: {0}")]
    ValidationError(String),
}

#[cfg(feature = "storage")]
impl From<shopfront_cache::CacheError> for CommerceError {
    fn from(e: shopfront_cache::CacheError) -> Self {
        match e {
            shopfront_cache::CacheError::SerializeError(e) => {
                CommerceError::SerializationError(e.to_string())
            }
            other => CommerceError::StorageError(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::SerializationError(e.to_string())
    }
}
