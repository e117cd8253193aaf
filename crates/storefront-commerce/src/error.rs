//! Commerce error types.

use thiserror::Error;

/// Errors that can occur in cart operations.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Quantity would overflow.
    #[error("Quantity overflow for product {0}")]
    QuantityOverflow(String),

    /// Cache error.
    #[error("Cache error: {0}")]
    CacheError(String),
}

impl From<storefront_cache::CacheError> for CommerceError {
    fn from(e: storefront_cache::CacheError) -> Self {
        CommerceError::CacheError(e.to_string())
    }
}
