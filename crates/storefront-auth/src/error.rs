//! Authentication errors.

use thiserror::Error;

/// Authentication error type.
#[derive(Error, Debug)]
pub enum AuthError {
    /// Cache error.
    #[error("cache error: {0}")]
    Cache(#[from] storefront_cache::CacheError),
}
