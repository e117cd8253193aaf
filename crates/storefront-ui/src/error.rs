//! Error types for the page layer.

use thiserror::Error;

/// Errors that can occur while wiring or running the page.
#[derive(Error, Debug)]
pub enum UiError {
    /// A configured selector could not be parsed.
    #[error("Invalid selector: {0}")]
    InvalidSelector(String),

    /// Store error.
    #[error("Cache error: {0}")]
    Cache(#[from] storefront_cache::CacheError),

    /// Cart error.
    #[error("Commerce error: {0}")]
    Commerce(#[from] storefront_commerce::CommerceError),

    /// Session error.
    #[error("Auth error: {0}")]
    Auth(#[from] storefront_auth::AuthError),

    /// Favorite sync backend error.
    #[error("Favorite sync failed: {0}")]
    FavoriteSync(String),
}
