//! Newtype IDs for type-safe identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a product, as rendered in a card's `data-product-id`.
///
/// Product ids are opaque strings: `"42"` and `"042"` are different products.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Id used when a card carries no `data-product-id`.
    pub const FALLBACK: &'static str = "1";

    /// Create a new ID from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Use `raw` if present and non-empty, otherwise the fallback id `"1"`.
    pub fn or_fallback(raw: Option<&str>) -> Self {
        match raw {
            Some(id) if !id.is_empty() => Self::new(id),
            _ => Self::new(Self::FALLBACK),
        }
    }

    /// Get the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ProductId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ProductId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}
