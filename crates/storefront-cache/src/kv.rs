//! Typed wrapper over a [`Store`] with JSON serialization.

use crate::{CacheError, Store};
use serde::{de::DeserializeOwned, Serialize};

/// Type-safe cache over a raw text [`Store`].
///
/// Provides automatic JSON serialization for any type that implements
/// `Serialize` and `DeserializeOwned`, plus raw access for values the page
/// stores unencoded (the login token).
#[derive(Debug, Clone)]
pub struct Cache<S> {
    store: S,
}

impl<S: Store> Cache<S> {
    /// Wrap a store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Borrow the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Get a value from the cache.
    ///
    /// Returns `None` if the key doesn't exist, and an error if the stored
    /// text is not valid JSON for `T`.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let cart: Option<Vec<LineItem>> = cache.get("cart")?;
    /// ```
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        match self.store.get(key)? {
            Some(text) => {
                let value: T = serde_json::from_str(&text)?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Get a value, falling back to `T::default()` when the key is missing,
    /// unreadable, or holds malformed JSON.
    ///
    /// Used on page-initialization paths that must never fail.
    pub fn get_or_default<T: DeserializeOwned + Default>(&self, key: &str) -> T {
        match self.get(key) {
            Ok(Some(value)) => value,
            Ok(None) => T::default(),
            Err(e) => {
                tracing::warn!(key, error = %e, "discarding unreadable stored value");
                T::default()
            }
        }
    }

    /// Set a value in the cache.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// cache.set("cart", &items)?;
    /// ```
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        let text = serde_json::to_string(value)?;
        self.store.set(key, &text)
    }

    /// Get the raw text stored under `key`.
    pub fn get_raw(&self, key: &str) -> Result<Option<String>, CacheError> {
        self.store.get(key)
    }

    /// Store raw text under `key` without JSON encoding.
    pub fn set_raw(&self, key: &str, value: &str) -> Result<(), CacheError> {
        self.store.set(key, value)
    }

    /// Delete a value from the cache.
    pub fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.store.remove(key)
    }

    /// Check if a key exists in the cache.
    pub fn exists(&self, key: &str) -> Result<bool, CacheError> {
        Ok(self.store.get(key)?.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;
    use serde::Deserialize;

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    struct Profile {
        nickname: String,
    }

    #[test]
    fn test_json_round_trip() {
        let cache = Cache::new(MemoryStore::new());
        let profile = Profile {
            nickname: "ana".to_string(),
        };
        cache.set("userInfo", &profile).unwrap();

        let loaded: Option<Profile> = cache.get("userInfo").unwrap();
        assert_eq!(loaded, Some(profile));
    }

    #[test]
    fn test_malformed_json_is_error() {
        let cache = Cache::new(MemoryStore::with_entries([("userInfo", "{not json")]));
        let result: Result<Option<Profile>, _> = cache.get("userInfo");
        assert!(matches!(result, Err(CacheError::SerializeError(_))));
    }

    #[test]
    fn test_get_or_default_swallows_malformed() {
        let cache = Cache::new(MemoryStore::with_entries([("cart", "oops")]));
        let items: Vec<u32> = cache.get_or_default("cart");
        assert!(items.is_empty());

        let missing: Vec<u32> = cache.get_or_default("nothing-here");
        assert!(missing.is_empty());
    }

    #[test]
    fn test_raw_values_are_not_encoded() {
        let cache = Cache::new(MemoryStore::new());
        cache.set_raw("token", "eyJhbGci").unwrap();
        assert_eq!(
            cache.store().get("token").unwrap().as_deref(),
            Some("eyJhbGci")
        );
        assert!(cache.exists("token").unwrap());

        cache.delete("token").unwrap();
        assert!(!cache.exists("token").unwrap());
    }
}
