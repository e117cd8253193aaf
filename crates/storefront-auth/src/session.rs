//! Session state read from and cleared in the page's store.

use serde::{Deserialize, Serialize};
use storefront_cache::{Cache, Store};

use crate::token::AuthToken;
use crate::user::UserInfo;
use crate::AuthError;

/// Store key holding the raw login token.
pub const TOKEN_KEY: &str = "token";

/// Store key holding the JSON profile record.
pub const USER_INFO_KEY: &str = "userInfo";

/// Store keys the session lives under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionKeys {
    pub token: String,
    pub user_info: String,
}

impl Default for SessionKeys {
    fn default() -> Self {
        Self {
            token: TOKEN_KEY.to_string(),
            user_info: USER_INFO_KEY.to_string(),
        }
    }
}

/// The client-side login session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    /// Login token, if any.
    pub token: Option<AuthToken>,
    /// Profile record; default when absent or unreadable.
    pub profile: UserInfo,
}

impl Session {
    /// Create a logged-in session.
    pub fn authenticated(token: AuthToken, profile: UserInfo) -> Self {
        Self {
            token: Some(token),
            profile,
        }
    }

    /// Read the session from the store.
    ///
    /// Never fails: an unreadable token counts as logged out and a malformed
    /// profile as an empty one.
    pub fn load<S: Store>(cache: &Cache<S>, keys: &SessionKeys) -> Self {
        let token = Self::read_token(cache, keys);
        let profile = cache.get_or_default(&keys.user_info);
        Self { token, profile }
    }

    /// Read just the token.
    pub fn read_token<S: Store>(cache: &Cache<S>, keys: &SessionKeys) -> Option<AuthToken> {
        match cache.get_raw(&keys.token) {
            Ok(raw) => raw.and_then(AuthToken::parse),
            Err(e) => {
                tracing::warn!(error = %e, "token unreadable, treating as logged out");
                None
            }
        }
    }

    /// Whether a token is present.
    pub fn is_logged_in(&self) -> bool {
        self.token.is_some()
    }

    /// Name to show in the account menu, if any.
    pub fn display_name(&self) -> Option<&str> {
        self.profile.display_name()
    }

    /// Remove token and profile from the store.
    pub fn clear<S: Store>(cache: &Cache<S>, keys: &SessionKeys) -> Result<(), AuthError> {
        cache.delete(&keys.token)?;
        cache.delete(&keys.user_info)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_cache::MemoryStore;

    fn keys() -> SessionKeys {
        SessionKeys::default()
    }

    #[test]
    fn test_empty_store_is_logged_out() {
        let cache = Cache::new(MemoryStore::new());
        let session = Session::load(&cache, &keys());
        assert!(!session.is_logged_in());
        assert_eq!(session.display_name(), None);
    }

    #[test]
    fn test_token_without_profile() {
        let cache = Cache::new(MemoryStore::with_entries([(TOKEN_KEY, "abc")]));
        let session = Session::load(&cache, &keys());
        assert!(session.is_logged_in());
        assert_eq!(session.profile, UserInfo::default());
    }

    #[test]
    fn test_empty_token_is_logged_out() {
        let cache = Cache::new(MemoryStore::with_entries([(TOKEN_KEY, "")]));
        assert!(!Session::load(&cache, &keys()).is_logged_in());
    }

    #[test]
    fn test_malformed_profile_defaults() {
        let cache = Cache::new(MemoryStore::with_entries([
            (TOKEN_KEY, "abc"),
            (USER_INFO_KEY, "<html>"),
        ]));
        let session = Session::load(&cache, &keys());
        assert!(session.is_logged_in());
        assert_eq!(session.display_name(), None);
    }

    #[test]
    fn test_load_then_clear() {
        let store = MemoryStore::with_entries([
            (TOKEN_KEY, "abc"),
            (USER_INFO_KEY, r#"{"nickname":"ana"}"#),
            ("cart", "[]"),
        ]);
        let cache = Cache::new(store.clone());
        assert_eq!(Session::load(&cache, &keys()).display_name(), Some("ana"));

        Session::clear(&cache, &keys()).unwrap();
        assert!(!store.contains(TOKEN_KEY));
        assert!(!store.contains(USER_INFO_KEY));
        assert!(store.contains("cart"));
        assert_eq!(Session::load(&cache, &keys()), Session::default());
    }

    #[test]
    fn test_keys_from_partial_config() {
        let keys: SessionKeys = serde_json::from_str(r#"{"token":"jwt"}"#).unwrap();
        assert_eq!(keys.token, "jwt");
        assert_eq!(keys.user_info, USER_INFO_KEY);
    }
}
