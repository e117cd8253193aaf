//! Key-value storage layer for the storefront page.
//!
//! The page keeps all of its state (login token, user profile, cart) in the
//! browser's local storage as text blobs. This crate hides that behind the
//! [`Store`] trait so the rest of the workspace can run against an
//! in-memory map in tests and against `window.localStorage` in the browser.
//!
//! # Example
//!
//! ```rust
//! use storefront_cache::{Cache, MemoryStore};
//!
//! let cache = Cache::new(MemoryStore::new());
//! cache.set_raw("token", "abc").unwrap();
//! cache.set("cart", &vec![1, 2, 3]).unwrap();
//!
//! assert_eq!(cache.get_raw("token").unwrap().as_deref(), Some("abc"));
//! let cart: Option<Vec<u32>> = cache.get("cart").unwrap();
//! assert_eq!(cart, Some(vec![1, 2, 3]));
//! ```

mod error;
mod kv;
mod store;

pub use error::CacheError;
pub use kv::Cache;
#[cfg(target_arch = "wasm32")]
pub use store::LocalStorage;
pub use store::{MemoryStore, Store};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, MemoryStore, Store};
}
