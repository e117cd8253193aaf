//! Client-side commerce types for the storefront page.
//!
//! - **Ids**: [`ProductId`] newtype
//! - **Cart**: the local-storage cart, its line items and the add-to-cart
//!   find-or-insert rule
//! - **Price**: parsing of displayed price text such as `"¥99.50"`
//!
//! # Example
//!
//! ```rust
//! use storefront_cache::{Cache, MemoryStore};
//! use storefront_commerce::prelude::*;
//!
//! let cache = Cache::new(MemoryStore::new());
//! let shoe = CartProduct::new("42", "Shoe", parse_price("¥99.50", "¥"), "/img/shoe.png");
//!
//! add_to_cart(&cache, CART_KEY, &shoe).unwrap();
//! let cart = add_to_cart(&cache, CART_KEY, &shoe).unwrap();
//!
//! assert_eq!(cart.len(), 1);
//! assert_eq!(cart.get_item(&ProductId::new("42")).unwrap().quantity, 2);
//! ```

pub mod cart;
pub mod error;
pub mod ids;
pub mod price;
pub mod storage;

pub use cart::{AddOutcome, Cart, CartProduct, LineItem};
pub use error::CommerceError;
pub use ids::ProductId;
pub use price::{parse_float_prefix, parse_price, DEFAULT_CURRENCY_PREFIX};
pub use storage::{add_to_cart, CART_KEY};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::cart::{AddOutcome, Cart, CartProduct, LineItem};
    pub use crate::error::CommerceError;
    pub use crate::ids::ProductId;
    pub use crate::price::{parse_price, DEFAULT_CURRENCY_PREFIX};
    pub use crate::storage::{add_to_cart, CART_KEY};
}
