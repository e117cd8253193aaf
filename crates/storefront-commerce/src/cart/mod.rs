//! Shopping cart module.
//!
//! Contains the local-storage cart and its line items.

mod cart;

pub use cart::{AddOutcome, Cart, CartProduct, LineItem};
