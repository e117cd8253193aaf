//! Cart persistence in the page's key-value store.

use storefront_cache::{Cache, Store};

use crate::cart::{Cart, CartProduct};
use crate::error::CommerceError;

/// Store key holding the cart JSON array.
pub const CART_KEY: &str = "cart";

impl Cart {
    /// Load the cart stored under `key`.
    ///
    /// A missing key, an unreadable store, or text that is not a JSON array
    /// all yield an empty cart. Array entries that are not line items are
    /// kept as they are.
    pub fn load<S: Store>(cache: &Cache<S>, key: &str) -> Self {
        cache.get_or_default(key)
    }

    /// Write the cart under `key`.
    pub fn save<S: Store>(&self, cache: &Cache<S>, key: &str) -> Result<(), CommerceError> {
        cache.set(key, self)?;
        Ok(())
    }
}

/// Read the cart, add one unit of `product`, and write it back.
///
/// Returns the cart as written. The read-modify-write is not atomic: two
/// tabs adding at the same moment can lose an increment.
pub fn add_to_cart<S: Store>(
    cache: &Cache<S>,
    key: &str,
    product: &CartProduct,
) -> Result<Cart, CommerceError> {
    let mut cart = Cart::load(cache, key);
    let outcome = cart.add_product(product)?;
    cart.save(cache, key)?;

    tracing::debug!(
        product_id = %product.product_id,
        ?outcome,
        items = cart.len(),
        "cart updated"
    );
    Ok(cart)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::ProductId;
    use storefront_cache::{MemoryStore, Store};

    #[test]
    fn test_missing_cart_is_empty() {
        let cache = Cache::new(MemoryStore::new());
        assert!(Cart::load(&cache, CART_KEY).is_empty());
    }

    #[test]
    fn test_malformed_cart_is_empty() {
        let cache = Cache::new(MemoryStore::with_entries([(CART_KEY, "{\"nope\":1}")]));
        assert!(Cart::load(&cache, CART_KEY).is_empty());
    }

    #[test]
    fn test_add_to_cart_persists() {
        let store = MemoryStore::new();
        let cache = Cache::new(store.clone());
        let shoe = CartProduct::new("42", "Shoe", 99.5, "shoe.png");

        add_to_cart(&cache, CART_KEY, &shoe).unwrap();
        add_to_cart(&cache, CART_KEY, &shoe).unwrap();

        let reloaded = Cart::load(&Cache::new(store), CART_KEY);
        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded.get_item(&ProductId::new("42")).unwrap().quantity, 2);
    }

    #[test]
    fn test_add_to_cart_keeps_existing_items() {
        let cache = Cache::new(MemoryStore::with_entries([(
            CART_KEY,
            r#"[{"productId":"7","name":"Hat","price":10,"image":"","quantity":3,"selected":false}]"#,
        )]));

        let cart = add_to_cart(&cache, CART_KEY, &CartProduct::new("42", "Shoe", 99.5, ""))
            .unwrap();
        assert_eq!(cart.len(), 2);

        let hat = cart.get_item(&ProductId::new("7")).unwrap();
        assert_eq!(hat.quantity, 3);
        assert!(!hat.selected);
        assert_eq!(cart.get_item(&ProductId::new("42")).unwrap().quantity, 1);
    }

    #[test]
    fn test_add_to_cart_never_drops_foreign_entries() {
        let store = MemoryStore::with_entries([(
            CART_KEY,
            r#"[{"productId":7,"name":"Hat","price":10,"image":"","quantity":3,"selected":true},
                {"productId":"8","name":"Cap","price":"12","image":"","quantity":2,"selected":true}]"#,
        )]);
        let cache = Cache::new(store.clone());

        let cart = add_to_cart(&cache, CART_KEY, &CartProduct::new("42", "Shoe", 99.5, ""))
            .unwrap();
        assert_eq!(cart.len(), 3);

        let stored: serde_json::Value =
            serde_json::from_str(&store.get(CART_KEY).unwrap().unwrap()).unwrap();
        assert_eq!(stored[0]["productId"], 7);
        assert_eq!(stored[0]["quantity"], 3);
        assert_eq!(stored[1]["productId"], "8");
        assert_eq!(stored[1]["price"], "12");
        assert_eq!(stored[2]["productId"], "42");
        assert_eq!(stored[2]["quantity"], 1);
    }

    #[test]
    fn test_add_to_cart_keeps_unknown_fields() {
        let store = MemoryStore::with_entries([(
            CART_KEY,
            r#"[{"productId":"7","name":"Hat","price":10,"image":"","quantity":3,"selected":false,"sku":"H-1"}]"#,
        )]);
        let cache = Cache::new(store.clone());

        add_to_cart(&cache, CART_KEY, &CartProduct::new("7", "Hat", 10.0, "")).unwrap();

        let stored: serde_json::Value =
            serde_json::from_str(&store.get(CART_KEY).unwrap().unwrap()).unwrap();
        assert_eq!(stored[0]["sku"], "H-1");
        assert_eq!(stored[0]["quantity"], 4);
        assert_eq!(stored[0]["selected"], false);
    }
}
