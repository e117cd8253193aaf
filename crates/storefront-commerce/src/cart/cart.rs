//! Cart and line item types.

use crate::error::CommerceError;
use crate::ids::ProductId;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// The cart kept in local storage.
///
/// Serializes as a bare JSON array. Entries are kept in insertion order and
/// at most one line item exists per product id. Entries that are not line
/// items (written by some other page, or with a numeric `productId`) are
/// carried through untouched: they count towards [`Cart::len`] but never
/// match a product being added.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Cart {
    entries: Vec<CartEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
enum CartEntry {
    Item(LineItem),
    Opaque(Value),
}

/// What [`Cart::add_product`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// A new line item was appended with quantity 1.
    Inserted,
    /// An existing line item's quantity was raised to the given value.
    Incremented(i64),
}

/// Product data scraped from a product card.
#[derive(Debug, Clone, PartialEq)]
pub struct CartProduct {
    pub product_id: ProductId,
    pub name: String,
    pub price: f64,
    pub image: String,
}

impl CartProduct {
    pub fn new(
        product_id: impl Into<ProductId>,
        name: impl Into<String>,
        price: f64,
        image: impl Into<String>,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            name: name.into(),
            price,
            image: image.into(),
        }
    }
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of `product`.
    ///
    /// If a line item with the same product id exists its quantity goes up by
    /// one and its cached name/price/image are left as they were. Otherwise a
    /// new line item with quantity 1 and `selected = true` is appended.
    pub fn add_product(&mut self, product: &CartProduct) -> Result<AddOutcome, CommerceError> {
        let existing = self.entries.iter_mut().find_map(|entry| match entry {
            CartEntry::Item(item) if item.product_id == product.product_id => Some(item),
            _ => None,
        });

        if let Some(existing) = existing {
            existing.quantity = existing
                .quantity
                .checked_add(1)
                .ok_or_else(|| CommerceError::QuantityOverflow(product.product_id.to_string()))?;
            return Ok(AddOutcome::Incremented(existing.quantity));
        }

        self.entries.push(CartEntry::Item(LineItem::new(product)));
        Ok(AddOutcome::Inserted)
    }

    /// Number of entries. This is what the cart badge shows.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get a line item by product ID.
    pub fn get_item(&self, product_id: &ProductId) -> Option<&LineItem> {
        self.entries.iter().find_map(|entry| match entry {
            CartEntry::Item(item) if &item.product_id == product_id => Some(item),
            _ => None,
        })
    }
}

/// A line item in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Product being purchased.
    pub product_id: ProductId,
    /// Product name (denormalized for display).
    #[serde(default)]
    pub name: String,
    /// Unit price. `NaN` when the card had no readable price; stored as `null`.
    #[serde(default = "nan", deserialize_with = "nullable_price")]
    pub price: f64,
    /// Image URL.
    #[serde(default)]
    pub image: String,
    /// Quantity, at least 1.
    pub quantity: i64,
    /// Whether the item is ticked for checkout.
    #[serde(default)]
    pub selected: bool,
    /// Fields other pages store on the item (`sku`, `specs`, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LineItem {
    /// Create a line item for one unit of `product`.
    pub fn new(product: &CartProduct) -> Self {
        Self {
            product_id: product.product_id.clone(),
            name: product.name.clone(),
            price: product.price,
            image: product.image.clone(),
            quantity: 1,
            selected: true,
            extra: Map::new(),
        }
    }
}

fn nan() -> f64 {
    f64::NAN
}

fn nullable_price<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
}
