//! Page configuration.
//!
//! Every value has a default matching the storefront's markup, so an empty
//! config file (or none at all) is valid.

use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use storefront_auth::SessionKeys;
use storefront_commerce::{CART_KEY, DEFAULT_CURRENCY_PREFIX};

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorefrontConfig {
    /// Local storage keys.
    pub storage: StorageConfig,
    /// Markup contract.
    pub selectors: SelectorConfig,
    /// Navigation targets.
    pub routes: RouteConfig,
    /// Timers.
    pub timing: TimingConfig,
    /// Toast texts.
    pub messages: MessageConfig,
    /// Prefix stripped from displayed prices.
    pub currency_prefix: CurrencyPrefix,
}

impl StorefrontConfig {
    /// Load config from a file. `.json` files are read as JSON, anything else
    /// as TOML.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }
}

/// Local storage keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    #[serde(flatten)]
    pub session: SessionKeys,
    pub cart: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            session: SessionKeys::default(),
            cart: CART_KEY.to_string(),
        }
    }
}

/// Selectors the page markup must satisfy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    /// Shown only when logged out.
    pub logged_out_items: String,
    /// Shown only when logged in.
    pub logged_in_items: String,
    pub user_menu_button: String,
    pub cart_count: String,
    pub add_to_cart: String,
    pub add_to_favorite: String,
    pub logout_button: String,
    pub product_card: String,
    pub product_name: String,
    pub current_price: String,
    pub product_image: String,
    /// Clicks inside these never open the product page.
    pub card_controls: String,
    pub tooltip: String,
    /// Attribute on the product card holding its id.
    pub product_id_attribute: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            logged_out_items: ".login-item, .register-item".to_string(),
            logged_in_items: ".logged-in-item".to_string(),
            user_menu_button: "#userMenuButton".to_string(),
            cart_count: "#cartCount".to_string(),
            add_to_cart: ".add-to-cart".to_string(),
            add_to_favorite: ".add-to-favorite".to_string(),
            logout_button: "#logoutButton".to_string(),
            product_card: ".product-card".to_string(),
            product_name: ".product-name".to_string(),
            current_price: ".current-price".to_string(),
            product_image: "img".to_string(),
            card_controls: "button".to_string(),
            tooltip: "[data-bs-toggle=\"tooltip\"]".to_string(),
            product_id_attribute: "data-product-id".to_string(),
        }
    }
}

/// Navigation targets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteConfig {
    pub home: String,
    pub login: String,
    /// Product id is appended to this.
    pub product_prefix: String,
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            home: "/".to_string(),
            login: "/login".to_string(),
            product_prefix: "/product/".to_string(),
        }
    }
}

/// Timer delays, in milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub toast_delay_ms: u64,
    pub logout_redirect_delay_ms: u64,
}

impl TimingConfig {
    pub fn toast_delay(&self) -> Duration {
        Duration::from_millis(self.toast_delay_ms)
    }

    pub fn logout_redirect_delay(&self) -> Duration {
        Duration::from_millis(self.logout_redirect_delay_ms)
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            toast_delay_ms: 2000,
            logout_redirect_delay_ms: 1000,
        }
    }
}

/// Toast texts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageConfig {
    pub added_to_cart: String,
    pub added_to_favorites: String,
    pub removed_from_favorites: String,
    pub logged_out: String,
}

impl Default for MessageConfig {
    fn default() -> Self {
        Self {
            added_to_cart: "Added to cart".to_string(),
            added_to_favorites: "Added to favorites".to_string(),
            removed_from_favorites: "Removed from favorites".to_string(),
            logged_out: "Logged out".to_string(),
        }
    }
}

/// Currency prefix, `¥` unless configured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurrencyPrefix(pub String);

impl Default for CurrencyPrefix {
    fn default() -> Self {
        Self(DEFAULT_CURRENCY_PREFIX.to_string())
    }
}

impl CurrencyPrefix {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
