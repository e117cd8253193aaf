//! Minimal CSS selectors: `tag`, `#id`, `.class`, `[attr]`, `[attr="value"]`,
//! and comma-separated lists of those.

use std::fmt;
use std::str::FromStr;

use crate::config::SelectorConfig;
use crate::dom::Element;
use crate::UiError;

/// One simple selector.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Simple {
    Tag(String),
    Id(String),
    Class(String),
    Attr { name: String, value: Option<String> },
}

impl Simple {
    fn parse(text: &str) -> Result<Self, UiError> {
        let invalid = || UiError::InvalidSelector(text.to_string());

        if let Some(id) = text.strip_prefix('#') {
            return valid_ident(id).map(|_| Simple::Id(id.to_string())).ok_or_else(invalid);
        }
        if let Some(class) = text.strip_prefix('.') {
            return valid_ident(class)
                .map(|_| Simple::Class(class.to_string()))
                .ok_or_else(invalid);
        }
        if let Some(body) = text.strip_prefix('[').and_then(|t| t.strip_suffix(']')) {
            return match body.split_once('=') {
                Some((name, value)) => {
                    let name = name.trim();
                    let value = value.trim();
                    let value = value
                        .strip_prefix('"')
                        .and_then(|v| v.strip_suffix('"'))
                        .or_else(|| value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')))
                        .unwrap_or(value);
                    valid_ident(name).ok_or_else(invalid)?;
                    Ok(Simple::Attr {
                        name: name.to_string(),
                        value: Some(value.to_string()),
                    })
                }
                None => {
                    let name = body.trim();
                    valid_ident(name).ok_or_else(invalid)?;
                    Ok(Simple::Attr {
                        name: name.to_string(),
                        value: None,
                    })
                }
            };
        }
        valid_ident(text)
            .map(|_| Simple::Tag(text.to_ascii_lowercase()))
            .ok_or_else(invalid)
    }

    fn matches(&self, element: &Element) -> bool {
        match self {
            Simple::Tag(tag) => element.tag() == tag,
            Simple::Id(id) => element.id() == Some(id.as_str()),
            Simple::Class(class) => element.has_class(class),
            Simple::Attr { name, value } => match (element.attr(name), value) {
                (Some(actual), Some(expected)) => actual == expected,
                (Some(_), None) => true,
                (None, _) => false,
            },
        }
    }
}

fn valid_ident(s: &str) -> Option<()> {
    let ok = !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    ok.then_some(())
}

/// A selector list; an element matches if any alternative matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    source: String,
    alternatives: Vec<Simple>,
}

impl Selector {
    /// Parse a selector such as `".login-item, .register-item"`.
    pub fn parse(text: &str) -> Result<Self, UiError> {
        let alternatives = text
            .split(',')
            .map(|part| Simple::parse(part.trim()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            source: text.to_string(),
            alternatives,
        })
    }

    /// Check whether `element` matches.
    pub fn matches(&self, element: &Element) -> bool {
        self.alternatives.iter().any(|s| s.matches(element))
    }

    /// The selector text as written.
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl FromStr for Selector {
    type Err = UiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// The configured selectors, parsed once.
#[derive(Debug, Clone)]
pub struct PageSelectors {
    pub logged_out_items: Selector,
    pub logged_in_items: Selector,
    pub user_menu_button: Selector,
    pub cart_count: Selector,
    pub add_to_cart: Selector,
    pub add_to_favorite: Selector,
    pub logout_button: Selector,
    pub product_card: Selector,
    pub product_name: Selector,
    pub current_price: Selector,
    pub product_image: Selector,
    pub card_controls: Selector,
    pub tooltip: Selector,
    pub product_id_attribute: String,
}

impl PageSelectors {
    pub fn compile(config: &SelectorConfig) -> Result<Self, UiError> {
        Ok(Self {
            logged_out_items: config.logged_out_items.parse()?,
            logged_in_items: config.logged_in_items.parse()?,
            user_menu_button: config.user_menu_button.parse()?,
            cart_count: config.cart_count.parse()?,
            add_to_cart: config.add_to_cart.parse()?,
            add_to_favorite: config.add_to_favorite.parse()?,
            logout_button: config.logout_button.parse()?,
            product_card: config.product_card.parse()?,
            product_name: config.product_name.parse()?,
            current_price: config.current_price.parse()?,
            product_image: config.product_image.parse()?,
            card_controls: config.card_controls.parse()?,
            tooltip: config.tooltip.parse()?,
            product_id_attribute: config.product_id_attribute.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{Document, El};

    #[test]
    fn test_parse_kinds() {
        assert!(Selector::parse(".add-to-cart").is_ok());
        assert!(Selector::parse("#cartCount").is_ok());
        assert!(Selector::parse("img").is_ok());
        assert!(Selector::parse("[data-bs-toggle=\"tooltip\"]").is_ok());
        assert!(Selector::parse("[data-product-id]").is_ok());
        assert!(Selector::parse(".login-item, .register-item").is_ok());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Selector::parse("").is_err());
        assert!(Selector::parse(".").is_err());
        assert!(Selector::parse("div > p").is_err());
        assert!(Selector::parse(".a,").is_err());
    }

    #[test]
    fn test_matching() {
        let mut doc = Document::new();
        let body = doc.body();
        let el = doc.insert(
            body,
            El::new("BUTTON")
                .id("go")
                .class("btn")
                .class("add-to-cart")
                .attr("data-bs-toggle", "tooltip"),
        );
        let element = doc.element(el).unwrap();

        assert!(Selector::parse("button").unwrap().matches(element));
        assert!(Selector::parse("#go").unwrap().matches(element));
        assert!(Selector::parse(".add-to-cart").unwrap().matches(element));
        assert!(Selector::parse("[data-bs-toggle='tooltip']").unwrap().matches(element));
        assert!(Selector::parse("[data-bs-toggle]").unwrap().matches(element));
        assert!(!Selector::parse("[data-bs-toggle=popover]").unwrap().matches(element));
        assert!(Selector::parse(".nope, .btn").unwrap().matches(element));
        assert!(!Selector::parse("#other").unwrap().matches(element));
    }

    #[test]
    fn test_default_page_selectors_compile() {
        let selectors = PageSelectors::compile(&SelectorConfig::default()).unwrap();
        assert_eq!(selectors.product_id_attribute, "data-product-id");
        assert_eq!(selectors.logged_out_items.as_str(), ".login-item, .register-item");
    }

    #[test]
    fn test_bad_configured_selector_is_rejected() {
        let config = SelectorConfig {
            cart_count: "#cart count".to_string(),
            ..SelectorConfig::default()
        };
        assert!(matches!(
            PageSelectors::compile(&config),
            Err(UiError::InvalidSelector(_))
        ));
    }
}
