//! Page glue for the storefront.
//!
//! Runs the behavior of a server-rendered storefront page against abstract
//! browser facilities so it can be driven from tests as easily as from a
//! real page:
//!
//! - [`dom::Document`] stands in for the DOM,
//! - [`storefront_cache::Store`] for `localStorage`,
//! - [`events::EventRegistry`] for `addEventListener`,
//! - [`scheduler::Scheduler`] for `setTimeout` and hide transitions,
//! - [`navigation::Navigator`] for `window.location`.
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use storefront_cache::MemoryStore;
//! use storefront_ui::prelude::*;
//!
//! let mut doc = Document::new();
//! let body = doc.body();
//! doc.insert(body, El::new("span").id("cartCount"));
//! let card = doc.insert(
//!     body,
//!     El::new("div")
//!         .class("product-card")
//!         .attr("data-product-id", "42")
//!         .child(El::new("h5").class("product-name").text("Shoe"))
//!         .child(El::new("span").class("current-price").text("¥99.50"))
//!         .child(El::new("button").class("add-to-cart")),
//! );
//!
//! let mut page = Storefront::new(
//!     Page::new(doc),
//!     MemoryStore::new(),
//!     History::new("https://shop.example/"),
//!     StorefrontConfig::default(),
//! )
//! .unwrap();
//! page.on_page_load();
//!
//! let button = page.document().query_within(card, &"button".parse().unwrap()).unwrap();
//! page.click(button);
//! page.advance(Duration::from_secs(3));
//!
//! let badge = page.document().get_element_by_id("cartCount").unwrap();
//! assert_eq!(page.document().text_content(badge), "1");
//! ```

pub mod binder;
pub mod config;
pub mod dom;
mod error;
pub mod events;
pub mod favorite;
pub mod navigation;
pub mod page;
pub mod scheduler;
pub mod selector;
mod storefront;
pub mod sync;
pub mod toast;
pub mod tooltip;

pub use config::StorefrontConfig;
pub use error::UiError;
pub use storefront::Storefront;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::binder::Bindings;
    pub use crate::config::StorefrontConfig;
    pub use crate::dom::{Display, Document, El, ElementId};
    pub use crate::events::{Action, Event, EventKind, ListenerTarget};
    pub use crate::favorite::{FavoriteState, FavoriteSync, NoopFavoriteSync};
    #[cfg(target_arch = "wasm32")]
    pub use crate::navigation::BrowserNavigator;
    pub use crate::navigation::{History, Navigator};
    pub use crate::page::Page;
    pub use crate::scheduler::{Scheduler, Task, TaskHandle};
    pub use crate::selector::Selector;
    pub use crate::storefront::Storefront;
    pub use crate::UiError;
}
