//! Attaches the page's click listeners.

use crate::events::{Action, EventKind, ListenerTarget};
use crate::page::Page;
use crate::selector::PageSelectors;

/// What got bound.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Bindings {
    pub add_to_cart: usize,
    pub add_to_favorite: usize,
    pub logout: bool,
}

/// Bind every listener the page uses.
///
/// Meant to run once per page load; running it again binds everything a
/// second time.
pub fn bind_page_events(page: &mut Page, selectors: &PageSelectors) -> Bindings {
    let mut bindings = Bindings::default();

    for button in page.document.query_selector_all(&selectors.add_to_cart) {
        page.listeners
            .add_listener(ListenerTarget::Element(button), EventKind::Click, Action::AddToCart);
        bindings.add_to_cart += 1;
    }

    for button in page.document.query_selector_all(&selectors.add_to_favorite) {
        page.listeners.add_listener(
            ListenerTarget::Element(button),
            EventKind::Click,
            Action::ToggleFavorite,
        );
        bindings.add_to_favorite += 1;
    }

    if let Some(button) = page.document.query_selector(&selectors.logout_button) {
        page.listeners
            .add_listener(ListenerTarget::Element(button), EventKind::Click, Action::Logout);
        bindings.logout = true;
    }

    page.listeners
        .add_listener(ListenerTarget::Document, EventKind::Click, Action::OpenProductCard);

    tracing::debug!(?bindings, "page events bound");
    bindings
}
