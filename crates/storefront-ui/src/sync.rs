//! Applies stored session and cart state to the page.

use storefront_auth::Session;

use crate::dom::{Display, Document, El};
use crate::selector::{PageSelectors, Selector};

/// Icon shown before the user's name in the account menu.
pub const USER_ICON_CLASSES: &str = "bi bi-person-circle";

/// Show or hide the login-dependent navigation and fill in the user's name.
///
/// A profile without a non-empty nickname leaves the account menu as it is.
pub fn sync_login_state(document: &mut Document, selectors: &PageSelectors, session: &Session) {
    let logged_in = session.is_logged_in();
    let (out_display, in_display) = if logged_in {
        (Display::None, Display::Block)
    } else {
        (Display::Block, Display::None)
    };

    set_display_all(document, &selectors.logged_out_items, out_display);
    set_display_all(document, &selectors.logged_in_items, in_display);

    if !logged_in {
        return;
    }
    let Some(name) = session.display_name() else {
        return;
    };
    match document.query_selector(&selectors.user_menu_button) {
        Some(button) => {
            document.clear_children(button);
            document.insert(button, El::new("i").class(USER_ICON_CLASSES));
            document.append_text(button, &format!(" {}", name));
        }
        None => tracing::debug!(
            selector = %selectors.user_menu_button,
            "no account menu button on page"
        ),
    }
}

/// Show the number of cart line items on the badge, hiding it at zero.
///
/// Returns `false` if the page has no badge.
pub fn sync_cart_badge(document: &mut Document, selectors: &PageSelectors, count: usize) -> bool {
    let Some(badge) = document.query_selector(&selectors.cart_count) else {
        return false;
    };
    document.set_text(badge, &count.to_string());
    if let Some(element) = document.element_mut(badge) {
        element.set_display(if count == 0 {
            Display::None
        } else {
            Display::InlineBlock
        });
    }
    true
}

fn set_display_all(document: &mut Document, selector: &Selector, display: Display) {
    for id in document.query_selector_all(selector) {
        if let Some(element) = document.element_mut(id) {
            element.set_display(display);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SelectorConfig;
    use storefront_auth::{AuthToken, UserInfo};

    fn selectors() -> PageSelectors {
        PageSelectors::compile(&SelectorConfig::default()).unwrap()
    }

    fn nav_page() -> Document {
        let mut doc = Document::new();
        let body = doc.body();
        doc.insert(
            body,
            El::new("ul")
                .child(El::new("li").class("nav-item login-item"))
                .child(El::new("li").class("nav-item register-item"))
                .child(
                    El::new("li")
                        .class("nav-item logged-in-item")
                        .child(El::new("button").id("userMenuButton").text("Account")),
                )
                .child(El::new("span").id("cartCount").text("0")),
        );
        doc
    }

    fn display_of(doc: &Document, selector: &str) -> Vec<Option<Display>> {
        doc.query_selector_all(&selector.parse().unwrap())
            .into_iter()
            .map(|id| doc.element(id).unwrap().display())
            .collect()
    }

    #[test]
    fn test_logged_out() {
        let mut doc = nav_page();
        sync_login_state(&mut doc, &selectors(), &Session::default());

        assert_eq!(
            display_of(&doc, ".login-item, .register-item"),
            vec![Some(Display::Block), Some(Display::Block)]
        );
        assert_eq!(display_of(&doc, ".logged-in-item"), vec![Some(Display::None)]);
    }

    #[test]
    fn test_logged_in_with_nickname() {
        let mut doc = nav_page();
        let session = Session::authenticated(
            AuthToken::parse("t").unwrap(),
            UserInfo::with_nickname("Ana"),
        );
        sync_login_state(&mut doc, &selectors(), &session);

        assert_eq!(
            display_of(&doc, ".login-item, .register-item"),
            vec![Some(Display::None), Some(Display::None)]
        );
        assert_eq!(display_of(&doc, ".logged-in-item"), vec![Some(Display::Block)]);

        let button = doc.get_element_by_id("userMenuButton").unwrap();
        assert_eq!(doc.text_content(button), " Ana");
        let icon = doc.query_within(button, &"i".parse().unwrap()).unwrap();
        assert!(doc.element(icon).unwrap().has_class("bi-person-circle"));
    }

    #[test]
    fn test_logged_in_without_nickname_keeps_menu() {
        let mut doc = nav_page();
        let session = Session::authenticated(AuthToken::parse("t").unwrap(), UserInfo::default());
        sync_login_state(&mut doc, &selectors(), &session);

        let button = doc.get_element_by_id("userMenuButton").unwrap();
        assert_eq!(doc.text_content(button), "Account");
    }

    #[test]
    fn test_badge() {
        let mut doc = nav_page();
        let selectors = selectors();
        let badge = doc.get_element_by_id("cartCount").unwrap();

        assert!(sync_cart_badge(&mut doc, &selectors, 0));
        assert!(doc.element(badge).unwrap().is_hidden());
        assert_eq!(doc.text_content(badge), "0");

        assert!(sync_cart_badge(&mut doc, &selectors, 3));
        assert_eq!(doc.element(badge).unwrap().display(), Some(Display::InlineBlock));
        assert_eq!(doc.text_content(badge), "3");
    }

    #[test]
    fn test_badge_missing() {
        let mut doc = Document::new();
        assert!(!sync_cart_badge(&mut doc, &selectors(), 1));
    }
}
