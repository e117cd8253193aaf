//! The page controller.
//!
//! [`Storefront`] owns the page, the store and the navigator. The host calls
//! [`Storefront::on_page_load`] once the markup is ready, forwards clicks via
//! [`Storefront::click`], and drives timers with [`Storefront::advance`].

use std::time::Duration;

use storefront_auth::Session;
use storefront_cache::{Cache, Store};
use storefront_commerce::{add_to_cart, parse_price, Cart, CartProduct, ProductId};

use crate::binder::{bind_page_events, Bindings};
use crate::config::StorefrontConfig;
use crate::dom::{Document, ElementId};
use crate::events::{propagation_path, Action, Event, EventKind};
use crate::favorite::{toggle_favorite_button, FavoriteState, FavoriteSync, NoopFavoriteSync};
use crate::navigation::{login_redirect_url, product_url, Navigator};
use crate::page::Page;
use crate::scheduler::{Task, TaskHandle};
use crate::selector::{PageSelectors, Selector};
use crate::sync::{sync_cart_badge, sync_login_state};
use crate::tooltip::activate_tooltips;
use crate::toast::{hide_toast, remove_toast, show_toast};
use crate::UiError;

/// Storefront page glue over a store `S` and navigator `N`.
pub struct Storefront<S, N, F = NoopFavoriteSync> {
    config: StorefrontConfig,
    selectors: PageSelectors,
    cache: Cache<S>,
    navigator: N,
    favorites: F,
    page: Page,
    tooltips: Vec<ElementId>,
    pending_redirect: Option<TaskHandle>,
}

impl<S: Store, N: Navigator> Storefront<S, N, NoopFavoriteSync> {
    /// Create the controller. Fails only if a configured selector is invalid.
    pub fn new(page: Page, store: S, navigator: N, config: StorefrontConfig) -> Result<Self, UiError> {
        let selectors = PageSelectors::compile(&config.selectors)?;
        Ok(Self {
            config,
            selectors,
            cache: Cache::new(store),
            navigator,
            favorites: NoopFavoriteSync,
            page,
            tooltips: Vec::new(),
            pending_redirect: None,
        })
    }
}

impl<S: Store, N: Navigator, F: FavoriteSync> Storefront<S, N, F> {
    /// Replace the favorite backend.
    pub fn with_favorite_sync<G: FavoriteSync>(self, favorites: G) -> Storefront<S, N, G> {
        Storefront {
            config: self.config,
            selectors: self.selectors,
            cache: self.cache,
            navigator: self.navigator,
            favorites,
            page: self.page,
            tooltips: self.tooltips,
            pending_redirect: self.pending_redirect,
        }
    }

    /// Page-load initialization: tooltips, login state, cart badge, then
    /// event binding.
    pub fn on_page_load(&mut self) -> Bindings {
        self.tooltips = activate_tooltips(&mut self.page.document, &self.selectors.tooltip);
        self.sync_login_state();
        self.refresh_cart_badge();
        let bindings = bind_page_events(&mut self.page, &self.selectors);

        tracing::info!(
            tooltips = self.tooltips.len(),
            add_to_cart = bindings.add_to_cart,
            add_to_favorite = bindings.add_to_favorite,
            logout = bindings.logout,
            "storefront page initialized"
        );
        bindings
    }

    /// Re-read the session and apply login visibility.
    pub fn sync_login_state(&mut self) {
        let session = Session::load(&self.cache, &self.config.storage.session);
        sync_login_state(&mut self.page.document, &self.selectors, &session);
    }

    /// Re-read the cart and update the badge.
    pub fn refresh_cart_badge(&mut self) {
        let cart = Cart::load(&self.cache, &self.config.storage.cart);
        sync_cart_badge(&mut self.page.document, &self.selectors, cart.len());
    }

    /// Show a toast with the configured delay.
    pub fn show_toast(&mut self, message: &str) -> ElementId {
        show_toast(&mut self.page, message, self.config.timing.toast_delay())
    }

    /// Fire a click at `target`. Returns the event after dispatch.
    pub fn click(&mut self, target: ElementId) -> Event {
        self.dispatch(Event::new(EventKind::Click, target))
    }

    /// Dispatch `event` through its target, the target's ancestors and the
    /// document, honoring `stop_propagation`.
    pub fn dispatch(&mut self, mut event: Event) -> Event {
        for target in propagation_path(&self.page.document, event.target) {
            event.current_target = target;
            for action in self.page.listeners.actions_for(target, event.kind) {
                self.run_action(action, &mut event);
            }
            if event.propagation_stopped() {
                break;
            }
        }
        event
    }

    /// Advance the clock by `elapsed`, running every timer that comes due.
    pub fn advance(&mut self, elapsed: Duration) {
        let deadline = self.page.scheduler.now() + elapsed;
        while let Some(task) = self.page.scheduler.pop_due(deadline) {
            self.run_task(task);
        }
        self.page.scheduler.set_now(deadline);
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut Page {
        &mut self.page
    }

    pub fn document(&self) -> &Document {
        &self.page.document
    }

    pub fn cache(&self) -> &Cache<S> {
        &self.cache
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    pub fn favorites(&self) -> &F {
        &self.favorites
    }

    pub fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    /// Elements whose tooltips were activated on load.
    pub fn tooltips(&self) -> &[ElementId] {
        &self.tooltips
    }

    /// Timer for the post-logout redirect, while it is still pending.
    pub fn pending_redirect(&self) -> Option<TaskHandle> {
        self.pending_redirect
            .filter(|h| self.page.scheduler.is_pending(*h))
    }

    fn run_action(&mut self, action: Action, event: &mut Event) {
        match action {
            Action::AddToCart => self.handle_add_to_cart(event),
            Action::ToggleFavorite => self.handle_toggle_favorite(event),
            Action::Logout => self.handle_logout(event),
            Action::OpenProductCard => self.handle_open_product_card(event),
            Action::RemoveToast => {
                if let Some(toast) = event.current_element() {
                    remove_toast(&mut self.page, toast);
                }
            }
        }
    }

    fn run_task(&mut self, task: Task) {
        match task {
            Task::Navigate(url) => {
                tracing::info!(url = %url, "navigating");
                self.navigator.assign(&url);
            }
            Task::HideToast(toast) => {
                if hide_toast(&mut self.page, toast) {
                    self.dispatch(Event::new(EventKind::Hidden, toast));
                }
            }
        }
    }

    fn handle_add_to_cart(&mut self, event: &mut Event) {
        event.prevent_default();
        event.stop_propagation();

        let Some(button) = event.current_element() else {
            return;
        };
        let Some(card) = self
            .page
            .document
            .closest(button, &self.selectors.product_card)
        else {
            tracing::warn!(%button, "add-to-cart button outside a product card");
            return;
        };

        let product = self.read_card_product(card);
        if let Err(e) = add_to_cart(&self.cache, &self.config.storage.cart, &product) {
            tracing::warn!(product_id = %product.product_id, error = %e, "cart update failed");
            return;
        }

        self.refresh_cart_badge();
        let message = self.config.messages.added_to_cart.clone();
        self.show_toast(&message);
    }

    fn handle_toggle_favorite(&mut self, event: &mut Event) {
        event.prevent_default();
        event.stop_propagation();

        let Some(button) = event.current_element() else {
            return;
        };
        let Some(card) = self
            .page
            .document
            .closest(button, &self.selectors.product_card)
        else {
            tracing::warn!(%button, "favorite button outside a product card");
            return;
        };
        let product_id = self.card_product_id(card);

        if Session::read_token(&self.cache, &self.config.storage.session).is_none() {
            let url = login_redirect_url(&self.config.routes.login, &self.navigator.href());
            tracing::info!(product_id = %product_id, "favorite needs login");
            self.navigator.assign(&url);
            return;
        }

        let Some(state) = toggle_favorite_button(&mut self.page.document, button) else {
            return;
        };
        let message = match state {
            FavoriteState::Added => self.config.messages.added_to_favorites.clone(),
            FavoriteState::Removed => self.config.messages.removed_from_favorites.clone(),
        };
        self.show_toast(&message);

        if let Err(e) = self.favorites.favorite_changed(&product_id, state) {
            tracing::warn!(product_id = %product_id, error = %e, "favorite sync failed");
        }
    }

    fn handle_logout(&mut self, event: &mut Event) {
        event.prevent_default();

        if let Err(e) = Session::clear(&self.cache, &self.config.storage.session) {
            tracing::warn!(error = %e, "failed to clear session");
        }
        self.sync_login_state();

        let message = self.config.messages.logged_out.clone();
        self.show_toast(&message);

        let home = self.config.routes.home.clone();
        let delay = self.config.timing.logout_redirect_delay();
        self.pending_redirect = Some(self.page.scheduler.schedule(delay, Task::Navigate(home)));
        tracing::info!("logged out");
    }

    fn handle_open_product_card(&mut self, event: &mut Event) {
        let document = &self.page.document;
        let Some(card) = document.closest(event.target, &self.selectors.product_card) else {
            return;
        };
        if document
            .closest(event.target, &self.selectors.card_controls)
            .is_some()
        {
            return;
        }
        let product_id = self.card_product_id(card);
        let url = product_url(&self.config.routes.product_prefix, product_id.as_str());
        tracing::info!(url = %url, "opening product");
        self.navigator.assign(&url);
    }

    fn card_product_id(&self, card: ElementId) -> ProductId {
        let raw = self
            .page
            .document
            .element(card)
            .and_then(|e| e.attr(&self.selectors.product_id_attribute));
        ProductId::or_fallback(raw)
    }

    /// Scrape a card. Missing fields become empty strings and a `NaN` price.
    fn read_card_product(&self, card: ElementId) -> CartProduct {
        let document = &self.page.document;
        let text_of = |selector: &Selector| {
            document
                .query_within(card, selector)
                .map(|el| document.text_content(el))
                .unwrap_or_default()
        };

        let name = text_of(&self.selectors.product_name);
        let price_text = text_of(&self.selectors.current_price);
        let image = document
            .query_within(card, &self.selectors.product_image)
            .and_then(|img| document.element(img))
            .and_then(|img| img.attr("src"))
            .unwrap_or_default()
            .to_string();

        CartProduct {
            product_id: self.card_product_id(card),
            name,
            price: parse_price(&price_text, self.config.currency_prefix.as_str()),
            image,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::El;
    use crate::navigation::History;
    use crate::scheduler::Scheduler;
    use storefront_cache::MemoryStore;

    fn storefront(doc: Document, store: MemoryStore) -> Storefront<MemoryStore, History> {
        Storefront::new(
            Page::with_scheduler(doc, Scheduler::with_epoch(0)),
            store,
            History::new("https://shop.example/"),
            StorefrontConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_bad_selector_config_fails() {
        let mut config = StorefrontConfig::default();
        config.selectors.product_card = "div.card".to_string();
        let result = Storefront::new(
            Page::new(Document::new()),
            MemoryStore::new(),
            History::new("/"),
            config,
        );
        assert!(matches!(result, Err(UiError::InvalidSelector(_))));
    }

    #[test]
    fn test_card_without_fields_gives_nan_and_empty() {
        let mut doc = Document::new();
        let body = doc.body();
        let card = doc.insert(
            body,
            El::new("div")
                .class("product-card")
                .child(El::new("button").class("add-to-cart")),
        );
        let page = storefront(doc, MemoryStore::new());

        let product = page.read_card_product(card);
        assert_eq!(product.product_id.as_str(), "1");
        assert_eq!(product.name, "");
        assert_eq!(product.image, "");
        assert!(product.price.is_nan());
    }

    #[test]
    fn test_add_to_cart_outside_card_is_ignored() {
        let mut doc = Document::new();
        let body = doc.body();
        let button = doc.insert(body, El::new("button").class("add-to-cart"));
        let store = MemoryStore::new();
        let mut page = storefront(doc, store.clone());
        page.on_page_load();

        let event = page.click(button);
        assert!(event.default_prevented());
        assert!(!store.contains("cart"));
    }

    #[test]
    fn test_hidden_toast_is_removed_after_delay() {
        let mut page = storefront(Document::new(), MemoryStore::new());
        let toast = page.show_toast("hello");

        page.advance(Duration::from_millis(1999));
        assert!(page.document().element(toast).is_some());

        page.advance(Duration::from_millis(1));
        assert!(page.document().element(toast).is_none());
        assert!(page.page().listeners.is_empty());
    }

    #[derive(Default)]
    struct RecordingSync(Vec<(ProductId, FavoriteState)>);

    impl FavoriteSync for RecordingSync {
        fn favorite_changed(
            &mut self,
            product_id: &ProductId,
            state: FavoriteState,
        ) -> Result<(), UiError> {
            self.0.push((product_id.clone(), state));
            Ok(())
        }
    }

    #[test]
    fn test_favorite_sync_receives_changes() {
        let mut doc = Document::new();
        let body = doc.body();
        doc.insert(
            body,
            El::new("div")
                .class("product-card")
                .attr("data-product-id", "9")
                .child(El::new("button").class("btn btn-outline-danger add-to-favorite")),
        );
        let store = MemoryStore::with_entries([("token", "t")]);
        let mut page = storefront(doc, store).with_favorite_sync(RecordingSync::default());
        page.on_page_load();

        let button = page
            .document()
            .query_selector(&".add-to-favorite".parse().unwrap())
            .unwrap();
        page.click(button);
        page.click(button);

        assert_eq!(
            page.favorites().0,
            vec![
                (ProductId::new("9"), FavoriteState::Added),
                (ProductId::new("9"), FavoriteState::Removed),
            ]
        );
    }
}
