//! Favorite button toggle.
//!
//! The toggle is visual only. Saving favorites server-side is not built yet;
//! [`FavoriteSync`] is the seam where it will plug in, and the page ships
//! with [`NoopFavoriteSync`].

use storefront_commerce::ProductId;

use crate::dom::{Document, El, ElementId};
use crate::UiError;

/// Button class when not a favorite.
pub const UNSELECTED_CLASS: &str = "btn-outline-danger";
/// Button class when a favorite.
pub const SELECTED_CLASS: &str = "btn-danger";
/// Icon when not a favorite.
pub const UNSELECTED_ICON: &str = "bi bi-heart";
/// Icon when a favorite.
pub const SELECTED_ICON: &str = "bi bi-heart-fill";

/// Favorite state after a toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavoriteState {
    Added,
    Removed,
}

/// Receives favorite changes.
pub trait FavoriteSync {
    fn favorite_changed(
        &mut self,
        product_id: &ProductId,
        state: FavoriteState,
    ) -> Result<(), UiError>;
}

/// Does nothing; favorites reset on reload.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopFavoriteSync;

impl FavoriteSync for NoopFavoriteSync {
    fn favorite_changed(&mut self, _: &ProductId, _: FavoriteState) -> Result<(), UiError> {
        Ok(())
    }
}

/// Flip the button's classes and icon. Returns the new state, or `None` if
/// the button is gone.
pub fn toggle_favorite_button(document: &mut Document, button: ElementId) -> Option<FavoriteState> {
    let element = document.element_mut(button)?;
    element.toggle_class(UNSELECTED_CLASS);
    let state = if element.toggle_class(SELECTED_CLASS) {
        FavoriteState::Added
    } else {
        FavoriteState::Removed
    };

    let icon = match state {
        FavoriteState::Added => SELECTED_ICON,
        FavoriteState::Removed => UNSELECTED_ICON,
    };
    document.clear_children(button);
    document.insert(button, El::new("i").class(icon));
    Some(state)
}
