//! Tooltip activation.

use crate::dom::{Document, ElementId};
use crate::selector::Selector;

/// Attribute the tooltip text moves to once active.
pub const ORIGINAL_TITLE_ATTR: &str = "data-bs-original-title";

/// Activate every element matching `selector`.
///
/// The `title` attribute moves to `data-bs-original-title` so the native
/// browser tooltip does not show on top of the styled one.
pub fn activate_tooltips(document: &mut Document, selector: &Selector) -> Vec<ElementId> {
    let targets = document.query_selector_all(selector);
    for id in &targets {
        if let Some(element) = document.element_mut(*id) {
            let title = element.remove_attr("title").unwrap_or_default();
            element.set_attr(ORIGINAL_TITLE_ATTR, title);
        }
    }
    targets
}
