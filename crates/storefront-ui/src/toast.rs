//! Toast notifications.
//!
//! Toasts live in a single fixed container at the bottom-right of the
//! viewport. Each one shows immediately, hides itself after the configured
//! delay, and is removed from the document when its `hidden` event fires.

use std::time::Duration;

use crate::dom::{El, ElementId};
use crate::events::{Action, EventKind, ListenerTarget};
use crate::page::Page;
use crate::scheduler::Task;

/// Class that marks the container.
pub const CONTAINER_CLASS: &str = "toast-container";

/// Full class list of a freshly created container.
pub const CONTAINER_CLASSES: &str = "toast-container position-fixed bottom-0 end-0 p-3";

/// Class of a toast element.
pub const TOAST_CLASS: &str = "toast";

/// Class present while a toast is visible.
pub const SHOW_CLASS: &str = "show";

/// Show `message` as a toast that hides after `delay`. Returns the toast.
pub fn show_toast(page: &mut Page, message: &str, delay: Duration) -> ElementId {
    let container = ensure_container(page);
    let id = unique_toast_id(page);

    let toast = page.document.insert(
        container,
        El::new("div")
            .id(&id)
            .class(TOAST_CLASS)
            .attr("role", "alert")
            .attr("aria-live", "assertive")
            .attr("aria-atomic", "true")
            .child(El::new("div").class("toast-body").text(message)),
    );
    if let Some(element) = page.document.element_mut(toast) {
        element.add_class(SHOW_CLASS);
    }

    page.listeners
        .add_listener(ListenerTarget::Element(toast), EventKind::Hidden, Action::RemoveToast);
    page.scheduler.schedule(delay, Task::HideToast(toast));

    tracing::debug!(toast_id = %id, message, "toast shown");
    toast
}

/// Hide a toast. Returns `false` if it is gone or already hidden, in which
/// case no `hidden` event should fire.
pub fn hide_toast(page: &mut Page, toast: ElementId) -> bool {
    match page.document.element_mut(toast) {
        Some(element) if element.has_class(SHOW_CLASS) => {
            element.remove_class(SHOW_CLASS);
            true
        }
        _ => false,
    }
}

/// Remove a hidden toast and its listeners.
pub fn remove_toast(page: &mut Page, toast: ElementId) {
    page.listeners.remove_listeners_for(toast);
    page.document.remove(toast);
}

fn ensure_container(page: &mut Page) -> ElementId {
    if let Some(container) = page.document.find_first(|e| e.has_class(CONTAINER_CLASS)) {
        return container;
    }
    let body = page.document.body();
    page.document
        .insert(body, El::new("div").class(CONTAINER_CLASSES))
}

/// `toast-<epoch ms>`, with a `-<n>` suffix if that id is taken.
fn unique_toast_id(page: &Page) -> String {
    let base = format!("toast-{}", page.scheduler.timestamp_ms());
    if page.document.get_element_by_id(&base).is_none() {
        return base;
    }
    let mut n = 1;
    loop {
        let candidate = format!("{}-{}", base, n);
        if page.document.get_element_by_id(&candidate).is_none() {
            return candidate;
        }
        n += 1;
    }
}
