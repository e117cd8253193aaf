//! Event listener table and propagation.
//!
//! Listeners are rows of (target, event kind, action). Actions are plain
//! values; the page controller decides what each one does. Dispatch walks
//! from the event target up to the body, then to document-level listeners,
//! stopping early if a handler calls [`Event::stop_propagation`].

use crate::dom::{Document, ElementId};

/// Kinds of events the page listens for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// A click.
    Click,
    /// A toast finished hiding.
    Hidden,
}

/// Where a listener is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerTarget {
    Element(ElementId),
    Document,
}

/// What a listener does when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Add the enclosing product card to the cart.
    AddToCart,
    /// Toggle the favorite button.
    ToggleFavorite,
    /// Clear the session and go home.
    Logout,
    /// Delegated: open the product page for a clicked card.
    OpenProductCard,
    /// Remove the toast that fired `hidden`.
    RemoveToast,
}

/// An event being dispatched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub kind: EventKind,
    /// Element the event was fired at.
    pub target: ElementId,
    /// Where the listener currently running is attached.
    pub current_target: ListenerTarget,
    default_prevented: bool,
    propagation_stopped: bool,
}

impl Event {
    pub fn new(kind: EventKind, target: ElementId) -> Self {
        Self {
            kind,
            target,
            current_target: ListenerTarget::Element(target),
            default_prevented: false,
            propagation_stopped: false,
        }
    }

    /// Suppress the default browser behavior (link navigation).
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// Stop the event from reaching listeners further up.
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    pub fn propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }

    /// The element whose listener is running, if not the document.
    pub fn current_element(&self) -> Option<ElementId> {
        match self.current_target {
            ListenerTarget::Element(id) => Some(id),
            ListenerTarget::Document => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Listener {
    target: ListenerTarget,
    kind: EventKind,
    action: Action,
}

/// The listener table.
#[derive(Debug, Clone, Default)]
pub struct EventRegistry {
    listeners: Vec<Listener>,
}

impl EventRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener. Registering the same row twice makes it fire
    /// twice, as `addEventListener` with distinct closures would.
    pub fn add_listener(&mut self, target: ListenerTarget, kind: EventKind, action: Action) {
        self.listeners.push(Listener {
            target,
            kind,
            action,
        });
    }

    /// Drop every listener attached to `element`.
    pub fn remove_listeners_for(&mut self, element: ElementId) {
        self.listeners
            .retain(|l| l.target != ListenerTarget::Element(element));
    }

    /// Actions registered on `target` for `kind`, in registration order.
    pub fn actions_for(&self, target: ListenerTarget, kind: EventKind) -> Vec<Action> {
        self.listeners
            .iter()
            .filter(|l| l.target == target && l.kind == kind)
            .map(|l| l.action)
            .collect()
    }

    /// Number of listeners registered for `action`.
    pub fn count(&self, action: Action) -> usize {
        self.listeners.iter().filter(|l| l.action == action).count()
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

/// Targets an event fired at `target` visits, in order: the target, its
/// ancestors, then the document. Empty if `target` is not attached.
pub fn propagation_path(document: &Document, target: ElementId) -> Vec<ListenerTarget> {
    if !document.is_attached(target) {
        return Vec::new();
    }
    let mut path: Vec<ListenerTarget> = document
        .ancestors_inclusive(target)
        .into_iter()
        .map(ListenerTarget::Element)
        .collect();
    path.push(ListenerTarget::Document);
    path
}
