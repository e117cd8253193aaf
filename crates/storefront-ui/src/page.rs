//! Mutable page state shared by every handler.

use crate::dom::Document;
use crate::events::EventRegistry;
use crate::scheduler::Scheduler;

/// Document, listener table and timers of one loaded page.
#[derive(Debug, Clone, Default)]
pub struct Page {
    pub document: Document,
    pub listeners: EventRegistry,
    pub scheduler: Scheduler,
}

impl Page {
    /// Wrap a rendered document with an empty listener table and a
    /// wall-clock scheduler.
    pub fn new(document: Document) -> Self {
        Self::with_scheduler(document, Scheduler::new())
    }

    pub fn with_scheduler(document: Document, scheduler: Scheduler) -> Self {
        Self {
            document,
            listeners: EventRegistry::new(),
            scheduler,
        }
    }
}
