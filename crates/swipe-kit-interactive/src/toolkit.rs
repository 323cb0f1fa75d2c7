//! Host collaborators shared by all widgets on a page

use crate::registry::GestureRegistry;
use std::rc::Rc;
use swipe_kit::{Document, EventHub, RenderSink};

/// Bundle of the element tree, input hub, gesture registry and render sink
///
/// Cloning is cheap; every clone talks to the same page.
#[derive(Clone)]
pub struct Toolkit {
    pub document: Document,
    pub events: EventHub,
    pub gestures: GestureRegistry,
    pub sink: Rc<dyn RenderSink>,
}

impl Toolkit {
    /// Toolkit whose document also serves as the rendering surface
    pub fn new(document: Document) -> Self {
        let events = EventHub::new(document.clone());
        let gestures = GestureRegistry::new(events.clone());
        Self {
            sink: Rc::new(document.clone()),
            document,
            events,
            gestures,
        }
    }

    /// Render to a different surface than the document
    pub fn with_sink(mut self, sink: Rc<dyn RenderSink>) -> Self {
        self.sink = sink;
        self
    }
}

impl std::fmt::Debug for Toolkit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Toolkit")
            .field("events", &self.events)
            .field("gestures", &self.gestures)
            .finish_non_exhaustive()
    }
}
