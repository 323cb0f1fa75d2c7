//! Listener registry and event dispatch
//!
//! [`EventHub`] is the subscription surface the widgets attach to. Listeners
//! can be bound directly to an element, delegated through a stable ancestor
//! filtered by a [`Selector`], or bound to the window. Dispatch bubbles from
//! the event target up to the root, the way a browser delivers events.

use crate::document::{Document, ElementId, Selector};
use crate::input::{EventKind, InputEvent};
use std::cell::RefCell;
use std::rc::Rc;

/// Event handler callback
pub type Handler = Rc<dyn Fn(&mut InputEvent)>;

/// Identity of a registered listener, used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

/// Where a listener is attached
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ListenTarget {
    /// Window-level events (resize), plus anything bubbling past the root
    Window,
    /// The element itself or anything inside it
    Element(ElementId),
    /// Descendants of `root` matching `selector`, including ones added later
    Delegate { root: ElementId, selector: Selector },
}

struct Listener {
    id: ListenerId,
    target: ListenTarget,
    kind: EventKind,
    handler: Handler,
}

#[derive(Default)]
struct HubInner {
    listeners: Vec<Listener>,
    next_id: u64,
}

/// Shared listener registry bound to one [`Document`]
#[derive(Clone)]
pub struct EventHub {
    document: Document,
    inner: Rc<RefCell<HubInner>>,
}

impl std::fmt::Debug for EventHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventHub")
            .field("listeners", &self.len())
            .finish()
    }
}

impl EventHub {
    /// Create a hub delivering events within `document`
    pub fn new(document: Document) -> Self {
        Self {
            document,
            inner: Rc::new(RefCell::new(HubInner::default())),
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Register a handler; every call adds a new listener
    pub fn on(
        &self,
        target: ListenTarget,
        kind: EventKind,
        handler: impl Fn(&mut InputEvent) + 'static,
    ) -> ListenerId {
        let mut inner = self.inner.borrow_mut();
        let id = ListenerId(inner.next_id);
        inner.next_id += 1;
        log::trace!("listener {:?} on {:?} for {:?}", id, target, kind);
        inner.listeners.push(Listener {
            id,
            target,
            kind,
            handler: Rc::new(handler),
        });
        id
    }

    /// Remove a listener; returns false if it was not registered
    pub fn off(&self, id: ListenerId) -> bool {
        let mut inner = self.inner.borrow_mut();
        let before = inner.listeners.len();
        inner.listeners.retain(|l| l.id != id);
        before != inner.listeners.len()
    }

    pub fn is_registered(&self, id: ListenerId) -> bool {
        self.inner.borrow().listeners.iter().any(|l| l.id == id)
    }

    /// Number of listeners attached to `target`, across all event kinds
    pub fn listener_count(&self, target: &ListenTarget) -> usize {
        self.inner
            .borrow()
            .listeners
            .iter()
            .filter(|l| &l.target == target)
            .count()
    }

    /// Total number of registered listeners
    pub fn len(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Deliver an event to every matching listener
    ///
    /// Handlers run in bubbling order: for each element from the target up to
    /// the root, delegated listeners rooted there run first, then direct
    /// listeners. Window listeners run last. Returns the event so the caller
    /// can inspect `is_default_prevented`.
    pub fn dispatch(&self, mut event: InputEvent) -> InputEvent {
        let queue = self.collect(&event);

        for (id, current_target, handler) in queue {
            // A handler earlier in this dispatch may have unsubscribed this one
            if !self.is_registered(id) {
                continue;
            }
            event.current_target = current_target;
            handler(&mut event);
        }

        event.current_target = None;
        event
    }

    fn collect(&self, event: &InputEvent) -> Vec<(ListenerId, Option<ElementId>, Handler)> {
        let inner = self.inner.borrow();
        let mut queue = Vec::new();

        let path = match event.target {
            Some(target) if event.kind != EventKind::Resize => {
                self.document.path_to_root(target)
            }
            _ => Vec::new(),
        };

        for (depth, node) in path.iter().enumerate() {
            for listener in inner.listeners.iter().filter(|l| l.kind == event.kind) {
                let ListenTarget::Delegate { root, selector } = &listener.target else {
                    continue;
                };
                if root != node {
                    continue;
                }
                // Closest matching element strictly below the delegate root
                if let Some(matched) = path[..depth]
                    .iter()
                    .find(|el| self.document.matches(**el, selector))
                {
                    queue.push((listener.id, Some(*matched), listener.handler.clone()));
                }
            }

            for listener in inner.listeners.iter().filter(|l| l.kind == event.kind) {
                if listener.target == ListenTarget::Element(*node) {
                    queue.push((listener.id, Some(*node), listener.handler.clone()));
                }
            }
        }

        for listener in inner
            .listeners
            .iter()
            .filter(|l| l.kind == event.kind && l.target == ListenTarget::Window)
        {
            queue.push((listener.id, None, listener.handler.clone()));
        }

        queue
    }
}
