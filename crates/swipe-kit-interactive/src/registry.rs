//! Gesture registry
//!
//! Owns every [`TapController`] on a page. Binding a tap inserts a controller
//! keyed by a [`TapHandle`]; unbinding removes and destroys it.

use crate::tap::{TapBinding, TapController};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use swipe_kit::{ElementId, EventHub, InputEvent};

/// Identity of one tap binding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TapHandle {
    element: ElementId,
    slot: u64,
}

impl TapHandle {
    /// The element the binding's listeners are attached to
    pub fn element(&self) -> ElementId {
        self.element
    }
}

#[derive(Default)]
struct RegistryInner {
    controllers: HashMap<TapHandle, TapController>,
    next_slot: u64,
}

/// Shared registry of tap bindings
#[derive(Clone)]
pub struct GestureRegistry {
    events: EventHub,
    inner: Rc<RefCell<RegistryInner>>,
}

impl GestureRegistry {
    pub fn new(events: EventHub) -> Self {
        Self {
            events,
            inner: Rc::new(RefCell::new(RegistryInner::default())),
        }
    }

    /// Start delivering taps on `binding` to `callback`
    pub fn bind(
        &self,
        binding: TapBinding,
        callback: impl Fn(ElementId, &mut InputEvent) + 'static,
    ) -> TapHandle {
        let element = binding.element();
        let controller = TapController::new(self.events.clone(), binding, callback);

        let mut inner = self.inner.borrow_mut();
        let handle = TapHandle {
            element,
            slot: inner.next_slot,
        };
        inner.next_slot += 1;
        inner.controllers.insert(handle, controller);
        handle
    }

    /// Tear down a binding; returns false for unknown handles
    pub fn unbind(&self, handle: TapHandle) -> bool {
        // Release the registry borrow before the controller detaches its listeners
        let removed = self.inner.borrow_mut().controllers.remove(&handle);
        match removed {
            Some(controller) => {
                controller.destroy();
                true
            }
            None => false,
        }
    }

    pub fn is_bound(&self, handle: TapHandle) -> bool {
        self.inner.borrow().controllers.contains_key(&handle)
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().controllers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for GestureRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GestureRegistry")
            .field("bindings", &self.len())
            .finish()
    }
}
