//! Tap gesture
//!
//! Touch platforms report a tap twice: once as `touchend` and again, a moment
//! later, as a synthetic `click`. Mouse-only platforms report only the click.
//! A [`TapController`] listens to both streams for one binding and calls its
//! callback exactly once per physical gesture:
//!
//! - `touchstart` clears the moving flag.
//! - `touchmove` marks the gesture as moving; it is a drag or scroll, not a tap.
//! - `touchend` without movement fires the callback right away and arms the
//!   click cancellation.
//! - `click` fires the callback unless the cancellation is armed, in which
//!   case it only disarms it.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use swipe_kit::{ElementId, EventHub, EventKind, InputEvent, ListenTarget, ListenerId, Selector};

/// Callback invoked on tap with the element the tap landed on
///
/// For direct bindings the element is the bound element. Delegated bindings
/// do not report their bound root: the callback receives the descendant that
/// matched the selector, and the root stays available from
/// [`TapBinding::element`].
pub type TapCallback = Rc<dyn Fn(ElementId, &mut InputEvent)>;

/// Where a tap controller listens
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TapBinding {
    /// Handlers on one specific element
    Direct(ElementId),
    /// Handlers on a stable ancestor, filtered by selector; covers
    /// descendants added after binding
    Delegated { root: ElementId, selector: Selector },
}

impl TapBinding {
    /// The element the listeners are attached to
    pub fn element(&self) -> ElementId {
        match self {
            TapBinding::Direct(element) => *element,
            TapBinding::Delegated { root, .. } => *root,
        }
    }

    fn listen_target(&self) -> ListenTarget {
        match self {
            TapBinding::Direct(element) => ListenTarget::Element(*element),
            TapBinding::Delegated { root, selector } => ListenTarget::Delegate {
                root: *root,
                selector: selector.clone(),
            },
        }
    }
}

/// Per-gesture flags plus the callback, shared with the listeners
struct TapState {
    touch_moving: Cell<bool>,
    click_cancelled: Cell<bool>,
    callback: RefCell<Option<TapCallback>>,
}

impl TapState {
    fn on_touch_start(&self) {
        self.touch_moving.set(false);
    }

    fn on_touch_move(&self) {
        self.touch_moving.set(true);
    }

    fn on_touch_end(&self, event: &mut InputEvent) {
        if self.touch_moving.get() {
            return;
        }

        self.click_cancelled.set(true);
        self.fire(event);
    }

    fn on_click(&self, event: &mut InputEvent) {
        if self.click_cancelled.get() {
            self.click_cancelled.set(false);
            log::trace!("suppressed click trailing a touch tap");
            return;
        }

        self.fire(event);
    }

    fn fire(&self, event: &mut InputEvent) {
        // Clone out so the callback may tear this controller down
        let callback = self.callback.borrow().clone();
        let (Some(callback), Some(element)) = (callback, event.current_target) else {
            return;
        };
        callback(element, event);
    }
}

/// Turns touch and click streams for one binding into single tap callbacks
///
/// Created enabled. Dropping the controller detaches its listeners;
/// [`TapController::destroy`] does the same and also releases the callback.
pub struct TapController {
    events: EventHub,
    binding: TapBinding,
    state: Rc<TapState>,
    listeners: Vec<ListenerId>,
    enabled: bool,
}

impl TapController {
    /// Bind `callback` to taps on `binding` and start listening
    pub fn new(
        events: EventHub,
        binding: TapBinding,
        callback: impl Fn(ElementId, &mut InputEvent) + 'static,
    ) -> Self {
        let callback: TapCallback = Rc::new(callback);
        let mut controller = Self {
            events,
            binding,
            state: Rc::new(TapState {
                touch_moving: Cell::new(false),
                click_cancelled: Cell::new(false),
                callback: RefCell::new(Some(callback)),
            }),
            listeners: Vec::new(),
            enabled: false,
        };
        controller.enable();
        controller
    }

    pub fn binding(&self) -> &TapBinding {
        &self.binding
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_touch_moving(&self) -> bool {
        self.state.touch_moving.get()
    }

    pub fn is_click_cancelled(&self) -> bool {
        self.state.click_cancelled.get()
    }

    /// Attach listeners; does nothing if already enabled
    pub fn enable(&mut self) {
        if self.enabled {
            return;
        }

        self.enabled = true;

        let target = self.binding.listen_target();

        let state = self.state.clone();
        self.listeners.push(
            self.events
                .on(target.clone(), EventKind::TouchStart, move |_| {
                    state.on_touch_start()
                }),
        );

        let state = self.state.clone();
        self.listeners.push(
            self.events
                .on(target.clone(), EventKind::TouchMove, move |_| {
                    state.on_touch_move()
                }),
        );

        let state = self.state.clone();
        self.listeners.push(
            self.events
                .on(target.clone(), EventKind::TouchEnd, move |event| {
                    state.on_touch_end(event)
                }),
        );

        let state = self.state.clone();
        self.listeners.push(
            self.events
                .on(target, EventKind::Click, move |event| state.on_click(event)),
        );

        log::debug!("tap enabled on {:?}", self.binding);
    }

    /// Detach listeners; does nothing if already disabled
    pub fn disable(&mut self) {
        if !self.enabled {
            return;
        }

        self.enabled = false;

        for id in self.listeners.drain(..) {
            self.events.off(id);
        }

        log::debug!("tap disabled on {:?}", self.binding);
    }

    /// Disable and release the callback; the controller is consumed
    pub fn destroy(mut self) {
        self.disable();
        self.state.callback.replace(None);
    }
}

impl Drop for TapController {
    fn drop(&mut self) {
        self.disable();
    }
}

impl std::fmt::Debug for TapController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TapController")
            .field("binding", &self.binding)
            .field("enabled", &self.enabled)
            .field("touch_moving", &self.is_touch_moving())
            .field("click_cancelled", &self.is_click_cancelled())
            .finish()
    }
}
