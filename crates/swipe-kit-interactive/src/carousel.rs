//! Touch carousel widget
//!
//! A [`Carousel`] binds one mount point of the document to a
//! [`CarouselMachine`]: swipes on the slide list and taps on the prev/next
//! buttons feed the machine, and every frame it produces is pushed to the
//! toolkit's render sink through the renderer picked at construction.
//!
//! Expected structure inside the mount point:
//!
//! ```text
//! .js-carousel                 (wrapper; its width is one page)
//!   .js-carouselWrapper        (clipping viewport)
//!     .js-carousel-list        (moving track)
//!       <slide> <slide> ...
//!   .js-carousel-btn.js-carousel-btn-prev
//!   .js-carousel-btn.js-carousel-btn-next
//! ```

use crate::error::CarouselError;
use crate::machine::{CarouselLayout, CarouselMachine, DragSession, Frame, NavState, Outcome};
use crate::options::CarouselConfig;
use crate::registry::TapHandle;
use crate::tap::TapBinding;
use crate::toolkit::Toolkit;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use swipe_kit::{
    renderer_for, ElementId, EventKind, InputEvent, ListenTarget, ListenerId, RenderSink, Selector,
    SlideRenderer, SlideTarget,
};

struct CarouselState {
    config: Rc<CarouselConfig>,
    toolkit: Toolkit,
    wrapper: ElementId,
    slide_wrapper: ElementId,
    slide_list: ElementId,
    slides: Vec<ElementId>,
    prev_buttons: Vec<ElementId>,
    next_buttons: Vec<ElementId>,
    renderer: Box<dyn SlideRenderer>,
    machine: CarouselMachine,
    touch_listeners: Vec<ListenerId>,
    taps: Vec<TapHandle>,
    resize_listener: Option<ListenerId>,
    is_ui_enabled: bool,
    is_disposed: bool,
}

impl CarouselState {
    fn sink(&self) -> &dyn RenderSink {
        self.toolkit.sink.as_ref()
    }

    fn measure(&self) -> CarouselLayout {
        measure(self.sink(), self.wrapper, self.slide_list, &self.slides)
    }

    fn apply(&self, outcome: Outcome) -> bool {
        match outcome {
            Outcome::Render(frame) => {
                self.render(frame);
                true
            }
            Outcome::Unchanged => false,
        }
    }

    fn render(&self, frame: Frame) {
        let sink = self.sink();
        let target = SlideTarget {
            track: self.slide_list,
            first_item: self.slides.first().copied(),
        };

        sink.set_transition_duration(self.slide_list, frame.duration_ms);
        self.renderer
            .render(sink, target, frame.offset, frame.duration_ms);

        if let Some(nav) = frame.nav {
            self.update_buttons(nav);
        }
    }

    fn update_buttons(&self, nav: NavState) {
        let sink = self.sink();
        for button in &self.prev_buttons {
            sink.set_marker(*button, &self.config.button_prev_active_class, nav.prev_active);
        }
        for button in &self.next_buttons {
            sink.set_marker(*button, &self.config.button_next_active_class, nav.next_active);
        }
    }

    fn on_touch_start(&mut self, event: &mut InputEvent) {
        let Some(point) = event.first_touch() else {
            log::debug!("ignoring touchstart without touch points on {}", self.slide_list);
            return;
        };
        self.machine.touch_start(point);
    }

    fn on_touch_move(&mut self, event: &mut InputEvent) {
        let Some(point) = event.first_touch() else {
            log::debug!("ignoring touchmove without touch points on {}", self.slide_list);
            return;
        };

        let moved = self.machine.touch_move(point);
        if moved.prevent_default {
            event.prevent_default();
        }
        self.apply(moved.outcome);
    }

    fn on_touch_end(&mut self) {
        let outcome = self.machine.touch_end();
        self.apply(outcome);
    }

    fn on_resize(&mut self) {
        let layout = self.measure();
        let frame = self.machine.resize(layout);
        log::trace!(
            "carousel {} reflowed to page {} of {}",
            self.wrapper,
            self.machine.active_index(),
            self.machine.total_slides()
        );
        self.render(frame);
    }

    fn detach_ui(&mut self) {
        if !self.is_ui_enabled {
            return;
        }

        self.is_ui_enabled = false;

        for id in self.touch_listeners.drain(..) {
            self.toolkit.events.off(id);
        }
        for handle in self.taps.drain(..) {
            self.toolkit.gestures.unbind(handle);
        }
    }

    fn detach_resize(&mut self) {
        if let Some(id) = self.resize_listener.take() {
            self.toolkit.events.off(id);
        }
    }
}

impl Drop for CarouselState {
    fn drop(&mut self) {
        self.detach_ui();
        self.detach_resize();
    }
}

/// Run `f` against the carousel behind `weak`, if it is still alive
fn with_state(weak: &Weak<RefCell<CarouselState>>, f: impl FnOnce(&mut CarouselState)) {
    if let Some(state) = weak.upgrade() {
        f(&mut state.borrow_mut());
    }
}

/// A swipeable carousel mounted on one wrapper element
///
/// Cloning yields another handle to the same carousel. Listeners hold only
/// weak references, so dropping the last handle detaches everything.
#[derive(Clone)]
pub struct Carousel {
    state: Rc<RefCell<CarouselState>>,
}

impl Carousel {
    /// Build a carousel on `wrapper` and start listening for input
    ///
    /// Fails with [`CarouselError::TargetNotFound`] when the slide wrapper or
    /// slide list is missing inside `wrapper`.
    pub fn new(
        wrapper: ElementId,
        config: Rc<CarouselConfig>,
        toolkit: &Toolkit,
    ) -> Result<Self, CarouselError> {
        let document = &toolkit.document;

        let slide_wrapper = find_first(toolkit, wrapper, &config.slide_wrapper)?;
        let slide_list = find_first(toolkit, wrapper, &config.slide_list)?;
        let slides = document.children(slide_list);
        let prev_buttons =
            document.find(wrapper, &Selector::class(config.button_prev_class.as_str()));
        let next_buttons =
            document.find(wrapper, &Selector::class(config.button_next_class.as_str()));

        let sink = toolkit.sink.as_ref();
        let renderer = renderer_for(sink);
        let machine = CarouselMachine::new(
            measure(sink, wrapper, slide_list, &slides),
            config.animation_duration_ms,
            config.swipe_threshold_modifier,
        );

        let state = CarouselState {
            config,
            toolkit: toolkit.clone(),
            wrapper,
            slide_wrapper,
            slide_list,
            slides,
            prev_buttons,
            next_buttons,
            renderer,
            machine,
            touch_listeners: Vec::new(),
            taps: Vec::new(),
            resize_listener: None,
            is_ui_enabled: false,
            is_disposed: false,
        };

        state.update_buttons(state.machine.nav_state());

        log::debug!(
            "carousel on {} with {} slides in {} pages using {:?}",
            wrapper,
            state.slides.len(),
            state.machine.total_slides(),
            state.renderer
        );

        let carousel = Self {
            state: Rc::new(RefCell::new(state)),
        };
        carousel.enable_ui();
        carousel.enable_resize();
        Ok(carousel)
    }

    /// Go back one page; false at the first page or after destroy
    pub fn prev(&self) -> bool {
        let mut state = self.state.borrow_mut();
        if state.is_disposed {
            return false;
        }
        let outcome = state.machine.prev();
        state.apply(outcome)
    }

    /// Go forward one page; false at the last page or after destroy
    pub fn next(&self) -> bool {
        let mut state = self.state.borrow_mut();
        if state.is_disposed {
            return false;
        }
        let outcome = state.machine.next();
        state.apply(outcome)
    }

    /// Re-measure and reflow, as a window resize does
    pub fn resize(&self) {
        let mut state = self.state.borrow_mut();
        if state.is_disposed {
            return;
        }
        state.on_resize();
    }

    /// Listen for swipes on the slide list and taps on the buttons
    pub fn enable_ui(&self) {
        let weak = Rc::downgrade(&self.state);
        let mut state = self.state.borrow_mut();
        if state.is_ui_enabled || state.is_disposed {
            return;
        }

        state.is_ui_enabled = true;

        let events = state.toolkit.events.clone();
        let list = ListenTarget::Element(state.slide_list);

        let w = weak.clone();
        state.touch_listeners.push(events.on(list.clone(), EventKind::TouchStart, move |event| {
            with_state(&w, |s| s.on_touch_start(event))
        }));

        let w = weak.clone();
        state.touch_listeners.push(events.on(list.clone(), EventKind::TouchMove, move |event| {
            with_state(&w, |s| s.on_touch_move(event))
        }));

        let w = weak.clone();
        state.touch_listeners.push(events.on(list, EventKind::TouchEnd, move |_| {
            with_state(&w, |s| s.on_touch_end())
        }));

        let gestures = state.toolkit.gestures.clone();

        for button in state.prev_buttons.clone() {
            let w = weak.clone();
            let handle = gestures.bind(TapBinding::Direct(button), move |_, event| {
                event.prevent_default();
                with_state(&w, |s| {
                    let outcome = s.machine.prev();
                    s.apply(outcome);
                });
            });
            state.taps.push(handle);
        }

        for button in state.next_buttons.clone() {
            let w = weak.clone();
            let handle = gestures.bind(TapBinding::Direct(button), move |_, event| {
                event.prevent_default();
                with_state(&w, |s| {
                    let outcome = s.machine.next();
                    s.apply(outcome);
                });
            });
            state.taps.push(handle);
        }
    }

    /// Stop listening for swipes and taps
    pub fn disable_ui(&self) {
        self.state.borrow_mut().detach_ui();
    }

    /// Reflow on window resize
    pub fn enable_resize(&self) {
        let weak = Rc::downgrade(&self.state);
        let mut state = self.state.borrow_mut();
        if state.resize_listener.is_some() || state.is_disposed {
            return;
        }

        let id = state
            .toolkit
            .events
            .on(ListenTarget::Window, EventKind::Resize, move |_| {
                with_state(&weak, |s| s.on_resize())
            });
        state.resize_listener = Some(id);
    }

    pub fn disable_resize(&self) {
        self.state.borrow_mut().detach_resize();
    }

    /// Detach every listener for good; the document is left untouched
    pub fn destroy(&self) {
        let mut state = self.state.borrow_mut();
        if state.is_disposed {
            return;
        }

        state.detach_ui();
        state.detach_resize();
        state.is_disposed = true;

        log::debug!("carousel on {} destroyed", state.wrapper);
    }

    pub fn is_disposed(&self) -> bool {
        self.state.borrow().is_disposed
    }

    pub fn is_ui_enabled(&self) -> bool {
        self.state.borrow().is_ui_enabled
    }

    pub fn is_resizable(&self) -> bool {
        self.state.borrow().resize_listener.is_some()
    }

    pub fn active_index(&self) -> usize {
        self.state.borrow().machine.active_index()
    }

    pub fn total_slides(&self) -> usize {
        self.state.borrow().machine.total_slides()
    }

    pub fn wrapper_width(&self) -> f32 {
        self.state.borrow().machine.wrapper_width()
    }

    pub fn swipe_threshold(&self) -> f32 {
        self.state.borrow().machine.swipe_threshold()
    }

    pub fn animation_duration_ms(&self) -> u32 {
        self.state.borrow().machine.animation_duration_ms()
    }

    /// Snapshot of the current touch session
    pub fn drag_session(&self) -> DragSession {
        *self.state.borrow().machine.drag()
    }

    pub fn wrapper(&self) -> ElementId {
        self.state.borrow().wrapper
    }

    pub fn slide_wrapper(&self) -> ElementId {
        self.state.borrow().slide_wrapper
    }

    pub fn slide_list(&self) -> ElementId {
        self.state.borrow().slide_list
    }

    pub fn slides(&self) -> Vec<ElementId> {
        self.state.borrow().slides.clone()
    }
}

impl std::fmt::Debug for Carousel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("Carousel")
            .field("wrapper", &state.wrapper)
            .field("machine", &state.machine)
            .field("ui_enabled", &state.is_ui_enabled)
            .field("disposed", &state.is_disposed)
            .finish_non_exhaustive()
    }
}

fn measure(
    sink: &dyn RenderSink,
    wrapper: ElementId,
    slide_list: ElementId,
    slides: &[ElementId],
) -> CarouselLayout {
    CarouselLayout {
        wrapper_width: sink.outer_width(wrapper),
        track_width: sink.outer_width(slide_list),
        slide_width: slides
            .first()
            .map(|slide| sink.outer_width(*slide))
            .unwrap_or(0.0),
        slide_count: slides.len(),
    }
}

fn find_first(
    toolkit: &Toolkit,
    within: ElementId,
    selector: &Selector,
) -> Result<ElementId, CarouselError> {
    toolkit
        .document
        .find(within, selector)
        .first()
        .copied()
        .ok_or_else(|| CarouselError::TargetNotFound {
            selector: selector.to_string(),
        })
}
