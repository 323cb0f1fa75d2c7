//! Winit input adapter for swipe-kit
//!
//! This module converts winit window events into swipe-kit's
//! backend-agnostic [`InputEvent`]s, targets them by hit-testing the
//! [`Document`], and dispatches them through an [`EventHub`].

use swipe_kit::{Document, ElementId, EventHub, InputEvent, Point};
use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, MouseButton, TouchPhase, WindowEvent};

/// How far a touch may travel and still count as a tap, in logical pixels
pub const CLICK_SLOP: f32 = 10.0;

/// The finger currently driving the gesture
#[derive(Debug, Clone, Copy, PartialEq)]
struct ActiveTouch {
    id: u64,
    target: ElementId,
    start: Point,
    /// Travelled further than the slop at some point
    wandered: bool,
}

/// Feeds winit window events into an [`EventHub`]
///
/// Only the first finger down is tracked; further fingers are ignored until
/// it lifts. A touch that lifts within [`CLICK_SLOP`] of where it started is
/// followed by a synthetic click, the way touch browsers report taps.
#[derive(Debug)]
pub struct WinitAdapter {
    events: EventHub,
    scale_factor: f64,
    cursor: Option<Point>,
    pressed: Option<ElementId>,
    touch: Option<ActiveTouch>,
}

impl WinitAdapter {
    pub fn new(events: EventHub) -> Self {
        Self {
            events,
            scale_factor: 1.0,
            cursor: None,
            pressed: None,
            touch: None,
        }
    }

    /// Start from the window's current scale factor
    pub fn with_scale_factor(mut self, scale_factor: f64) -> Self {
        self.scale_factor = scale_factor;
        self
    }

    pub fn events(&self) -> &EventHub {
        &self.events
    }

    fn document(&self) -> &Document {
        self.events.document()
    }

    pub fn cursor_position(&self) -> Option<Point> {
        self.cursor
    }

    /// Whether a finger is currently tracked
    pub fn is_touch_active(&self) -> bool {
        self.touch.is_some()
    }

    /// Process a winit [`WindowEvent`]
    ///
    /// Returns true when at least one swipe-kit event was dispatched.
    pub fn handle_window_event(&mut self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::Touch(touch) => {
                let point = self.to_logical(touch.location);
                self.handle_touch(touch.id, touch.phase, point)
            }
            WindowEvent::CursorMoved { position, .. } => {
                let point = self.to_logical(*position);
                self.handle_cursor_moved(point);
                false
            }
            WindowEvent::CursorLeft { .. } => {
                self.cursor = None;
                self.pressed = None;
                false
            }
            WindowEvent::MouseInput { state, button, .. } => {
                self.handle_mouse_button(*state, *button)
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                self.scale_factor = *scale_factor;
                false
            }
            WindowEvent::Resized(_) => self.handle_resized(),
            _ => false,
        }
    }

    /// Process one touch sample given in logical coordinates
    pub fn handle_touch(&mut self, id: u64, phase: TouchPhase, point: Point) -> bool {
        match phase {
            TouchPhase::Started => {
                if self.touch.is_some() {
                    return false;
                }
                let Some(target) = self.document().hit_test(point) else {
                    log::trace!("touch at {point:?} hit nothing");
                    return false;
                };

                self.touch = Some(ActiveTouch {
                    id,
                    target,
                    start: point,
                    wandered: false,
                });
                self.events.dispatch(InputEvent::touch_start(target, point));
                true
            }
            TouchPhase::Moved => {
                let Some(touch) = self.touch.as_mut().filter(|t| t.id == id) else {
                    return false;
                };

                touch.wandered |= touch.start.distance(point) > CLICK_SLOP;
                let target = touch.target;

                self.events.dispatch(InputEvent::touch_move(target, point));
                true
            }
            TouchPhase::Ended => {
                let Some(touch) = self.take_touch(id) else {
                    return false;
                };

                self.events.dispatch(InputEvent::touch_end(touch.target));

                if !touch.wandered && touch.start.distance(point) <= CLICK_SLOP {
                    self.events.dispatch(InputEvent::click(touch.target, point));
                }
                true
            }
            TouchPhase::Cancelled => {
                let Some(touch) = self.take_touch(id) else {
                    return false;
                };

                log::debug!("touch {id} cancelled on {}", touch.target);
                self.events.dispatch(InputEvent::touch_end(touch.target));
                true
            }
        }
    }

    /// Track the mouse cursor, in logical coordinates
    pub fn handle_cursor_moved(&mut self, point: Point) {
        self.cursor = Some(point);
    }

    /// A left press and release on the same element is a click
    pub fn handle_mouse_button(&mut self, state: ElementState, button: MouseButton) -> bool {
        if button != MouseButton::Left {
            return false;
        }

        let Some(cursor) = self.cursor else {
            return false;
        };
        let hit = self.document().hit_test(cursor);

        match state {
            ElementState::Pressed => {
                self.pressed = hit;
                false
            }
            ElementState::Released => {
                let pressed = self.pressed.take();
                match (pressed, hit) {
                    (Some(down), Some(up)) if down == up => {
                        self.events.dispatch(InputEvent::click(up, cursor));
                        true
                    }
                    _ => false,
                }
            }
        }
    }

    /// Broadcast a window resize; the host updates element widths first
    pub fn handle_resized(&mut self) -> bool {
        self.events.dispatch(InputEvent::resize());
        true
    }

    fn take_touch(&mut self, id: u64) -> Option<ActiveTouch> {
        if self.touch.as_ref().is_some_and(|t| t.id == id) {
            self.touch.take()
        } else {
            None
        }
    }

    fn to_logical(&self, position: PhysicalPosition<f64>) -> Point {
        let logical = position.to_logical::<f64>(self.scale_factor);
        Point::new(logical.x as f32, logical.y as f32)
    }
}
