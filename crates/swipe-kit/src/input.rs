//! Backend-agnostic input events
//!
//! Windowing backends convert their native touch, mouse and resize events
//! into [`InputEvent`]s and hand them to an [`EventHub`](crate::EventHub).

use crate::document::ElementId;
use crate::primitives::Point;

/// Kind of input notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// First contact of a touch
    TouchStart,
    /// Contact moved while touching
    TouchMove,
    /// Contact lifted
    TouchEnd,
    /// Click (mouse, or the synthetic click that trails a touch)
    Click,
    /// Window or viewport resized
    Resize,
}

/// A single normalized input notification
#[derive(Debug, Clone)]
pub struct InputEvent {
    /// What happened
    pub kind: EventKind,
    /// Element the input was delivered to (None for window-level events)
    pub target: Option<ElementId>,
    /// Element whose listener is currently handling the event
    pub current_target: Option<ElementId>,
    /// Active contact points in screen coordinates, first contact first
    pub touches: Vec<Point>,
    /// Pointer position for clicks
    pub position: Option<Point>,
    default_prevented: bool,
}

impl InputEvent {
    /// Create an event with no contact points
    pub fn new(kind: EventKind, target: Option<ElementId>) -> Self {
        Self {
            kind,
            target,
            current_target: None,
            touches: Vec::new(),
            position: None,
            default_prevented: false,
        }
    }

    pub fn touch_start(target: ElementId, point: Point) -> Self {
        Self::new(EventKind::TouchStart, Some(target)).with_touches(vec![point])
    }

    pub fn touch_move(target: ElementId, point: Point) -> Self {
        Self::new(EventKind::TouchMove, Some(target)).with_touches(vec![point])
    }

    /// Touch end carries no active contacts
    pub fn touch_end(target: ElementId) -> Self {
        Self::new(EventKind::TouchEnd, Some(target))
    }

    pub fn click(target: ElementId, position: Point) -> Self {
        let mut event = Self::new(EventKind::Click, Some(target));
        event.position = Some(position);
        event
    }

    pub fn resize() -> Self {
        Self::new(EventKind::Resize, None)
    }

    pub fn with_touches(mut self, touches: Vec<Point>) -> Self {
        self.touches = touches;
        self
    }

    /// First contact point, if the event carries any
    pub fn first_touch(&self) -> Option<Point> {
        self.touches.first().copied()
    }

    /// Ask the host not to perform its native action (scroll, follow link, ...)
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prevent_default() {
        let mut event = InputEvent::resize();
        assert!(!event.is_default_prevented());
        event.prevent_default();
        assert!(event.is_default_prevented());
    }

    #[test]
    fn test_first_touch() {
        let doc = crate::Document::new();
        let el = doc.create_element(None, &[], crate::Rect::default());

        let start = InputEvent::touch_start(el, Point::new(4.0, 2.0));
        assert_eq!(start.first_touch(), Some(Point::new(4.0, 2.0)));

        let end = InputEvent::touch_end(el);
        assert_eq!(end.first_touch(), None);
    }
}
