//! Carousel gesture and animation state machine
//!
//! [`CarouselMachine`] holds everything a carousel decides on its own: the
//! active page, the drag session and the animation duration. It performs no
//! I/O. Every operation returns what should be drawn, and the
//! [`Carousel`](crate::Carousel) forwards that to the rendering sink.
//!
//! The conceptual states (idle, dragging, sliding, resizing) are orthogonal
//! flags rather than one enum, because a resize can arrive mid-drag and a
//! drag can start while a slide is still animating.

use glam::Vec2;
use swipe_kit::Point;

/// Horizontal direction of the latest drag sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragDirection {
    /// No movement sampled yet
    #[default]
    None,
    /// Finger travelling right to left; content should advance
    Left,
    /// Finger travelling left to right; content should retreat
    Right,
}

/// Measurements the layout depends on
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarouselLayout {
    /// Width of the carousel mount point; one page scrolls by this much
    pub wrapper_width: f32,
    /// Width of the slide list
    pub track_width: f32,
    /// Width of the first slide
    pub slide_width: f32,
    /// Number of slide elements
    pub slide_count: usize,
}

impl CarouselLayout {
    /// Slides fitting the viewport at once, never less than one
    pub fn visible_per_page(&self) -> usize {
        if self.slide_width <= 0.0 || !self.slide_width.is_finite() {
            return 1;
        }
        ((self.track_width / self.slide_width).round() as usize).max(1)
    }

    /// Number of navigation stops, never less than one
    pub fn total_pages(&self) -> usize {
        ((self.slide_count as f32 / self.visible_per_page() as f32).round() as usize).max(1)
    }
}

/// Enabled state of the prev/next affordances
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavState {
    pub prev_active: bool,
    pub next_active: bool,
}

/// A positioning command
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    /// Absolute horizontal offset of the slide list
    pub offset: f32,
    /// Transition duration; 0 means jump
    pub duration_ms: u32,
    /// Button state to show, when the command settles on a page
    pub nav: Option<NavState>,
}

/// Result of an operation that may be refused
#[derive(Debug, Clone, Copy, PartialEq)]
#[must_use]
pub enum Outcome {
    /// Boundary or guard hit; nothing changed
    Unchanged,
    /// Draw this
    Render(Frame),
}

impl Outcome {
    pub fn is_changed(&self) -> bool {
        matches!(self, Outcome::Render(_))
    }

    pub fn frame(&self) -> Option<Frame> {
        match self {
            Outcome::Render(frame) => Some(*frame),
            Outcome::Unchanged => None,
        }
    }
}

/// What a touch move produced
#[derive(Debug, Clone, Copy, PartialEq)]
#[must_use]
pub struct MoveOutcome {
    /// The gesture is horizontal; native scrolling should be suppressed
    pub prevent_default: bool,
    /// Drag offset to draw, if the drag moved the list
    pub outcome: Outcome,
}

/// Touch sub-state for one gesture
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DragSession {
    pub touch_start: Vec2,
    pub direction: DragDirection,
    pub is_dragging: bool,
    pub is_swipe_ready: bool,
    pub is_scrolling: bool,
}

/// Pure state of one carousel
#[derive(Debug, Clone, PartialEq)]
pub struct CarouselMachine {
    active_index: usize,
    total_slides: usize,
    wrapper_width: f32,
    threshold_modifier: f32,
    swipe_threshold: f32,
    configured_duration_ms: u32,
    animation_duration_ms: u32,
    is_resizing: bool,
    drag: DragSession,
}

impl CarouselMachine {
    /// Machine at page 0 for the given layout
    pub fn new(
        layout: CarouselLayout,
        animation_duration_ms: u32,
        threshold_modifier: f32,
    ) -> Self {
        let mut machine = Self {
            active_index: 0,
            total_slides: 1,
            wrapper_width: 0.0,
            threshold_modifier,
            swipe_threshold: 0.0,
            configured_duration_ms: animation_duration_ms,
            animation_duration_ms,
            is_resizing: false,
            drag: DragSession::default(),
        };
        machine.apply_layout(layout);
        machine
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    pub fn total_slides(&self) -> usize {
        self.total_slides
    }

    pub fn last_index(&self) -> usize {
        self.total_slides.saturating_sub(1)
    }

    pub fn wrapper_width(&self) -> f32 {
        self.wrapper_width
    }

    pub fn swipe_threshold(&self) -> f32 {
        self.swipe_threshold
    }

    pub fn animation_duration_ms(&self) -> u32 {
        self.animation_duration_ms
    }

    pub fn drag(&self) -> &DragSession {
        &self.drag
    }

    /// Resting offset of the active page
    pub fn resting_offset(&self) -> f32 {
        -(self.active_index as f32 * self.wrapper_width)
    }

    /// Button state for the active page
    pub fn nav_state(&self) -> NavState {
        if self.active_index == 0 {
            return NavState {
                prev_active: false,
                next_active: true,
            };
        }

        if self.active_index == self.last_index() {
            return NavState {
                prev_active: true,
                next_active: false,
            };
        }

        NavState {
            prev_active: true,
            next_active: true,
        }
    }

    /// Go back one page
    pub fn prev(&mut self) -> Outcome {
        if self.active_index == 0 {
            return Outcome::Unchanged;
        }

        self.active_index -= 1;

        Outcome::Render(self.slide())
    }

    /// Go forward one page
    pub fn next(&mut self) -> Outcome {
        if self.active_index >= self.last_index() {
            return Outcome::Unchanged;
        }

        self.active_index += 1;

        Outcome::Render(self.slide())
    }

    /// Begin a gesture at `point`
    pub fn touch_start(&mut self, point: Point) {
        self.drag = DragSession {
            touch_start: point.into(),
            ..DragSession::default()
        };
    }

    /// Follow the finger to `point`
    pub fn touch_move(&mut self, point: Point) -> MoveOutcome {
        let distance = self.drag.touch_start - Vec2::from(point);
        let threshold_met = distance.x.abs() > self.swipe_threshold;
        let is_horizontal = distance.x.abs() > distance.y.abs();

        // Latest sample wins, even once the gesture has turned into a scroll
        self.drag.direction = if distance.x > 0.0 {
            DragDirection::Left
        } else {
            DragDirection::Right
        };

        if !is_horizontal {
            self.drag.is_scrolling = true;
        }

        if self.drag.is_scrolling {
            return MoveOutcome {
                prevent_default: is_horizontal,
                outcome: Outcome::Unchanged,
            };
        }

        let outcome = self.drag_by(-distance.x);
        self.drag.is_swipe_ready = threshold_met;

        MoveOutcome {
            prevent_default: true,
            outcome,
        }
    }

    /// Finish the gesture: commit a swipe or bounce back
    pub fn touch_end(&mut self) -> Outcome {
        if !self.drag.is_swipe_ready {
            return self.bounce();
        }

        match self.drag.direction {
            DragDirection::Left => self.next(),
            DragDirection::Right => self.prev(),
            DragDirection::None => Outcome::Unchanged,
        }
    }

    /// Offset the list by `distance` from the active page, without animation
    ///
    /// Refused at the ends when dragging outwards, so no empty space shows.
    pub fn drag_by(&mut self, distance: f32) -> Outcome {
        let at_start_dragging_right =
            self.active_index == 0 && self.drag.direction == DragDirection::Right;
        let at_end_dragging_left =
            self.active_index == self.last_index() && self.drag.direction == DragDirection::Left;

        if at_start_dragging_right || at_end_dragging_left {
            return Outcome::Unchanged;
        }

        self.drag.is_dragging = true;
        self.animation_duration_ms = 0;

        Outcome::Render(Frame {
            offset: self.resting_offset() + distance,
            duration_ms: 0,
            nav: None,
        })
    }

    /// Return to the active page after a drag that did not commit
    pub fn bounce(&mut self) -> Outcome {
        if !self.drag.is_dragging {
            return Outcome::Unchanged;
        }

        Outcome::Render(self.slide())
    }

    /// Reflow after the viewport changed size, keeping relative progress
    ///
    /// The new index is `round(new_last * index / old_last)`, halves rounding
    /// up, computed on integers so exact halves are never lost to precision.
    pub fn resize(&mut self, layout: CarouselLayout) -> Frame {
        let old_index = self.active_index;
        let old_last = self.last_index();

        self.is_resizing = true;
        self.animation_duration_ms = 0;

        self.apply_layout(layout);
        let new_last = self.last_index();
        self.active_index = if old_last == 0 {
            0
        } else {
            ((2 * new_last * old_index + old_last) / (2 * old_last)).min(new_last)
        };

        self.slide()
    }

    /// Animate to the active page
    fn slide(&mut self) -> Frame {
        if self.is_resizing {
            self.is_resizing = false;
        } else {
            self.animation_duration_ms = self.configured_duration_ms;
        }

        Frame {
            offset: self.resting_offset(),
            duration_ms: self.animation_duration_ms,
            nav: Some(self.nav_state()),
        }
    }

    fn apply_layout(&mut self, layout: CarouselLayout) {
        self.wrapper_width = layout.wrapper_width;
        self.total_slides = layout.total_pages();
        self.swipe_threshold = (layout.wrapper_width * self.threshold_modifier).round();
        self.active_index = self.active_index.min(self.last_index());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(slides: usize, width: f32) -> CarouselLayout {
        CarouselLayout {
            wrapper_width: width,
            track_width: width,
            slide_width: width,
            slide_count: slides,
        }
    }

    fn machine(slides: usize) -> CarouselMachine {
        CarouselMachine::new(layout(slides, 300.0), 300, 0.3)
    }

    #[test]
    fn test_layout_pages() {
        assert_eq!(layout(5, 300.0).total_pages(), 5);

        let three_up = CarouselLayout {
            wrapper_width: 900.0,
            track_width: 900.0,
            slide_width: 300.0,
            slide_count: 9,
        };
        assert_eq!(three_up.visible_per_page(), 3);
        assert_eq!(three_up.total_pages(), 3);

        let degenerate = CarouselLayout {
            wrapper_width: 300.0,
            track_width: 300.0,
            slide_width: 0.0,
            slide_count: 0,
        };
        assert_eq!(degenerate.visible_per_page(), 1);
        assert_eq!(degenerate.total_pages(), 1);
    }

    #[test]
    fn test_threshold_from_width() {
        let m = machine(5);
        assert_eq!(m.swipe_threshold(), 90.0);
        assert_eq!(m.total_slides(), 5);
        assert_eq!(m.active_index(), 0);
    }

    #[test]
    fn test_next_increases_until_last() {
        let mut m = machine(5);
        let mut previous = m.active_index();
        for _ in 0..4 {
            assert!(m.next().is_changed());
            assert!(m.active_index() > previous);
            previous = m.active_index();
        }
        assert_eq!(m.active_index(), 4);
        assert_eq!(m.next(), Outcome::Unchanged);
        assert_eq!(m.active_index(), 4);
    }

    #[test]
    fn test_prev_stops_at_zero() {
        let mut m = machine(5);
        assert_eq!(m.prev(), Outcome::Unchanged);
        let _ = m.next();
        let _ = m.next();
        assert!(m.prev().is_changed());
        assert!(m.prev().is_changed());
        assert_eq!(m.prev(), Outcome::Unchanged);
        assert_eq!(m.active_index(), 0);
    }

    #[test]
    fn test_slide_frame() {
        let mut m = machine(5);
        let frame = m.next().frame();
        assert_eq!(
            frame,
            Some(Frame {
                offset: -300.0,
                duration_ms: 300,
                nav: Some(NavState {
                    prev_active: true,
                    next_active: true,
                }),
            })
        );
    }

    #[test]
    fn test_nav_state_at_ends() {
        let mut m = machine(3);
        assert_eq!(
            m.nav_state(),
            NavState {
                prev_active: false,
                next_active: true
            }
        );
        let _ = m.next();
        let _ = m.next();
        assert_eq!(
            m.nav_state(),
            NavState {
                prev_active: true,
                next_active: false
            }
        );
    }

    #[test]
    fn test_swipe_left_advances() {
        let mut m = machine(5);
        m.touch_start(Point::new(250.0, 100.0));
        let moved = m.touch_move(Point::new(150.0, 105.0));
        assert!(moved.prevent_default);
        assert_eq!(m.drag().direction, DragDirection::Left);
        assert!(m.drag().is_swipe_ready);
        assert_eq!(moved.outcome.frame().map(|f| f.offset), Some(-100.0));

        let end = m.touch_end();
        assert_eq!(m.active_index(), 1);
        assert_eq!(end.frame().map(|f| f.offset), Some(-300.0));
    }

    #[test]
    fn test_short_drag_bounces_back() {
        let mut m = machine(5);
        let _ = m.next();
        m.touch_start(Point::new(100.0, 100.0));
        let moved = m.touch_move(Point::new(150.0, 100.0));
        assert!(!m.drag().is_swipe_ready);
        assert_eq!(moved.outcome.frame().map(|f| f.duration_ms), Some(0));
        assert_eq!(m.animation_duration_ms(), 0);

        let end = m.touch_end();
        assert_eq!(m.active_index(), 1);
        assert_eq!(
            end.frame().map(|f| (f.offset, f.duration_ms)),
            Some((-300.0, 300))
        );
    }

    #[test]
    fn test_exactly_threshold_is_not_ready() {
        let mut m = machine(5);
        let _ = m.next();
        m.touch_start(Point::new(100.0, 0.0));
        let _ = m.touch_move(Point::new(190.0, 0.0));
        assert!(!m.drag().is_swipe_ready);
        let _ = m.touch_end();
        assert_eq!(m.active_index(), 1);
    }

    #[test]
    fn test_readiness_is_not_sticky() {
        let mut m = machine(5);
        let _ = m.next();
        m.touch_start(Point::new(100.0, 0.0));
        let _ = m.touch_move(Point::new(250.0, 0.0));
        assert!(m.drag().is_swipe_ready);
        let _ = m.touch_move(Point::new(140.0, 0.0));
        assert!(!m.drag().is_swipe_ready);
        let _ = m.touch_end();
        assert_eq!(m.active_index(), 1);
    }

    #[test]
    fn test_vertical_gesture_scrolls() {
        let mut m = machine(5);
        m.touch_start(Point::new(100.0, 100.0));
        let moved = m.touch_move(Point::new(95.0, 20.0));
        assert!(!moved.prevent_default);
        assert!(m.drag().is_scrolling);
        assert_eq!(moved.outcome, Outcome::Unchanged);

        // Stays a scroll even if later samples are horizontal
        let moved = m.touch_move(Point::new(-200.0, 20.0));
        assert!(moved.prevent_default);
        assert_eq!(moved.outcome, Outcome::Unchanged);
        assert!(!m.drag().is_swipe_ready);
        assert_eq!(m.drag().direction, DragDirection::Left);

        // Nothing was dragged, so nothing bounces
        assert_eq!(m.touch_end(), Outcome::Unchanged);
        assert_eq!(m.active_index(), 0);
    }

    #[test]
    fn test_boundary_drag_clamp() {
        let mut m = machine(3);
        m.touch_start(Point::new(100.0, 0.0));
        let moved = m.touch_move(Point::new(200.0, 0.0));
        assert_eq!(moved.outcome, Outcome::Unchanged);
        assert!(!m.drag().is_dragging);

        let _ = m.next();
        let _ = m.next();
        m.touch_start(Point::new(200.0, 0.0));
        let moved = m.touch_move(Point::new(100.0, 0.0));
        assert_eq!(moved.outcome, Outcome::Unchanged);

        // Dragging inwards from the end still works
        let moved = m.touch_move(Point::new(260.0, 0.0));
        assert_eq!(moved.outcome.frame().map(|f| f.offset), Some(-540.0));
    }

    #[test]
    fn test_tap_without_move_is_no_op() {
        let mut m = machine(5);
        m.touch_start(Point::new(100.0, 0.0));
        assert_eq!(m.touch_end(), Outcome::Unchanged);
    }

    #[test]
    fn test_resize_keeps_progress() {
        // (pages before, pages after, index before, index after)
        let cases = [
            (5, 3, 2, 1),
            (5, 9, 3, 6),
            (3, 5, 1, 2),
            (9, 2, 7, 1),
            (4, 4, 3, 3),
            (23, 12, 13, 7),
            (3, 2, 1, 1),
        ];
        for (n, m_pages, k, expected) in cases {
            let mut machine = machine(n);
            for _ in 0..k {
                let _ = machine.next();
            }
            let frame = machine.resize(layout(m_pages, 200.0));
            assert_eq!(machine.active_index(), expected);
            assert_eq!(machine.total_slides(), m_pages);
            assert_eq!(frame.duration_ms, 0);
            assert_eq!(frame.offset, -(expected as f32 * 200.0));
            assert_eq!(machine.swipe_threshold(), 60.0);
        }
    }

    #[test]
    fn test_resize_single_slide_resets() {
        let mut m = machine(1);
        let frame = m.resize(layout(4, 300.0));
        assert_eq!(m.active_index(), 0);
        assert_eq!(frame.offset, 0.0);
        assert_eq!(m.total_slides(), 4);
    }

    #[test]
    fn test_slide_after_resize_uses_configured_duration() {
        let mut m = machine(5);
        let _ = m.resize(layout(5, 320.0));
        assert_eq!(m.animation_duration_ms(), 0);
        let frame = m.next().frame();
        assert_eq!(frame.map(|f| f.duration_ms), Some(300));
        assert_eq!(frame.map(|f| f.offset), Some(-320.0));
    }

    #[test]
    fn test_end_to_end_swipe_right() {
        let mut m = machine(5);
        let _ = m.next();
        let _ = m.next();
        assert_eq!(m.active_index(), 2);

        m.touch_start(Point::new(100.0, 50.0));
        let moved = m.touch_move(Point::new(200.0, 50.0));
        assert_eq!(m.drag().direction, DragDirection::Right);
        assert!(m.drag().is_swipe_ready);
        assert_eq!(moved.outcome.frame().map(|f| f.offset), Some(-500.0));

        let end = m.touch_end();
        assert_eq!(m.active_index(), 1);
        assert_eq!(end.frame().map(|f| f.offset), Some(-300.0));
    }
}
