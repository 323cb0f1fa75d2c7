//! Rendering sink contract and positioning strategies
//!
//! Widgets never touch the host surface directly; they issue commands to a
//! [`RenderSink`]. How a horizontal offset reaches the screen depends on what
//! the sink can do, so a [`SlideRenderer`] is picked once per widget by
//! probing the sink:
//!
//! - [`TransformRenderer`] sets a compositor-driven translation; the sink's
//!   transition duration animates it.
//! - [`MarginRenderer`] animates the left margin of the first slide over the
//!   requested duration.
//!
//! Both land on the same resting offset.

use crate::document::{Document, ElementId};
use crate::transition::Transition;

/// Operations a rendering surface must support
pub trait RenderSink {
    /// Capability check: can the surface apply hardware-accelerated transforms
    fn supports_hardware_transforms(&self) -> bool;

    /// Set the transition duration used for transform changes on `element`
    fn set_transition_duration(&self, element: ElementId, duration_ms: u32);

    /// Apply an instantaneous horizontal translation
    fn translate_x(&self, element: ElementId, offset: f32);

    /// Animate the left margin towards `offset`
    fn animate_margin_left(&self, element: ElementId, offset: f32, transition: Transition);

    /// Turn a named style marker on or off
    fn set_marker(&self, element: ElementId, marker: &str, on: bool);

    /// Rendered width of `element`
    fn outer_width(&self, element: ElementId) -> f32;
}

impl RenderSink for Document {
    fn supports_hardware_transforms(&self) -> bool {
        self.has_hardware_transforms()
    }

    fn set_transition_duration(&self, element: ElementId, duration_ms: u32) {
        self.apply_transition_duration(element, duration_ms);
    }

    fn translate_x(&self, element: ElementId, offset: f32) {
        self.apply_translate_x(element, offset);
    }

    fn animate_margin_left(&self, element: ElementId, offset: f32, transition: Transition) {
        self.apply_margin_animation(element, offset, transition);
    }

    fn set_marker(&self, element: ElementId, marker: &str, on: bool) {
        if on {
            self.add_class(element, marker);
        } else {
            self.remove_class(element, marker);
        }
    }

    fn outer_width(&self, element: ElementId) -> f32 {
        self.width(element)
    }
}

/// Elements a slide renderer positions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlideTarget {
    /// The moving track
    pub track: ElementId,
    /// First item on the track, used by margin-based positioning
    pub first_item: Option<ElementId>,
}

/// Strategy for moving a slide track to a horizontal offset
pub trait SlideRenderer: std::fmt::Debug {
    fn render(&self, sink: &dyn RenderSink, target: SlideTarget, offset: f32, duration_ms: u32);
}

/// Positions the track with a translation
#[derive(Debug, Clone, Copy, Default)]
pub struct TransformRenderer;

impl SlideRenderer for TransformRenderer {
    fn render(&self, sink: &dyn RenderSink, target: SlideTarget, offset: f32, _duration_ms: u32) {
        sink.translate_x(target.track, offset);
    }
}

/// Positions the track by animating the first item's left margin
#[derive(Debug, Clone, Copy, Default)]
pub struct MarginRenderer;

impl SlideRenderer for MarginRenderer {
    fn render(&self, sink: &dyn RenderSink, target: SlideTarget, offset: f32, duration_ms: u32) {
        let Some(first) = target.first_item else {
            log::debug!("margin renderer has no item to move on {}", target.track);
            return;
        };
        sink.animate_margin_left(first, offset, Transition::swing(duration_ms));
    }
}

/// Pick the positioning strategy the sink supports
pub fn renderer_for(sink: &dyn RenderSink) -> Box<dyn SlideRenderer> {
    if sink.supports_hardware_transforms() {
        Box::new(TransformRenderer)
    } else {
        Box::new(MarginRenderer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Rect;

    fn setup(hardware: bool) -> (Document, SlideTarget) {
        let doc = Document::new().with_hardware_transforms(hardware);
        let track = doc.create_element(None, &["track"], Rect::default());
        let first = doc.create_element(Some(track), &["item"], Rect::default());
        (
            doc,
            SlideTarget {
                track,
                first_item: Some(first),
            },
        )
    }

    #[test]
    fn test_capability_selects_strategy() {
        let (doc, target) = setup(true);
        renderer_for(&doc).render(&doc, target, -300.0, 300);
        assert_eq!(doc.translation_x(target.track), -300.0);

        let (doc, target) = setup(false);
        renderer_for(&doc).render(&doc, target, -300.0, 300);
        assert_eq!(doc.translation_x(target.track), 0.0);
    }

    #[test]
    fn test_strategies_share_resting_position() {
        let (hw, hw_target) = setup(true);
        let (sw, sw_target) = setup(false);

        for offset in [-300.0, -600.0, -450.0] {
            TransformRenderer.render(&hw, hw_target, offset, 300);
            MarginRenderer.render(&sw, sw_target, offset, 300);
        }
        while sw.advance(16.0) {}

        let first = sw_target.first_item.map(|f| sw.margin_left(f));
        assert_eq!(Some(hw.translation_x(hw_target.track)), first);
    }

    #[test]
    fn test_margin_animation_in_flight() {
        let (doc, target) = setup(false);
        MarginRenderer.render(&doc, target, -300.0, 300);

        let first = target.first_item.unwrap_or(target.track);
        doc.advance(150.0);
        let mid = doc.margin_left(first);
        assert!(mid < 0.0 && mid > -300.0);

        // Zero duration supersedes the running animation
        MarginRenderer.render(&doc, target, -600.0, 0);
        assert_eq!(doc.margin_left(first), -600.0);
    }

    #[test]
    fn test_sink_markers() {
        let (doc, target) = setup(true);
        doc.set_marker(target.track, "is-active", true);
        assert!(doc.has_class(target.track, "is-active"));
        doc.set_marker(target.track, "is-active", false);
        assert!(!doc.has_class(target.track, "is-active"));
        RenderSink::set_transition_duration(&doc, target.track, 300);
        assert_eq!(doc.transition_duration(target.track), 300);
    }
}
