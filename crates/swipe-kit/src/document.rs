//! In-memory element tree
//!
//! The `Document` is the host-page model the widgets run against: a tree of
//! elements with class lists, absolute bounds and the handful of style
//! properties the widgets drive (transition duration, horizontal translation,
//! animated left margin). It is a cheap clonable handle; all clones share the
//! same tree.

use crate::primitives::{Point, Rect};
use crate::transition::{Transition, Tween};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// Stable identity of an element within a [`Document`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(u64);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Class selector such as `.js-carousel` or `.btn.btn-prev`
///
/// An element matches when it carries every listed class.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Selector {
    classes: Vec<String>,
}

impl Selector {
    /// Parse a selector; the leading dot is optional
    pub fn parse(source: &str) -> Self {
        let classes = source
            .split('.')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        Self { classes }
    }

    /// Selector for a single class name
    pub fn class(name: impl Into<String>) -> Self {
        Self {
            classes: vec![name.into()],
        }
    }

    /// A selector without classes never matches anything
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    fn matches(&self, classes: &[String]) -> bool {
        !self.classes.is_empty() && self.classes.iter().all(|c| classes.contains(c))
    }
}

impl From<&str> for Selector {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for class in &self.classes {
            write!(f, ".{}", class)?;
        }
        Ok(())
    }
}

/// Style properties driven by the widgets
#[derive(Debug, Clone, Default)]
pub struct ElementStyle {
    /// CSS-style transition duration applied to transform changes
    pub transition_duration_ms: u32,
    /// Hardware-accelerated horizontal translation in pixels
    pub translate_x: f32,
    /// Animated left margin (fallback positioning)
    pub margin_left: Tween,
}

#[derive(Debug, Clone)]
struct Element {
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    classes: Vec<String>,
    bounds: Rect,
    style: ElementStyle,
}

#[derive(Debug, Default)]
struct DocumentInner {
    elements: HashMap<ElementId, Element>,
    roots: Vec<ElementId>,
    next_id: u64,
    hardware_transforms: bool,
}

impl DocumentInner {
    /// Depth-first, parents before children, siblings in insertion order
    fn document_order(&self, from: &[ElementId], out: &mut Vec<ElementId>) {
        for id in from {
            out.push(*id);
            if let Some(element) = self.elements.get(id) {
                self.document_order(&element.children, out);
            }
        }
    }
}

/// Shared handle to an element tree
#[derive(Debug, Clone, Default)]
pub struct Document {
    inner: Rc<RefCell<DocumentInner>>,
}

impl Document {
    /// Create an empty document without hardware transform support
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether the surface reports hardware-accelerated transforms
    pub fn with_hardware_transforms(self, enabled: bool) -> Self {
        self.inner.borrow_mut().hardware_transforms = enabled;
        self
    }

    pub fn has_hardware_transforms(&self) -> bool {
        self.inner.borrow().hardware_transforms
    }

    /// Append a new element under `parent` (or as a root)
    pub fn create_element(
        &self,
        parent: Option<ElementId>,
        classes: &[&str],
        bounds: Rect,
    ) -> ElementId {
        let mut inner = self.inner.borrow_mut();
        let id = ElementId(inner.next_id);
        inner.next_id += 1;

        inner.elements.insert(
            id,
            Element {
                parent,
                children: Vec::new(),
                classes: classes.iter().map(|c| c.to_string()).collect(),
                bounds,
                style: ElementStyle::default(),
            },
        );

        let attached = match parent.and_then(|p| inner.elements.get_mut(&p)) {
            Some(parent) => {
                parent.children.push(id);
                true
            }
            None => false,
        };
        if !attached {
            inner.roots.push(id);
        }

        id
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.inner.borrow().elements.contains_key(&id)
    }

    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.inner.borrow().elements.get(&id).and_then(|e| e.parent)
    }

    pub fn children(&self, id: ElementId) -> Vec<ElementId> {
        self.inner
            .borrow()
            .elements
            .get(&id)
            .map(|e| e.children.clone())
            .unwrap_or_default()
    }

    /// The element followed by its ancestors up to the root
    pub fn path_to_root(&self, id: ElementId) -> Vec<ElementId> {
        let inner = self.inner.borrow();
        let mut path = Vec::new();
        let mut current = inner.elements.contains_key(&id).then_some(id);
        while let Some(el) = current {
            path.push(el);
            current = inner.elements.get(&el).and_then(|e| e.parent);
        }
        path
    }

    /// Whether the element carries every class of `selector`
    pub fn matches(&self, id: ElementId, selector: &Selector) -> bool {
        self.inner
            .borrow()
            .elements
            .get(&id)
            .is_some_and(|e| selector.matches(&e.classes))
    }

    /// All matching elements in document order
    pub fn query_all(&self, selector: &Selector) -> Vec<ElementId> {
        let inner = self.inner.borrow();
        let mut order = Vec::new();
        inner.document_order(&inner.roots, &mut order);
        order
            .into_iter()
            .filter(|id| {
                inner
                    .elements
                    .get(id)
                    .is_some_and(|e| selector.matches(&e.classes))
            })
            .collect()
    }

    /// Matching descendants of `within` (excluding `within` itself) in document order
    pub fn find(&self, within: ElementId, selector: &Selector) -> Vec<ElementId> {
        let inner = self.inner.borrow();
        let Some(root) = inner.elements.get(&within) else {
            return Vec::new();
        };
        let mut order = Vec::new();
        inner.document_order(&root.children, &mut order);
        order
            .into_iter()
            .filter(|id| {
                inner
                    .elements
                    .get(id)
                    .is_some_and(|e| selector.matches(&e.classes))
            })
            .collect()
    }

    pub fn has_class(&self, id: ElementId, class: &str) -> bool {
        self.inner
            .borrow()
            .elements
            .get(&id)
            .is_some_and(|e| e.classes.iter().any(|c| c == class))
    }

    pub fn add_class(&self, id: ElementId, class: &str) {
        if let Some(element) = self.inner.borrow_mut().elements.get_mut(&id) {
            if !element.classes.iter().any(|c| c == class) {
                element.classes.push(class.to_string());
            }
        }
    }

    pub fn remove_class(&self, id: ElementId, class: &str) {
        if let Some(element) = self.inner.borrow_mut().elements.get_mut(&id) {
            element.classes.retain(|c| c != class);
        }
    }

    pub fn bounds(&self, id: ElementId) -> Option<Rect> {
        self.inner.borrow().elements.get(&id).map(|e| e.bounds)
    }

    pub fn set_bounds(&self, id: ElementId, bounds: Rect) {
        if let Some(element) = self.inner.borrow_mut().elements.get_mut(&id) {
            element.bounds = bounds;
        }
    }

    /// Rendered width of the element, 0 for unknown ids
    pub fn width(&self, id: ElementId) -> f32 {
        self.bounds(id).map(|b| b.width()).unwrap_or(0.0)
    }

    /// Change only the width of an element (e.g. after a viewport resize)
    pub fn set_width(&self, id: ElementId, width: f32) {
        if let Some(element) = self.inner.borrow_mut().elements.get_mut(&id) {
            element.bounds = element.bounds.with_width(width);
        }
    }

    /// Snapshot of the driven style properties
    pub fn style(&self, id: ElementId) -> Option<ElementStyle> {
        self.inner.borrow().elements.get(&id).map(|e| e.style.clone())
    }

    pub fn transition_duration(&self, id: ElementId) -> u32 {
        self.style(id).map(|s| s.transition_duration_ms).unwrap_or(0)
    }

    pub fn translation_x(&self, id: ElementId) -> f32 {
        self.style(id).map(|s| s.translate_x).unwrap_or(0.0)
    }

    /// Left margin currently shown (mid-animation values included)
    pub fn margin_left(&self, id: ElementId) -> f32 {
        self.style(id).map(|s| s.margin_left.value()).unwrap_or(0.0)
    }

    pub(crate) fn apply_transition_duration(&self, id: ElementId, duration_ms: u32) {
        if let Some(element) = self.inner.borrow_mut().elements.get_mut(&id) {
            element.style.transition_duration_ms = duration_ms;
        }
    }

    pub(crate) fn apply_translate_x(&self, id: ElementId, offset: f32) {
        if let Some(element) = self.inner.borrow_mut().elements.get_mut(&id) {
            element.style.translate_x = offset;
        }
    }

    pub(crate) fn apply_margin_animation(
        &self,
        id: ElementId,
        offset: f32,
        transition: Transition,
    ) {
        if let Some(element) = self.inner.borrow_mut().elements.get_mut(&id) {
            element.style.margin_left.retarget(offset, transition);
        }
    }

    /// Step every running property animation; returns true while any is still running
    pub fn advance(&self, dt_ms: f32) -> bool {
        let mut running = false;
        for element in self.inner.borrow_mut().elements.values_mut() {
            running |= element.style.margin_left.advance(dt_ms);
        }
        running
    }

    /// Deepest element whose bounds contain `point`
    ///
    /// Later siblings are considered on top of earlier ones.
    pub fn hit_test(&self, point: Point) -> Option<ElementId> {
        let inner = self.inner.borrow();
        let mut order = Vec::new();
        inner.document_order(&inner.roots, &mut order);

        let mut deepest: Option<(usize, ElementId)> = None;
        for id in order {
            let Some(element) = inner.elements.get(&id) else {
                continue;
            };
            if !element.bounds.contains(point) {
                continue;
            }
            let depth = depth_of(&inner, id);
            if deepest.map_or(true, |(d, _)| depth >= d) {
                deepest = Some((depth, id));
            }
        }
        deepest.map(|(_, id)| id)
    }
}

fn depth_of(inner: &DocumentInner, id: ElementId) -> usize {
    let mut depth = 0;
    let mut current = inner.elements.get(&id).and_then(|e| e.parent);
    while let Some(parent) = current {
        depth += 1;
        current = inner.elements.get(&parent).and_then(|e| e.parent);
    }
    depth
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x: f32, w: f32) -> Rect {
        Rect::from_min_size([x, 0.0], [w, 100.0])
    }

    #[test]
    fn test_selector_parse() {
        let selector = Selector::parse(".js-carousel.is-wide");
        assert_eq!(selector.to_string(), ".js-carousel.is-wide");
        assert_eq!(Selector::parse("js-btn"), Selector::class("js-btn"));
        assert!(Selector::parse("").is_empty());
    }

    #[test]
    fn test_query_in_document_order() {
        let doc = Document::new();
        let a = doc.create_element(None, &["box"], rect(0.0, 10.0));
        let b = doc.create_element(Some(a), &["box", "inner"], rect(0.0, 5.0));
        let c = doc.create_element(None, &["box"], rect(20.0, 10.0));

        assert_eq!(doc.query_all(&".box".into()), vec![a, b, c]);
        assert_eq!(doc.query_all(&".box.inner".into()), vec![b]);
        assert_eq!(doc.find(a, &".box".into()), vec![b]);
        assert!(doc.query_all(&"".into()).is_empty());
    }

    #[test]
    fn test_path_to_root() {
        let doc = Document::new();
        let a = doc.create_element(None, &[], rect(0.0, 10.0));
        let b = doc.create_element(Some(a), &[], rect(0.0, 10.0));
        let c = doc.create_element(Some(b), &[], rect(0.0, 10.0));
        assert_eq!(doc.path_to_root(c), vec![c, b, a]);
        assert_eq!(doc.parent(b), Some(a));
        assert_eq!(doc.children(a), vec![b]);
    }

    #[test]
    fn test_class_toggling() {
        let doc = Document::new();
        let a = doc.create_element(None, &["btn"], rect(0.0, 10.0));
        doc.add_class(a, "is-active");
        doc.add_class(a, "is-active");
        assert!(doc.has_class(a, "is-active"));
        assert!(doc.matches(a, &".btn.is-active".into()));
        doc.remove_class(a, "is-active");
        assert!(!doc.has_class(a, "is-active"));
    }

    #[test]
    fn test_hit_test_deepest() {
        let doc = Document::new();
        let outer = doc.create_element(None, &[], rect(0.0, 300.0));
        let left = doc.create_element(Some(outer), &[], rect(0.0, 100.0));
        let right = doc.create_element(Some(outer), &[], rect(100.0, 100.0));

        assert_eq!(doc.hit_test(Point::new(50.0, 50.0)), Some(left));
        assert_eq!(doc.hit_test(Point::new(150.0, 50.0)), Some(right));
        assert_eq!(doc.hit_test(Point::new(250.0, 50.0)), Some(outer));
        assert_eq!(doc.hit_test(Point::new(350.0, 50.0)), None);
    }

    #[test]
    fn test_set_width() {
        let doc = Document::new();
        let a = doc.create_element(None, &[], rect(10.0, 300.0));
        doc.set_width(a, 200.0);
        assert_eq!(doc.width(a), 200.0);
        assert_eq!(doc.bounds(a).map(|b| b.min[0]), Some(10.0));
    }

    #[test]
    fn test_advance_runs_until_margin_settles() {
        let doc = Document::new();
        let a = doc.create_element(None, &[], rect(0.0, 300.0));
        assert!(!doc.advance(16.0));

        doc.apply_margin_animation(a, -300.0, Transition::swing(100));
        assert!(doc.advance(50.0));
        assert!((doc.margin_left(a) + 150.0).abs() < 1e-3);
        assert!(!doc.advance(50.0));
        assert_eq!(doc.margin_left(a), -300.0);
        assert!(!doc.advance(16.0));
    }
}
