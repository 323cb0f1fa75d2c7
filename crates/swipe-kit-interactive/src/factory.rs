//! Carousel discovery
//!
//! [`CarouselFactory`] validates the options once, then mounts one
//! [`Carousel`] on every element matching the wrapper selector. A page
//! without carousels is not an error: the factory logs and stays empty.

use crate::carousel::Carousel;
use crate::error::CarouselError;
use crate::options::CarouselOptions;
use crate::toolkit::Toolkit;
use std::rc::Rc;

/// Every carousel built from one set of options
#[derive(Debug, Default)]
pub struct CarouselFactory {
    carousels: Vec<Carousel>,
}

impl CarouselFactory {
    /// Validate `options` and mount a carousel on each wrapper in the document
    ///
    /// Configuration errors are returned. Missing elements are logged and
    /// yield no carousel for the affected mount point.
    pub fn new(options: &CarouselOptions, toolkit: &Toolkit) -> Result<Self, CarouselError> {
        let config = Rc::new(options.validate()?);
        let document = &toolkit.document;

        for selector in [&config.carousel_wrapper, &config.slide_wrapper, &config.slide_list] {
            if document.query_all(selector).is_empty() {
                log::info!("{selector} not found in the document");
                return Ok(Self::default());
            }
        }

        let mut carousels = Vec::new();
        for wrapper in document.query_all(&config.carousel_wrapper) {
            match Carousel::new(wrapper, config.clone(), toolkit) {
                Ok(carousel) => carousels.push(carousel),
                Err(err) if !err.is_fatal() => log::info!("skipping carousel on {wrapper}: {err}"),
                Err(err) => return Err(err),
            }
        }

        log::debug!("mounted {} carousel(s)", carousels.len());

        Ok(Self { carousels })
    }

    pub fn carousels(&self) -> &[Carousel] {
        &self.carousels
    }

    pub fn get(&self, index: usize) -> Option<&Carousel> {
        self.carousels.get(index)
    }

    pub fn len(&self) -> usize {
        self.carousels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.carousels.is_empty()
    }

    /// Destroy every carousel; the document is left as is
    pub fn destroy(&mut self) {
        for carousel in self.carousels.drain(..) {
            carousel.destroy();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use swipe_kit::{Document, ElementId, Rect};

    fn mount_point(doc: &Document, width: f32, slides: usize) -> ElementId {
        let bounds = Rect::from_min_size([0.0, 0.0], [width, 100.0]);
        let wrapper = doc.create_element(None, &["js-carousel"], bounds);
        let viewport = doc.create_element(Some(wrapper), &["js-carouselWrapper"], bounds);
        let list = doc.create_element(Some(viewport), &["js-carousel-list"], bounds);
        for _ in 0..slides {
            doc.create_element(Some(list), &["slide"], bounds);
        }
        doc.create_element(
            Some(wrapper),
            &["js-carousel-btn", "js-carousel-btn-prev"],
            Rect::default(),
        );
        doc.create_element(
            Some(wrapper),
            &["js-carousel-btn", "js-carousel-btn-next"],
            Rect::default(),
        );
        wrapper
    }

    #[test]
    fn test_one_carousel_per_wrapper() {
        let doc = Document::new().with_hardware_transforms(true);
        let first = mount_point(&doc, 300.0, 5);
        let second = mount_point(&doc, 400.0, 2);
        let toolkit = Toolkit::new(doc);

        let factory = CarouselFactory::new(&CarouselOptions::standard(), &toolkit);
        let Ok(factory) = factory else {
            panic!("factory should build");
        };
        assert_eq!(factory.len(), 2);
        assert_eq!(factory.get(0).map(|c| c.wrapper()), Some(first));
        assert_eq!(factory.get(1).map(|c| c.wrapper()), Some(second));
        assert_eq!(factory.get(1).map(|c| c.swipe_threshold()), Some(120.0));

        // Carousels do not share state
        assert!(factory.carousels()[0].next());
        assert_eq!(factory.carousels()[1].active_index(), 0);
    }

    #[test]
    fn test_missing_option_is_fatal() {
        let doc = Document::new();
        mount_point(&doc, 300.0, 3);
        let toolkit = Toolkit::new(doc);

        let options = CarouselOptions {
            animation_duration: None,
            ..CarouselOptions::standard()
        };
        let result = CarouselFactory::new(&options, &toolkit);
        assert_eq!(
            result.map(|f| f.len()),
            Err(CarouselError::MissingOption("animationDuration"))
        );
        assert!(toolkit.events.is_empty());
    }

    #[test]
    fn test_page_without_carousel_is_empty() {
        let doc = Document::new();
        doc.create_element(None, &["content"], Rect::default());
        let toolkit = Toolkit::new(doc);

        let factory = CarouselFactory::new(&CarouselOptions::standard(), &toolkit);
        assert_eq!(factory.map(|f| f.is_empty()), Ok(true));
        assert!(toolkit.events.is_empty());
    }

    #[test]
    fn test_incomplete_mount_point_is_skipped() {
        let doc = Document::new();
        mount_point(&doc, 300.0, 3);
        // A second wrapper without its slide list
        let broken = doc.create_element(None, &["js-carousel"], Rect::default());
        doc.create_element(Some(broken), &["js-carouselWrapper"], Rect::default());
        let toolkit = Toolkit::new(doc);

        let factory = CarouselFactory::new(&CarouselOptions::standard(), &toolkit);
        assert_eq!(factory.map(|f| f.len()), Ok(1));
    }

    #[test]
    fn test_destroy_releases_everything() {
        let doc = Document::new();
        mount_point(&doc, 300.0, 3);
        mount_point(&doc, 300.0, 3);
        let toolkit = Toolkit::new(doc.clone());

        let Ok(mut factory) = CarouselFactory::new(&CarouselOptions::standard(), &toolkit) else {
            panic!("factory should build");
        };
        assert!(!toolkit.events.is_empty());

        factory.destroy();
        assert!(factory.is_empty());
        assert!(toolkit.events.is_empty());
        assert!(toolkit.gestures.is_empty());
        assert_eq!(doc.query_all(&".js-carousel-list".into()).len(), 2);
    }
}
