//! Carousel demo
//!
//! Opens a window laid out as a five slide carousel with prev/next buttons
//! along the bottom edge. Swipe with a touchscreen or click the buttons; the
//! window title shows the active slide.
//!
//! Run with `RUST_LOG=debug` to follow the gesture and carousel logs.

use std::time::Instant;
use swipe_kit::{Document, ElementId, Rect};
use swipe_kit_interactive::{CarouselFactory, CarouselOptions, Toolkit};
use swipe_kit_winit::WinitAdapter;
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

const SLIDES: usize = 5;
const BUTTON_SIZE: f32 = 48.0;

/// Elements whose bounds follow the window size
struct Layout {
    wrapper: ElementId,
    viewport: ElementId,
    list: ElementId,
    slides: Vec<ElementId>,
    prev: ElementId,
    next: ElementId,
}

impl Layout {
    fn build(doc: &Document, width: f32, height: f32) -> Self {
        let wrapper = doc.create_element(None, &["js-carousel"], Rect::default());
        let viewport = doc.create_element(Some(wrapper), &["js-carouselWrapper"], Rect::default());
        let list = doc.create_element(Some(viewport), &["js-carousel-list"], Rect::default());
        let slides = (0..SLIDES)
            .map(|_| doc.create_element(Some(list), &["slide"], Rect::default()))
            .collect();
        let prev = doc.create_element(
            Some(wrapper),
            &["js-carousel-btn", "js-carousel-btn-prev"],
            Rect::default(),
        );
        let next = doc.create_element(
            Some(wrapper),
            &["js-carousel-btn", "js-carousel-btn-next"],
            Rect::default(),
        );

        let layout = Self {
            wrapper,
            viewport,
            list,
            slides,
            prev,
            next,
        };
        layout.apply(doc, width, height);
        layout
    }

    fn apply(&self, doc: &Document, width: f32, height: f32) {
        let page = Rect::from_min_size([0.0, 0.0], [width, height]);
        let track = Rect::from_min_size([0.0, 0.0], [width, height - BUTTON_SIZE]);

        doc.set_bounds(self.wrapper, page);
        doc.set_bounds(self.viewport, track);
        doc.set_bounds(self.list, track);
        for (i, slide) in self.slides.iter().enumerate() {
            doc.set_bounds(
                *slide,
                Rect::from_min_size([i as f32 * width, 0.0], [width, height - BUTTON_SIZE]),
            );
        }
        doc.set_bounds(
            self.prev,
            Rect::from_min_size([0.0, height - BUTTON_SIZE], [BUTTON_SIZE, BUTTON_SIZE]),
        );
        doc.set_bounds(
            self.next,
            Rect::from_min_size(
                [width - BUTTON_SIZE, height - BUTTON_SIZE],
                [BUTTON_SIZE, BUTTON_SIZE],
            ),
        );
    }
}

struct Demo {
    window: Option<Window>,
    document: Document,
    toolkit: Toolkit,
    adapter: Option<WinitAdapter>,
    layout: Option<Layout>,
    factory: Option<CarouselFactory>,
    last_frame: Instant,
    /// A property animation is still running
    animating: bool,
}

impl Demo {
    fn new() -> Self {
        let document = Document::new().with_hardware_transforms(true);
        let toolkit = Toolkit::new(document.clone());
        Self {
            window: None,
            document,
            toolkit,
            adapter: None,
            layout: None,
            factory: None,
            last_frame: Instant::now(),
            animating: false,
        }
    }

    fn request_redraw(&self) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn update_title(&self) {
        let (Some(window), Some(factory)) = (&self.window, &self.factory) else {
            return;
        };
        if let Some(carousel) = factory.get(0) {
            window.set_title(&format!(
                "swipe-kit carousel - slide {} of {}",
                carousel.active_index() + 1,
                carousel.total_slides()
            ));
        }
    }
}

impl ApplicationHandler for Demo {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attributes = Window::default_attributes()
            .with_title("swipe-kit carousel")
            .with_inner_size(winit::dpi::LogicalSize::new(480.0, 320.0));

        let window = match event_loop.create_window(attributes) {
            Ok(window) => window,
            Err(err) => {
                log::error!("failed to create window: {err}");
                event_loop.exit();
                return;
            }
        };

        let scale = window.scale_factor();
        let size = window.inner_size().to_logical::<f32>(scale);
        self.layout = Some(Layout::build(&self.document, size.width, size.height));
        self.adapter =
            Some(WinitAdapter::new(self.toolkit.events.clone()).with_scale_factor(scale));

        match CarouselFactory::new(&CarouselOptions::standard(), &self.toolkit) {
            Ok(factory) => self.factory = Some(factory),
            Err(err) => {
                log::error!("carousel setup failed: {err}");
                event_loop.exit();
                return;
            }
        }

        self.window = Some(window);
        self.update_title();
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match &event {
            WindowEvent::CloseRequested => {
                if let Some(factory) = &mut self.factory {
                    factory.destroy();
                }
                event_loop.exit();
                return;
            }
            WindowEvent::Resized(physical) => {
                // Widths must be current before the carousel re-measures
                if let (Some(window), Some(layout)) = (&self.window, &self.layout) {
                    let size = physical.to_logical::<f32>(window.scale_factor());
                    layout.apply(&self.document, size.width, size.height);
                }
            }
            WindowEvent::RedrawRequested => {
                let now = Instant::now();
                let dt_ms = now.duration_since(self.last_frame).as_secs_f32() * 1000.0;
                self.last_frame = now;
                // Keep frames coming until the margin tween settles
                self.animating = self.document.advance(dt_ms);
                if self.animating {
                    self.request_redraw();
                }
            }
            _ => {}
        }

        let dispatched = self
            .adapter
            .as_mut()
            .is_some_and(|adapter| adapter.handle_window_event(&event));

        if dispatched {
            // Restart the frame clock when animating from idle
            if !self.animating {
                self.last_frame = Instant::now();
            }
            self.request_redraw();
            self.update_title();
            if let Some(layout) = &self.layout {
                log::debug!(
                    "track offset {:.1}",
                    self.document.translation_x(layout.list)
                );
            }
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut demo = Demo::new();
    event_loop.run_app(&mut demo)?;

    Ok(())
}
