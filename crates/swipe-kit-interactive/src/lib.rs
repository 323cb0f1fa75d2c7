//! # swipe-kit-interactive
//!
//! Touch-driven widgets for swipe-kit.
//!
//! This crate provides the gesture controllers and widgets that run against
//! the element tree, event hub and render sink of the `swipe-kit` core.
//!
//! ## Gestures
//!
//! - [`TapController`] - One tap callback per physical gesture, touch or mouse
//! - [`GestureRegistry`] - Owns the tap controllers bound on a page
//!
//! ## Carousel
//!
//! - [`CarouselMachine`] - Pure paging, drag and resize state
//! - [`Carousel`] - The machine wired to a mount point in the document
//! - [`CarouselFactory`] - Mounts one carousel per matching wrapper
//! - [`CarouselOptions`] / [`CarouselConfig`] - Page bootstrap options

mod carousel;
mod error;
mod factory;
mod machine;
mod options;
mod registry;
mod tap;
mod toolkit;

// Gestures
pub use registry::*;
pub use tap::*;

// Carousel
pub use carousel::*;
pub use factory::*;
pub use machine::*;
pub use options::*;

pub use error::*;
pub use toolkit::*;
