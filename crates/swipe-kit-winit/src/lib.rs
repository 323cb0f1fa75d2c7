//! # swipe-kit-winit
//!
//! Winit input backend for swipe-kit.
//!
//! [`WinitAdapter`] turns winit touch, mouse and resize events into
//! swipe-kit [`InputEvent`](swipe_kit::InputEvent)s aimed at the element under
//! the pointer, so widgets from `swipe-kit-interactive` can run in a winit
//! window.

mod input;

pub use input::*;

// Re-export winit types used in the adapter's public API
pub use winit::event::{ElementState, MouseButton, TouchPhase};
