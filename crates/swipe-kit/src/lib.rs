//! # swipe-kit
//!
//! Backend agnostic toolkit for touch-driven widgets.
//!
//! This crate provides the host-side plumbing the widgets in
//! `swipe-kit-interactive` run against, with zero dependencies on any
//! specific windowing library. Windowing backends like `swipe-kit-winit`
//! convert native input into [`InputEvent`]s.
//!
//! ## Element Tree
//!
//! - [`Document`] - Shared element tree with classes, bounds and driven styles
//! - [`Selector`] - Class selectors used for queries and delegated listeners
//!
//! ## Input & Events
//!
//! - [`InputEvent`] - Normalized touch, click and resize notifications
//! - [`EventHub`] - Direct, delegated and window listeners with bubbling dispatch
//!
//! ## Rendering
//!
//! - [`RenderSink`] - Commands a rendering surface must accept
//! - [`SlideRenderer`] - Transform or margin positioning, picked by capability
//! - [`Transition`] / [`Tween`] - Easing and animated scalars

mod document;
mod events;
mod input;
mod primitives;
mod render;
pub mod transition;

// Element tree
pub use document::*;
pub use primitives::*;

// Input & Events
pub use events::*;
pub use input::*;

// Rendering
pub use render::*;
pub use transition::*;
