//! Watch face model and rendering for Strider
//!
//! This crate provides:
//! - `GraphicsBackend` trait for pixel displays
//! - `WatchFace`, the screen model that implements the core `DisplaySink`
//! - Time-of-day formatting for the clock label
//! - `EgBackend`, a `GraphicsBackend` over any `embedded-graphics` draw target
//!
//! # Architecture
//!
//! The controller pushes classification results and clock ticks into the
//! `WatchFace`. The face only records what changed and marks itself dirty.
//! A display task later calls `render` with a backend and flushes the
//! hardware, so drawing never happens on the classification path.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod backend;
pub mod clock;
pub mod eg;
pub mod face;

// Re-export key types
pub use backend::{DisplayError, GraphicsBackend, Rect, TextAlign, TextSize};
pub use clock::TimeOfDay;
pub use eg::EgBackend;
pub use face::{WatchFace, FACE_HEIGHT, FACE_WIDTH};
