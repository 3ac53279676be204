//! Watch coordination
//!
//! Ties the classifier to its collaborators.

pub mod controller;

pub use controller::WatchController;
