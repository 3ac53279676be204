//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels/signals.

pub mod controller;
pub mod display;
pub mod haptic;
pub mod sampler;
pub mod tick;

pub use controller::controller_task;
pub use display::{display_task, Lcd};
pub use haptic::haptic_task;
pub use sampler::{sampler_task, Accelerometer};
pub use tick::tick_task;
