//! Collaborator traits
//!
//! These traits define the interface between the watch logic and the
//! platform: where samples come from, what time it is, and where results
//! go. The core never talks to hardware directly.

pub mod clock;
pub mod display;
pub mod haptics;
pub mod sensor;

pub use clock::Clock;
pub use display::DisplaySink;
pub use haptics::Haptics;
pub use sensor::MotionSensor;
