//! Inter-task communication channels
//!
//! Defines the static channels used for communication between Embassy tasks.
//! Uses embassy-sync primitives for safe async communication.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::mutex::Mutex;
use embassy_sync::signal::Signal;

use strider_core::motion::Sample;
use strider_display::WatchFace;

/// Channel capacity for accelerometer samples (a few batches of slack)
const SAMPLE_CHANNEL_SIZE: usize = 8;

/// Accelerometer samples from the sampler task
pub static SAMPLE_CHANNEL: Channel<CriticalSectionRawMutex, Sample, SAMPLE_CHANNEL_SIZE> =
    Channel::new();

/// Signal that a haptic pulse was requested
pub static HAPTIC_PULSE: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// Signal that the watch face changed and should be redrawn
pub static FACE_UPDATE: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// Watch face shared between the controller and display tasks
pub type SharedFace = Mutex<CriticalSectionRawMutex, WatchFace>;
