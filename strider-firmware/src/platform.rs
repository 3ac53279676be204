//! Platform implementations of the core collaborator traits

use embassy_time::Instant;
use strider_core::traits::{Clock, Haptics};

use crate::channels::HAPTIC_PULSE;

/// Wall clock backed by the embassy time driver
///
/// Counts seconds since boot; the watch face adds the configured offset.
pub struct UptimeClock;

impl Clock for UptimeClock {
    fn now_s(&self) -> u32 {
        Instant::now().as_secs() as u32
    }
}

/// Haptics that hand pulses to the haptic task
///
/// A request while a pulse is pending is merged into it.
pub struct SignalHaptics;

impl Haptics for SignalHaptics {
    fn short_pulse(&mut self) {
        HAPTIC_PULSE.signal(());
    }
}
