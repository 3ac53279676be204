//! Haptic feedback trait

/// Vibration output
///
/// Fire-and-forget: implementations that cannot pulse (motor busy, link
/// down) drop the request silently.
pub trait Haptics {
    /// Request one short vibration pulse
    fn short_pulse(&mut self);
}
