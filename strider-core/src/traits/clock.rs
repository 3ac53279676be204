//! Wall clock trait

/// Source of wall-clock time
pub trait Clock {
    /// Current time in whole seconds
    ///
    /// Only differences matter to the reward cycle; the display treats the
    /// value modulo one day as the time of day.
    fn now_s(&self) -> u32;
}
