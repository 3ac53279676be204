//! Configuration type definitions
//!
//! These types represent the watch configuration. Defaults reproduce the
//! reference tuning: 200/200/300 step thresholds, a 168-pixel display span
//! centred on row 60, and a 5 + 5·level second reward cycle.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default per-axis step thresholds (milli-g of averaged delta)
pub const DEFAULT_THRESHOLD_X: u32 = 200;
pub const DEFAULT_THRESHOLD_Y: u32 = 200;
pub const DEFAULT_THRESHOLD_Z: u32 = 300;

/// Accelerometer reading that maps to one full display span
pub const DEFAULT_FULL_SCALE: i32 = 4000;

/// Display window height in pixels
pub const DEFAULT_WINDOW_HEIGHT: i32 = 168;

/// Height of the clock label box
pub const CLOCK_LABEL_HEIGHT: i32 = 32;

/// Maximum number of progress bar segments
pub const MAX_PROGRESS_BARS: u8 = 3;

/// Per-axis thresholds a batch delta must strictly exceed to count as a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StepThresholds {
    pub x: u32,
    pub y: u32,
    pub z: u32,
}

impl Default for StepThresholds {
    fn default() -> Self {
        Self {
            x: DEFAULT_THRESHOLD_X,
            y: DEFAULT_THRESHOLD_Y,
            z: DEFAULT_THRESHOLD_Z,
        }
    }
}

/// Mapping from vertical acceleration to the clock label's row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DisplayMapping {
    /// Row for a level wrist (zero vertical reading)
    pub origin_y: i32,
    /// Rows travelled per full-scale reading
    pub span: i32,
    /// Reading treated as 1.0 when normalizing
    pub full_scale: i32,
    /// Lowest row the label may start at (upper clamp only)
    pub max_y: i32,
}

impl Default for DisplayMapping {
    fn default() -> Self {
        Self {
            origin_y: 60,
            span: DEFAULT_WINDOW_HEIGHT,
            full_scale: DEFAULT_FULL_SCALE,
            max_y: DEFAULT_WINDOW_HEIGHT - CLOCK_LABEL_HEIGHT,
        }
    }
}

/// Reward cycle tuning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RewardPolicy {
    /// Cycle length at reward level 0 (seconds)
    pub base_cycle_s: u32,
    /// Extra cycle length per reward granted (seconds)
    pub cycle_growth_s: u32,
    /// Steps needed within a cycle to avoid a nudge
    pub min_steps: u32,
    /// Progress bar segments; levels above this render full
    pub max_bars: u8,
}

impl Default for RewardPolicy {
    fn default() -> Self {
        Self {
            base_cycle_s: 5,
            cycle_growth_s: 5,
            min_steps: 10,
            max_bars: MAX_PROGRESS_BARS,
        }
    }
}

impl RewardPolicy {
    /// Cycle length for a given reward level
    pub fn cycle_length_s(&self, reward_level: u32) -> u32 {
        self.base_cycle_s
            .saturating_add(self.cycle_growth_s.saturating_mul(reward_level))
    }
}

/// Accelerometer sampling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SamplingConfig {
    /// Sample rate in Hz
    pub rate_hz: u16,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self { rate_hz: 10 }
    }
}

impl SamplingConfig {
    /// Interval between samples in milliseconds
    pub fn interval_ms(&self) -> u32 {
        1000 / u32::from(self.rate_hz.max(1))
    }
}

/// Clock face style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ClockStyle {
    #[default]
    TwentyFourHour,
    TwelveHour,
}

/// Wall clock configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ClockConfig {
    /// 24-hour or 12-hour display
    pub style: ClockStyle,
    /// Seconds since midnight at boot
    pub epoch_offset_s: u32,
}

/// Vibration motor configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HapticConfig {
    /// Length of a short pulse in milliseconds
    pub pulse_ms: u16,
}

impl Default for HapticConfig {
    fn default() -> Self {
        Self { pulse_ms: 100 }
    }
}

/// Complete watch configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WatchConfig {
    pub thresholds: StepThresholds,
    pub display: DisplayMapping,
    pub reward: RewardPolicy,
    pub sampling: SamplingConfig,
    pub clock: ClockConfig,
    pub haptic: HapticConfig,
}

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// `display.full_scale` must be non-zero
    InvalidFullScale,
    /// `display.span` must be positive
    InvalidDisplayGeometry,
    /// `sampling.rate_hz` must be 1-100
    InvalidSampleRate,
    /// `reward.max_bars` must be non-zero
    InvalidProgressBar,
    /// `haptic.pulse_ms` must be non-zero
    InvalidPulse,
    /// The TOML text could not be parsed
    Parse(super::parse::ParseError),
}

impl From<super::parse::ParseError> for ConfigError {
    fn from(e: super::parse::ParseError) -> Self {
        ConfigError::Parse(e)
    }
}

impl WatchConfig {
    /// Check cross-field constraints
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.display.full_scale == 0 {
            return Err(ConfigError::InvalidFullScale);
        }
        if self.display.span <= 0 {
            return Err(ConfigError::InvalidDisplayGeometry);
        }
        if self.sampling.rate_hz == 0 || self.sampling.rate_hz > 100 {
            return Err(ConfigError::InvalidSampleRate);
        }
        if self.reward.max_bars == 0 {
            return Err(ConfigError::InvalidProgressBar);
        }
        if self.haptic.pulse_ms == 0 {
            return Err(ConfigError::InvalidPulse);
        }
        Ok(())
    }
}
