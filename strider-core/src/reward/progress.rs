//! Progress bar model
//!
//! One segment fills per reward granted; levels past the segment count
//! render as a full bar.

/// Segmented progress bar derived from the reward level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ProgressBar {
    filled: u8,
    segments: u8,
}

impl ProgressBar {
    /// Build the bar for a reward level
    pub fn from_level(reward_level: u32, segments: u8) -> Self {
        let filled = reward_level.min(u32::from(segments)) as u8;
        Self { filled, segments }
    }

    /// Number of filled segments
    pub const fn filled(&self) -> u8 {
        self.filled
    }

    /// Total number of segments
    pub const fn segments(&self) -> u8 {
        self.segments
    }

    /// Whether every segment is filled
    pub const fn is_full(&self) -> bool {
        self.filled >= self.segments
    }

    /// Width of the filled part for a bar `total_width` pixels wide
    pub fn fill_width(&self, total_width: u32) -> u32 {
        if self.segments == 0 {
            return 0;
        }
        total_width * u32::from(self.filled) / u32::from(self.segments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_widths_on_reference_bar() {
        let widths: [u32; 5] = core::array::from_fn(|level| {
            ProgressBar::from_level(level as u32, 3).fill_width(144)
        });
        assert_eq!(widths, [0, 48, 96, 144, 144]);
    }

    #[test]
    fn test_level_caps_at_segment_count() {
        let bar = ProgressBar::from_level(u32::MAX, 3);
        assert_eq!(bar.filled(), 3);
        assert!(bar.is_full());
    }

    #[test]
    fn test_empty_bar() {
        let bar = ProgressBar::from_level(0, 3);
        assert_eq!(bar.filled(), 0);
        assert!(!bar.is_full());
        assert_eq!(bar.segments(), 3);
    }

    #[test]
    fn test_zero_segments_never_fills() {
        assert_eq!(ProgressBar::from_level(5, 0).fill_width(144), 0);
    }
}
