//! Time-of-day formatting for the clock label

use heapless::String;
use strider_core::config::ClockStyle;

/// Seconds in one day
pub const SECONDS_PER_DAY: u32 = 86_400;

/// Length of an `HH:MM` label
pub const CLOCK_TEXT_LEN: usize = 5;

/// Wall-clock time within a day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimeOfDay {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl TimeOfDay {
    /// Time of day for a count of seconds since midnight of some day
    pub fn from_epoch_seconds(seconds: u32) -> Self {
        let in_day = seconds % SECONDS_PER_DAY;
        Self {
            hour: (in_day / 3600) as u8,
            minute: ((in_day / 60) % 60) as u8,
            second: (in_day % 60) as u8,
        }
    }

    /// Hour as shown on the clock face
    pub fn display_hour(&self, style: ClockStyle) -> u8 {
        match style {
            ClockStyle::TwentyFourHour => self.hour,
            ClockStyle::TwelveHour => match self.hour % 12 {
                0 => 12,
                h => h,
            },
        }
    }

    /// Zero-padded `HH:MM`
    pub fn format(&self, style: ClockStyle) -> String<CLOCK_TEXT_LEN> {
        let hour = self.display_hour(style);
        let mut out = String::new();
        for ch in [
            digit(hour / 10),
            digit(hour % 10),
            ':',
            digit(self.minute / 10),
            digit(self.minute % 10),
        ] {
            // Capacity is exactly five characters
            let _ = out.push(ch);
        }
        out
    }
}

fn digit(value: u8) -> char {
    char::from(b'0' + value % 10)
}
