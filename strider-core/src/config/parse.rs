//! Simple TOML parser for watch configuration
//!
//! This is a minimal TOML parser that handles only the subset needed for
//! `watch.toml`. It does NOT support the full TOML spec.
//!
//! Supported features:
//! - Key = value pairs (string, integer)
//! - [section] headers
//! - Comments (# ...), including trailing comments on value lines
//!
//! NOT supported:
//! - Arrays and inline tables
//! - Multi-line strings
//! - Dotted keys or dotted section headers
//!
//! Keys that are not set keep their default value.

use super::types::{ClockStyle, ConfigError, WatchConfig};

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Unknown or malformed section header
    InvalidSection,
    /// Key not recognised in its section
    InvalidKey,
    /// Value has the wrong type or is out of range
    InvalidValue,
    /// Line is neither a header nor `key = value`
    MalformedLine,
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Thresholds,
    Display,
    Reward,
    Sampling,
    Clock,
    Haptic,
}

/// Parse TOML configuration into WatchConfig
///
/// Values are range-checked against their field types only; use
/// [`load_config`] to also run [`WatchConfig::validate`].
pub fn parse_config(input: &str) -> Result<WatchConfig, ParseError> {
    let mut config = WatchConfig::default();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = strip_comment(line).trim();

        if line.is_empty() {
            continue;
        }

        if line.starts_with('[') && line.ends_with(']') {
            section = parse_section_header(&line[1..line.len() - 1])?;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ParseError::MalformedLine)?;
        apply_value(&mut config, section, key, value)?;
    }

    Ok(config)
}

/// Parse and validate a configuration
pub fn load_config(input: &str) -> Result<WatchConfig, ConfigError> {
    let config = parse_config(input)?;
    config.validate()?;
    Ok(config)
}

fn parse_section_header(header: &str) -> Result<Section, ParseError> {
    match header.trim() {
        "thresholds" => Ok(Section::Thresholds),
        "display" => Ok(Section::Display),
        "reward" => Ok(Section::Reward),
        "sampling" => Ok(Section::Sampling),
        "clock" => Ok(Section::Clock),
        "haptic" => Ok(Section::Haptic),
        _ => Err(ParseError::InvalidSection),
    }
}

/// Drop a trailing `# comment`, ignoring `#` inside quoted strings
fn strip_comment(line: &str) -> &str {
    let mut in_string = false;
    for (i, ch) in line.char_indices() {
        match ch {
            '"' => in_string = !in_string,
            '#' if !in_string => return &line[..i],
            _ => {}
        }
    }
    line
}

fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    let value = value.trim();

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

fn parse_string(value: &str) -> Result<&str, ParseError> {
    if value.starts_with('"') && value.ends_with('"') && value.len() >= 2 {
        Ok(&value[1..value.len() - 1])
    } else {
        // Allow unquoted strings for simple values
        Ok(value)
    }
}

fn parse_int<T: core::str::FromStr>(value: &str) -> Result<T, ParseError> {
    // TOML allows underscores as digit separators (e.g. 4_000)
    let mut digits: heapless::String<24> = heapless::String::new();
    for ch in value.chars().filter(|c| *c != '_') {
        digits.push(ch).map_err(|_| ParseError::InvalidValue)?;
    }
    digits.parse().map_err(|_| ParseError::InvalidValue)
}

fn parse_clock_style(value: &str) -> Result<ClockStyle, ParseError> {
    match parse_string(value)? {
        "24h" => Ok(ClockStyle::TwentyFourHour),
        "12h" => Ok(ClockStyle::TwelveHour),
        _ => Err(ParseError::InvalidValue),
    }
}

fn apply_value(
    config: &mut WatchConfig,
    section: Section,
    key: &str,
    value: &str,
) -> Result<(), ParseError> {
    match (section, key) {
        (Section::Thresholds, "x") => config.thresholds.x = parse_int(value)?,
        (Section::Thresholds, "y") => config.thresholds.y = parse_int(value)?,
        (Section::Thresholds, "z") => config.thresholds.z = parse_int(value)?,

        (Section::Display, "origin_y") => config.display.origin_y = parse_int(value)?,
        (Section::Display, "span") => config.display.span = parse_int(value)?,
        (Section::Display, "full_scale") => config.display.full_scale = parse_int(value)?,
        (Section::Display, "max_y") => config.display.max_y = parse_int(value)?,

        (Section::Reward, "base_cycle_s") => config.reward.base_cycle_s = parse_int(value)?,
        (Section::Reward, "cycle_growth_s") => config.reward.cycle_growth_s = parse_int(value)?,
        (Section::Reward, "min_steps") => config.reward.min_steps = parse_int(value)?,
        (Section::Reward, "max_bars") => config.reward.max_bars = parse_int(value)?,

        (Section::Sampling, "rate_hz") => config.sampling.rate_hz = parse_int(value)?,

        (Section::Clock, "style") => config.clock.style = parse_clock_style(value)?,
        (Section::Clock, "epoch_offset_s") => config.clock.epoch_offset_s = parse_int(value)?,

        (Section::Haptic, "pulse_ms") => config.haptic.pulse_ms = parse_int(value)?,

        _ => return Err(ParseError::InvalidKey),
    }

    Ok(())
}
