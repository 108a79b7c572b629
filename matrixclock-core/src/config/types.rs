//! Configuration type definitions

use core::fmt;

use heapless::String;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Longest accepted timezone name, in bytes
pub const MAX_TIMEZONE_LEN: usize = 48;

/// Zone used at boot and whenever the configured zone cannot be sampled
pub const DEFAULT_TIMEZONE: &str = "Europe/Paris";

/// IANA timezone name, e.g. `Asia/Dhaka`
pub type TimezoneName = String<MAX_TIMEZONE_LEN>;

/// Rejected configuration change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Timezone name was empty or only whitespace
    EmptyTimezone,
    /// Timezone name longer than [`MAX_TIMEZONE_LEN`]
    TimezoneTooLong,
    /// Timezone name not known to the zone directory
    UnknownTimezone,
    /// Hour mode other than 12 or 24
    InvalidHourMode(u8),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptyTimezone => f.write_str("missing timezone"),
            ConfigError::TimezoneTooLong => {
                write!(f, "timezone longer than {} bytes", MAX_TIMEZONE_LEN)
            }
            ConfigError::UnknownTimezone => {
                f.write_str("unknown timezone (use IANA format like 'Asia/Dhaka')")
            }
            ConfigError::InvalidHourMode(mode) => {
                write!(f, "hour mode must be 12 or 24, got {}", mode)
            }
        }
    }
}

/// How hours are shown on the matrix
///
/// The clock state always keeps the 24-hour value; the mode only affects the
/// hour sent to the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u8", into = "u8"))]
pub enum HourMode {
    /// 1 through 12
    H12,
    /// 0 through 23
    #[default]
    H24,
}

impl HourMode {
    /// Convert a 24-hour value (0-23) to the hour shown in this mode
    pub fn display_hour(self, hour: u8) -> u8 {
        match self {
            HourMode::H24 => hour,
            HourMode::H12 => match hour % 12 {
                0 => 12,
                h => h,
            },
        }
    }
}

impl TryFrom<u8> for HourMode {
    type Error = ConfigError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            12 => Ok(HourMode::H12),
            24 => Ok(HourMode::H24),
            other => Err(ConfigError::InvalidHourMode(other)),
        }
    }
}

impl From<HourMode> for u8 {
    fn from(mode: HourMode) -> Self {
        match mode {
            HourMode::H12 => 12,
            HourMode::H24 => 24,
        }
    }
}

/// Normalize a user-supplied timezone name
///
/// Trims surrounding whitespace and checks length. Whether the zone exists
/// is decided separately by a [`ZoneDirectory`](crate::traits::ZoneDirectory).
pub fn timezone_name(raw: &str) -> Result<TimezoneName, ConfigError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::EmptyTimezone);
    }
    let mut name = TimezoneName::new();
    name.push_str(trimmed)
        .map_err(|_| ConfigError::TimezoneTooLong)?;
    Ok(name)
}

/// Startup configuration for the clock state
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ClockConfig {
    pub timezone: TimezoneName,
    pub hour_mode: HourMode,
    /// Start in the running state (matrix lit)
    pub running: bool,
}

impl Default for ClockConfig {
    fn default() -> Self {
        let mut timezone = TimezoneName::new();
        // DEFAULT_TIMEZONE is shorter than MAX_TIMEZONE_LEN
        let _ = timezone.push_str(DEFAULT_TIMEZONE);
        Self {
            timezone,
            hour_mode: HourMode::H24,
            running: true,
        }
    }
}
