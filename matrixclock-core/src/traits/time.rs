//! Wall-clock sampling and timezone lookup

/// A civil date and time in some timezone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LocalTime {
    pub year: i32,
    /// 1-12
    pub month: u8,
    /// 1-31
    pub day: u8,
    /// 0-23
    pub hour: u8,
    /// 0-59
    pub minute: u8,
    /// 0-59
    pub second: u8,
}

impl LocalTime {
    pub const fn new(year: i32, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }
}

/// Why a time sample could not be taken
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimeError {
    /// The requested zone is not known to the source
    UnknownZone,
    /// The underlying clock could not be read
    ClockUnavailable,
}

/// Source of the current wall-clock time
pub trait TimeSource {
    /// Current time converted to `timezone`
    ///
    /// Implementations must return `hour < 24`, `minute < 60` and
    /// `second < 60`; a leap second is reported as second 59.
    fn now(&self, timezone: &str) -> Result<LocalTime, TimeError>;
}

/// Authority on which timezone names exist
pub trait ZoneDirectory {
    fn contains(&self, timezone: &str) -> bool;
}

impl<T: TimeSource + ?Sized> TimeSource for &T {
    fn now(&self, timezone: &str) -> Result<LocalTime, TimeError> {
        (**self).now(timezone)
    }
}

impl<Z: ZoneDirectory + ?Sized> ZoneDirectory for &Z {
    fn contains(&self, timezone: &str) -> bool {
        (**self).contains(timezone)
    }
}
