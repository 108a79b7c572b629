//! The clock state record

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::{ClockConfig, HourMode, TimezoneName};
use crate::traits::LocalTime;

use super::machine::RunState;

/// Everything an observer can ask about the clock
///
/// Serialized field names match the status shape read by the query layer:
/// `{hour, minute, second, year, month, day, running, timezoneName, hourMode}`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ClockState {
    /// 0-23, regardless of hour mode
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub year: i32,
    pub month: u8,
    pub day: u8,
    pub running: bool,
    pub timezone_name: TimezoneName,
    pub hour_mode: HourMode,
}

impl ClockState {
    /// Initial state, before the first tick has sampled the clock
    pub fn new(config: &ClockConfig) -> Self {
        Self {
            hour: 0,
            minute: 0,
            second: 0,
            year: 1970,
            month: 1,
            day: 1,
            running: config.running,
            timezone_name: config.timezone.clone(),
            hour_mode: config.hour_mode,
        }
    }

    pub fn run_state(&self) -> RunState {
        RunState::from(self.running)
    }

    /// Overwrite every time and date field from one sample
    pub fn record(&mut self, sample: &LocalTime) {
        self.year = sample.year;
        self.month = sample.month;
        self.day = sample.day;
        self.hour = sample.hour;
        self.minute = sample.minute;
        self.second = sample.second;
    }

    /// Hour as it should appear on the matrix
    pub fn display_hour(&self) -> u8 {
        self.hour_mode.display_hour(self.hour)
    }
}

impl Default for ClockState {
    fn default() -> Self {
        Self::new(&ClockConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_from_config() {
        let config = ClockConfig {
            running: false,
            hour_mode: HourMode::H12,
            ..ClockConfig::default()
        };
        let state = ClockState::new(&config);
        assert!(!state.running);
        assert_eq!(state.run_state(), RunState::Sleeping);
        assert_eq!(state.hour_mode, HourMode::H12);
        assert_eq!(state.timezone_name, config.timezone);
    }

    #[test]
    fn test_record_overwrites_all_time_fields() {
        let mut state = ClockState::default();
        let sample = LocalTime::new(2026, 10, 19, 14, 32, 10);
        state.record(&sample);
        assert_eq!(
            (state.year, state.month, state.day),
            (sample.year, sample.month, sample.day)
        );
        assert_eq!(
            (state.hour, state.minute, state.second),
            (sample.hour, sample.minute, sample.second)
        );
    }

    #[test]
    fn test_display_hour_follows_mode() {
        let mut state = ClockState::default();
        state.record(&LocalTime::new(2026, 1, 1, 0, 5, 0));
        assert_eq!(state.display_hour(), 0);
        state.hour_mode = HourMode::H12;
        assert_eq!(state.display_hour(), 12);
    }
}
