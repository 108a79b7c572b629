//! Clock configuration
//!
//! Values the outside world may change at runtime: timezone, hour mode and
//! whether the matrix is running.

pub mod types;

pub use types::{
    timezone_name, ClockConfig, ConfigError, HourMode, TimezoneName, DEFAULT_TIMEZONE,
    MAX_TIMEZONE_LEN,
};
