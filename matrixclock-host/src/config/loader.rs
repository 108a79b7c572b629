//! Configuration file loading and persistence

use std::fs;
use std::io;
use std::path::PathBuf;

use embassy_time::Duration;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use matrixclock_core::config::{timezone_name, ClockConfig, HourMode, DEFAULT_TIMEZONE};
use matrixclock_core::state::ClockState;
use matrixclock_core::traits::ZoneDirectory;

/// Fastest accepted tick period
pub const MIN_TICK_INTERVAL_MS: u64 = 100;
/// Slowest accepted tick period
pub const MAX_TICK_INTERVAL_MS: u64 = 60_000;

/// Configuration persistence errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("failed to write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
}

/// `[clock]` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockSection {
    pub timezone: String,
    /// 12 or 24; anything else falls back to 24 at boot
    pub hour_mode: u8,
    pub tick_interval_ms: u64,
    pub start_running: bool,
}

impl Default for ClockSection {
    fn default() -> Self {
        Self {
            timezone: DEFAULT_TIMEZONE.into(),
            hour_mode: u8::from(HourMode::H24),
            tick_interval_ms: 1000,
            start_running: true,
        }
    }
}

/// `[transport]` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransportSection {
    /// `-` for stdout, otherwise a path (serial device, FIFO or file)
    pub output: String,
    /// Commands buffered ahead of the writer before sends fail with `Full`
    pub queue_depth: usize,
}

impl Default for TransportSection {
    fn default() -> Self {
        Self {
            output: "-".into(),
            queue_depth: 8,
        }
    }
}

/// Whole configuration file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    pub clock: ClockSection,
    pub transport: TransportSection,
}

impl HostConfig {
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Boot configuration for the clock store
    ///
    /// A timezone that no longer validates is replaced by the default.
    pub fn clock_config<Z: ZoneDirectory>(&self, zones: &Z) -> ClockConfig {
        let mut config = ClockConfig {
            hour_mode: self.hour_mode(),
            running: self.clock.start_running,
            ..ClockConfig::default()
        };

        match timezone_name(&self.clock.timezone) {
            Ok(name) if zones.contains(&name) => config.timezone = name,
            Ok(_) => warn!(
                timezone = %self.clock.timezone,
                "Unknown timezone in config, using {}", DEFAULT_TIMEZONE
            ),
            Err(e) => warn!(
                timezone = %self.clock.timezone,
                "Invalid timezone in config ({}), using {}", e, DEFAULT_TIMEZONE
            ),
        }

        config
    }

    /// Configured hour mode, or 24-hour when the stored value is invalid
    pub fn hour_mode(&self) -> HourMode {
        HourMode::try_from(self.clock.hour_mode).unwrap_or_else(|e| {
            warn!("Invalid hour mode in config ({}), using 24", e);
            HourMode::H24
        })
    }

    /// Tick period, clamped to the accepted range
    pub fn tick_interval(&self) -> Duration {
        let ms = self
            .clock
            .tick_interval_ms
            .clamp(MIN_TICK_INTERVAL_MS, MAX_TICK_INTERVAL_MS);
        if ms != self.clock.tick_interval_ms {
            warn!(
                requested = self.clock.tick_interval_ms,
                used = ms,
                "tick_interval_ms out of range, clamped"
            );
        }
        Duration::from_millis(ms)
    }

    pub fn queue_depth(&self) -> usize {
        self.transport.queue_depth.max(1)
    }
}

/// Configuration persistence manager
///
/// Owns the file path and the last loaded or saved configuration.
pub struct ConfigPersistence {
    path: PathBuf,
    config: HostConfig,
}

impl ConfigPersistence {
    /// Load configuration from `path`
    ///
    /// A missing file is not an error: defaults are used and the file is
    /// created on the first save.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();

        let config = match fs::read_to_string(&path) {
            Ok(text) => {
                debug!("Read {} bytes of TOML from {}", text.len(), path.display());
                HostConfig::from_toml(&text).map_err(|source| ConfigError::Parse {
                    path: path.clone(),
                    source,
                })?
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!("No config at {}, using defaults", path.display());
                HostConfig::default()
            }
            Err(source) => return Err(ConfigError::Read { path, source }),
        };

        log_config_summary(&config);
        Ok(Self { path, config })
    }

    pub fn config(&self) -> &HostConfig {
        &self.config
    }

    /// Record the clock's timezone and hour mode and write the file
    ///
    /// Skips the write when nothing changed.
    pub fn persist_clock(&mut self, state: &ClockState) -> Result<(), ConfigError> {
        let clock = &mut self.config.clock;
        let hour_mode = u8::from(state.hour_mode);
        if clock.timezone == state.timezone_name.as_str() && clock.hour_mode == hour_mode {
            return Ok(());
        }
        clock.timezone = state.timezone_name.as_str().into();
        clock.hour_mode = hour_mode;
        self.save()
    }

    /// Write the current configuration to disk
    ///
    /// Written to a sibling temporary file first, then renamed over the
    /// original so a crash never leaves a half-written config.
    pub fn save(&self) -> Result<(), ConfigError> {
        let text = toml::to_string_pretty(&self.config)?;
        let tmp = self.path.with_extension("toml.tmp");
        fs::write(&tmp, text)
            .and_then(|()| fs::rename(&tmp, &self.path))
            .map_err(|source| ConfigError::Write {
                path: self.path.clone(),
                source,
            })?;
        info!("Saved configuration to {}", self.path.display());
        Ok(())
    }
}

fn log_config_summary(config: &HostConfig) {
    info!(
        timezone = %config.clock.timezone,
        hour_mode = config.clock.hour_mode,
        tick_interval_ms = config.clock.tick_interval_ms,
        start_running = config.clock.start_running,
        output = %config.transport.output,
        queue_depth = config.transport.queue_depth,
        "Configuration loaded"
    );
}
