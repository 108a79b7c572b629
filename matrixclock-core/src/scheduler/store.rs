//! Shared clock state
//!
//! Every read and write of [`ClockState`] goes through one blocking mutex.
//! The lock is held only while fields are copied in or out, never across a
//! timezone lookup or a channel send.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;

use crate::config::{timezone_name, ClockConfig, ConfigError, HourMode, TimezoneName};
use crate::state::{ClockState, Event, RunState};
use crate::traits::{LocalTime, ZoneDirectory};

/// What a tick needs to know after publishing its sample
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Published {
    pub run: RunState,
    pub hour_mode: HourMode,
}

/// Lock-guarded owner of the clock state
pub struct ClockStore<M: RawMutex, Z> {
    state: Mutex<M, RefCell<ClockState>>,
    zones: Z,
}

impl<M: RawMutex, Z: ZoneDirectory> ClockStore<M, Z> {
    /// Create the store with boot-time configuration
    ///
    /// The configured timezone is trusted here; callers loading it from
    /// storage should validate it first.
    pub fn new(config: &ClockConfig, zones: Z) -> Self {
        Self {
            state: Mutex::new(RefCell::new(ClockState::new(config))),
            zones,
        }
    }

    /// Consistent copy of the whole state
    pub fn snapshot(&self) -> ClockState {
        self.state.lock(|state| state.borrow().clone())
    }

    /// Currently configured timezone
    pub fn timezone(&self) -> TimezoneName {
        self.state.lock(|state| state.borrow().timezone_name.clone())
    }

    /// Publish one tick's sample
    ///
    /// All time and date fields change together, and the run state and hour
    /// mode returned are the ones in force at that same instant.
    pub fn apply_tick(&self, sample: &LocalTime) -> Published {
        self.state.lock(|state| {
            let mut state = state.borrow_mut();
            state.record(sample);
            Published {
                run: state.run_state(),
                hour_mode: state.hour_mode,
            }
        })
    }

    /// Feed a run state event. Takes effect on the next tick.
    pub fn apply_event(&self, event: Event) -> RunState {
        self.state.lock(|state| {
            let mut state = state.borrow_mut();
            let next = state.run_state().transition(event);
            state.running = next.is_running();
            next
        })
    }

    pub fn set_running(&self, running: bool) -> RunState {
        self.apply_event(Event::for_running(running))
    }

    pub fn start(&self) -> RunState {
        self.apply_event(Event::Start)
    }

    pub fn stop(&self) -> RunState {
        self.apply_event(Event::Stop)
    }

    pub fn set_hour_mode(&self, mode: HourMode) {
        self.state.lock(|state| state.borrow_mut().hour_mode = mode);
    }

    /// Set the hour mode from its numeric form, 12 or 24
    pub fn set_hour_mode_value(&self, value: u8) -> Result<HourMode, ConfigError> {
        let mode = HourMode::try_from(value)?;
        self.set_hour_mode(mode);
        Ok(mode)
    }

    /// Switch timezone
    ///
    /// The name is checked against the zone directory before the lock is
    /// taken. On rejection the previous timezone stays in force.
    pub fn set_timezone(&self, raw: &str) -> Result<TimezoneName, ConfigError> {
        let name = timezone_name(raw)?;
        if !self.zones.contains(&name) {
            return Err(ConfigError::UnknownTimezone);
        }
        self.state
            .lock(|state| state.borrow_mut().timezone_name = name.clone());
        Ok(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_sync::blocking_mutex::raw::{CriticalSectionRawMutex, NoopRawMutex};

    struct Zones(&'static [&'static str]);

    impl ZoneDirectory for Zones {
        fn contains(&self, timezone: &str) -> bool {
            self.0.contains(&timezone)
        }
    }

    const ZONES: Zones = Zones(&["Europe/Paris", "Asia/Dhaka", "UTC"]);

    fn store() -> ClockStore<NoopRawMutex, Zones> {
        ClockStore::new(&ClockConfig::default(), ZONES)
    }

    #[test]
    fn test_apply_tick_publishes_sample_and_mode() {
        let store = store();
        let sample = LocalTime::new(2026, 10, 19, 14, 32, 10);

        let published = store.apply_tick(&sample);

        assert_eq!(published.run, RunState::Running);
        assert_eq!(published.hour_mode, HourMode::H24);
        let snapshot = store.snapshot();
        assert_eq!(
            (snapshot.hour, snapshot.minute, snapshot.second),
            (14, 32, 10)
        );
        assert_eq!((snapshot.year, snapshot.month, snapshot.day), (2026, 10, 19));
    }

    #[test]
    fn test_stop_and_start() {
        let store = store();
        assert_eq!(store.stop(), RunState::Sleeping);
        assert!(!store.snapshot().running);
        assert_eq!(store.stop(), RunState::Sleeping);
        assert_eq!(store.start(), RunState::Running);
        assert!(store.snapshot().running);
        assert_eq!(store.set_running(false), RunState::Sleeping);
    }

    #[test]
    fn test_set_timezone_accepts_known_zone() {
        let store = store();
        let name = store.set_timezone(" Asia/Dhaka ").unwrap();
        assert_eq!(name.as_str(), "Asia/Dhaka");
        assert_eq!(store.timezone().as_str(), "Asia/Dhaka");
    }

    #[test]
    fn test_set_timezone_rejection_keeps_previous() {
        let store = store();
        assert_eq!(
            store.set_timezone("Mars/Olympus_Mons"),
            Err(ConfigError::UnknownTimezone)
        );
        assert_eq!(store.set_timezone(""), Err(ConfigError::EmptyTimezone));
        assert_eq!(store.timezone().as_str(), "Europe/Paris");
    }

    #[test]
    fn test_set_hour_mode_value() {
        let store = store();
        assert_eq!(store.set_hour_mode_value(12), Ok(HourMode::H12));
        assert_eq!(store.snapshot().hour_mode, HourMode::H12);
        assert_eq!(
            store.set_hour_mode_value(7),
            Err(ConfigError::InvalidHourMode(7))
        );
        assert_eq!(store.snapshot().hour_mode, HourMode::H12);
    }

    #[test]
    fn test_snapshot_never_torn() {
        use std::sync::atomic::{AtomicBool, Ordering};
        use std::thread;

        let store: ClockStore<CriticalSectionRawMutex, Zones> =
            ClockStore::new(&ClockConfig::default(), ZONES);
        let done = AtomicBool::new(false);
        let sample = |v: u8| LocalTime::new(2000 + v as i32, 1 + v % 12, 1 + v % 28, v % 24, v, v);
        store.apply_tick(&sample(0));

        thread::scope(|scope| {
            scope.spawn(|| {
                for i in 0..20_000u32 {
                    // Every field derived from the same counter
                    store.apply_tick(&sample((i % 60) as u8));
                }
                done.store(true, Ordering::Release);
            });

            for _ in 0..3 {
                scope.spawn(|| {
                    while !done.load(Ordering::Acquire) {
                        let s = store.snapshot();
                        let v = s.second;
                        assert_eq!(s.minute, v);
                        assert_eq!(s.hour, v % 24);
                        assert_eq!(s.year, 2000 + v as i32);
                        assert_eq!(s.month, 1 + v % 12);
                        assert_eq!(s.day, 1 + v % 28);
                    }
                });
            }

            scope.spawn(|| {
                while !done.load(Ordering::Acquire) {
                    store.stop();
                    let _ = store.set_timezone("UTC");
                    store.start();
                    let _ = store.set_timezone("Europe/Paris");
                }
            });
        });

        assert_eq!(store.snapshot().second, (19_999 % 60) as u8);
    }
}
