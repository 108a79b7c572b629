//! Periodic tick
//!
//! Each tick samples the wall clock, publishes the sample to the store,
//! and decides from the run state and matrix latch which command, if any,
//! goes to the display. The channel send happens after the store lock is
//! released.

use embassy_sync::blocking_mutex::raw::RawMutex;
use matrixclock_protocol::DisplayCommand;

use super::store::{ClockStore, Published};
use crate::config::{HourMode, TimezoneName, DEFAULT_TIMEZONE};
use crate::state::{Emission, MatrixState};
use crate::traits::{
    ChannelError, CommandChannel, LocalTime, TimeError, TimeSource, ZoneDirectory,
};

/// What happened to the command a tick decided on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TickAction {
    /// Command handed to the channel
    Sent(DisplayCommand),
    /// Sleeping with the matrix already blank; nothing to send
    Quiet,
    /// The channel refused the command. The next tick sends fresh state.
    Undelivered(DisplayCommand, ChannelError),
}

/// Outcome of one tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tick {
    /// Time published to the store
    pub sample: LocalTime,
    /// Zone the sample was taken in
    pub zone: TimezoneName,
    /// The configured zone could not be sampled and the default was used
    pub fell_back: bool,
    pub action: TickAction,
}

/// Single periodic driver of the clock
///
/// Owns the time source, the channel and the matrix latch. Exactly one
/// scheduler should drive a given store.
pub struct ClockScheduler<'a, M: RawMutex, Z, T, C> {
    store: &'a ClockStore<M, Z>,
    time: T,
    channel: C,
    matrix: MatrixState,
}

impl<'a, M, Z, T, C> ClockScheduler<'a, M, Z, T, C>
where
    M: RawMutex,
    Z: ZoneDirectory,
    T: TimeSource,
    C: CommandChannel,
{
    pub fn new(store: &'a ClockStore<M, Z>, time: T, channel: C) -> Self {
        Self {
            store,
            time,
            channel,
            matrix: MatrixState::default(),
        }
    }

    /// Run one tick
    ///
    /// Fails only when neither the configured nor the default zone can be
    /// sampled; the store and the latch are then left untouched. A channel
    /// failure is not an error: it is reported in [`TickAction::Undelivered`]
    /// and the latch still advances.
    pub fn tick(&mut self) -> Result<Tick, TimeError> {
        let (sample, zone, fell_back) = self.sample()?;

        let Published { run, hour_mode } = self.store.apply_tick(&sample);

        let (emission, matrix) = self.matrix.step(run);
        self.matrix = matrix;

        let action = match command_for(emission, &sample, hour_mode) {
            None => TickAction::Quiet,
            Some(command) => match self.channel.send(command) {
                Ok(()) => TickAction::Sent(command),
                Err(err) => TickAction::Undelivered(command, err),
            },
        };

        Ok(Tick {
            sample,
            zone,
            fell_back,
            action,
        })
    }

    fn sample(&self) -> Result<(LocalTime, TimezoneName, bool), TimeError> {
        let zone = self.store.timezone();
        match self.time.now(&zone) {
            Ok(sample) => Ok((sample, zone, false)),
            Err(_) => {
                let sample = self.time.now(DEFAULT_TIMEZONE)?;
                let mut fallback = TimezoneName::new();
                let _ = fallback.push_str(DEFAULT_TIMEZONE);
                Ok((sample, fallback, true))
            }
        }
    }

    pub fn matrix_state(&self) -> MatrixState {
        self.matrix
    }

    pub fn store(&self) -> &'a ClockStore<M, Z> {
        self.store
    }

    pub fn channel(&self) -> &C {
        &self.channel
    }

    pub fn channel_mut(&mut self) -> &mut C {
        &mut self.channel
    }
}

fn command_for(emission: Emission, sample: &LocalTime, mode: HourMode) -> Option<DisplayCommand> {
    match emission {
        Emission::UpdateTime => Some(DisplayCommand::update_time(
            mode.display_hour(sample.hour),
            sample.minute,
            sample.second,
        )),
        Emission::ClearMatrix => Some(DisplayCommand::ClearMatrix),
        Emission::Nothing => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClockConfig;
    use core::cell::Cell;
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;

    struct AnyZone;

    impl ZoneDirectory for AnyZone {
        fn contains(&self, _timezone: &str) -> bool {
            true
        }
    }

    /// Clock that only knows a fixed set of zones
    struct FakeClock {
        now: Cell<LocalTime>,
        known: &'static [&'static str],
        calls: Cell<u32>,
    }

    impl FakeClock {
        fn at(hour: u8, minute: u8, second: u8) -> Self {
            Self {
                now: Cell::new(LocalTime::new(2026, 10, 19, hour, minute, second)),
                known: &["Europe/Paris", "Asia/Dhaka"],
                calls: Cell::new(0),
            }
        }

        fn set(&self, hour: u8, minute: u8, second: u8) {
            self.now.set(LocalTime::new(2026, 10, 19, hour, minute, second));
        }
    }

    impl TimeSource for FakeClock {
        fn now(&self, timezone: &str) -> Result<LocalTime, TimeError> {
            self.calls.set(self.calls.get() + 1);
            if self.known.contains(&timezone) {
                Ok(self.now.get())
            } else {
                Err(TimeError::UnknownZone)
            }
        }
    }

    #[derive(Default)]
    struct RecordingChannel {
        sent: Vec<DisplayCommand>,
        offline: bool,
    }

    impl CommandChannel for RecordingChannel {
        fn send(&mut self, command: DisplayCommand) -> Result<(), ChannelError> {
            if self.offline {
                return Err(ChannelError::Unavailable);
            }
            self.sent.push(command);
            Ok(())
        }
    }

    fn store() -> ClockStore<NoopRawMutex, AnyZone> {
        ClockStore::new(&ClockConfig::default(), AnyZone)
    }

    fn update(hour: i8, minute: i8, second: i8) -> DisplayCommand {
        DisplayCommand::UpdateTime {
            hour,
            minute,
            second,
        }
    }

    #[test]
    fn test_running_ticks_send_updates() {
        let store = store();
        let clock = FakeClock::at(14, 32, 10);
        let mut scheduler = ClockScheduler::new(&store, &clock, RecordingChannel::default());

        let tick = scheduler.tick().unwrap();
        assert_eq!(tick.action, TickAction::Sent(update(14, 32, 10)));
        assert!(!tick.fell_back);

        clock.set(14, 32, 11);
        scheduler.tick().unwrap();

        assert_eq!(
            scheduler.channel().sent,
            [update(14, 32, 10), update(14, 32, 11)]
        );
        let snapshot = store.snapshot();
        assert_eq!((snapshot.hour, snapshot.minute, snapshot.second), (14, 32, 11));
        assert_eq!((snapshot.year, snapshot.month, snapshot.day), (2026, 10, 19));
    }

    #[test]
    fn test_stop_clears_exactly_once() {
        let store = store();
        let clock = FakeClock::at(9, 5, 0);
        let mut scheduler = ClockScheduler::new(&store, &clock, RecordingChannel::default());

        scheduler.tick().unwrap();
        store.stop();

        let actions: Vec<_> = (0..4).map(|_| scheduler.tick().unwrap().action).collect();
        assert_eq!(actions[0], TickAction::Sent(DisplayCommand::ClearMatrix));
        assert!(actions[1..].iter().all(|a| *a == TickAction::Quiet));
        assert_eq!(
            scheduler.channel().sent,
            [update(9, 5, 0), DisplayCommand::ClearMatrix]
        );
        assert_eq!(scheduler.matrix_state(), MatrixState::Blank);
    }

    #[test]
    fn test_repeated_stop_clears_once() {
        let store = store();
        let clock = FakeClock::at(9, 5, 0);
        let mut scheduler = ClockScheduler::new(&store, &clock, RecordingChannel::default());
        scheduler.tick().unwrap();

        store.stop();
        scheduler.tick().unwrap();
        store.stop();
        assert_eq!(scheduler.tick().unwrap().action, TickAction::Quiet);

        let clears = scheduler
            .channel()
            .sent
            .iter()
            .filter(|c| **c == DisplayCommand::ClearMatrix)
            .count();
        assert_eq!(clears, 1);
    }

    #[test]
    fn test_sleeping_still_updates_state() {
        let store = store();
        let clock = FakeClock::at(9, 5, 0);
        let mut scheduler = ClockScheduler::new(&store, &clock, RecordingChannel::default());
        store.stop();
        scheduler.tick().unwrap();
        scheduler.tick().unwrap();

        clock.set(9, 6, 30);
        scheduler.tick().unwrap();
        assert_eq!(store.snapshot().minute, 6);
        assert_eq!(scheduler.channel().sent, [DisplayCommand::ClearMatrix]);
    }

    #[test]
    fn test_start_resumes_updates_and_rearms_clear() {
        let store = store();
        let clock = FakeClock::at(9, 5, 0);
        let mut scheduler = ClockScheduler::new(&store, &clock, RecordingChannel::default());

        store.stop();
        scheduler.tick().unwrap();
        store.start();
        clock.set(9, 5, 1);
        assert_eq!(scheduler.tick().unwrap().action, TickAction::Sent(update(9, 5, 1)));
        store.stop();
        assert_eq!(
            scheduler.tick().unwrap().action,
            TickAction::Sent(DisplayCommand::ClearMatrix)
        );
    }

    #[test]
    fn test_boot_asleep_clears_once() {
        let config = ClockConfig {
            running: false,
            ..ClockConfig::default()
        };
        let store = ClockStore::<NoopRawMutex, _>::new(&config, AnyZone);
        let clock = FakeClock::at(0, 0, 0);
        let mut scheduler = ClockScheduler::new(&store, &clock, RecordingChannel::default());

        scheduler.tick().unwrap();
        scheduler.tick().unwrap();
        assert_eq!(scheduler.channel().sent, [DisplayCommand::ClearMatrix]);
    }

    #[test]
    fn test_twelve_hour_mode() {
        let store = store();
        store.set_hour_mode(HourMode::H12);
        let clock = FakeClock::at(0, 15, 0);
        let mut scheduler = ClockScheduler::new(&store, &clock, RecordingChannel::default());

        assert_eq!(scheduler.tick().unwrap().action, TickAction::Sent(update(12, 15, 0)));
        clock.set(13, 15, 0);
        assert_eq!(scheduler.tick().unwrap().action, TickAction::Sent(update(1, 15, 0)));
        assert_eq!(store.snapshot().hour, 13);
    }

    #[test]
    fn test_unknown_zone_falls_back_to_default() {
        let store = store();
        store.set_timezone("Pacific/Nowhere").unwrap();
        let clock = FakeClock::at(8, 0, 0);
        let mut scheduler = ClockScheduler::new(&store, &clock, RecordingChannel::default());

        let tick = scheduler.tick().unwrap();
        assert!(tick.fell_back);
        assert_eq!(tick.zone.as_str(), DEFAULT_TIMEZONE);
        assert_eq!(tick.action, TickAction::Sent(update(8, 0, 0)));
        // The configured name is kept
        assert_eq!(store.timezone().as_str(), "Pacific/Nowhere");
    }

    #[test]
    fn test_time_failure_skips_tick() {
        let store = store();
        let clock = FakeClock {
            known: &[],
            ..FakeClock::at(8, 0, 0)
        };
        let mut scheduler = ClockScheduler::new(&store, &clock, RecordingChannel::default());

        assert_eq!(scheduler.tick(), Err(TimeError::UnknownZone));
        assert_eq!(clock.calls.get(), 2);
        assert!(scheduler.channel().sent.is_empty());
        assert_eq!(store.snapshot().year, 1970);
    }

    #[test]
    fn test_channel_failure_keeps_ticking() {
        let store = store();
        let clock = FakeClock::at(10, 0, 0);
        let channel = RecordingChannel {
            offline: true,
            ..RecordingChannel::default()
        };
        let mut scheduler = ClockScheduler::new(&store, &clock, channel);

        assert_eq!(
            scheduler.tick().unwrap().action,
            TickAction::Undelivered(update(10, 0, 0), ChannelError::Unavailable)
        );
        assert_eq!(store.snapshot().hour, 10);

        scheduler.channel_mut().offline = false;
        clock.set(10, 0, 1);
        assert_eq!(scheduler.tick().unwrap().action, TickAction::Sent(update(10, 0, 1)));
    }

    #[test]
    fn test_failed_clear_is_not_retried() {
        let store = store();
        let clock = FakeClock::at(10, 0, 0);
        let mut scheduler = ClockScheduler::new(&store, &clock, RecordingChannel::default());
        scheduler.tick().unwrap();

        store.stop();
        scheduler.channel_mut().offline = true;
        assert_eq!(
            scheduler.tick().unwrap().action,
            TickAction::Undelivered(DisplayCommand::ClearMatrix, ChannelError::Unavailable)
        );

        scheduler.channel_mut().offline = false;
        assert_eq!(scheduler.tick().unwrap().action, TickAction::Quiet);
    }
}
