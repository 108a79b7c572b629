//! Periodic tick driver
//!
//! One loop, one scheduler: a tick can never start before the previous one
//! has returned. Lateness is measured against each tick's deadline, not the
//! tick body, so a slow tick and a late wakeup both reset the ticker instead
//! of bursting through the missed ticks.

use embassy_futures::select::{select, Either};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::{Duration, Instant, Ticker};
use tracing::{debug, error, info, trace, warn};

use matrixclock_core::scheduler::{ClockScheduler, Tick, TickAction};
use matrixclock_core::traits::{CommandChannel, TimeSource, ZoneDirectory};
use matrixclock_protocol::DisplayCommand;

/// Drive `scheduler` every `interval` until `shutdown` is raised
///
/// Shutdown is checked before every tick, so a raised signal stops the loop
/// without running another tick.
pub async fn tick_loop<Z, T, C>(
    mut scheduler: ClockScheduler<'_, CriticalSectionRawMutex, Z, T, C>,
    interval: Duration,
    shutdown: &Signal<CriticalSectionRawMutex, ()>,
) where
    Z: ZoneDirectory,
    T: TimeSource,
    C: CommandChannel,
{
    info!(interval_ms = interval.as_millis(), "Tick task started");

    let mut ticker = Ticker::every(interval);
    let mut deadline = Instant::now() + interval;
    let mut log = TickLog::default();

    loop {
        if let Either::First(()) = select(shutdown.wait(), ticker.next()).await {
            info!("Tick task stopping");
            return;
        }

        match scheduler.tick() {
            Ok(tick) => log.record(&tick),
            Err(e) => error!(error = ?e, "No clock sample, tick skipped"),
        }

        let now = Instant::now();
        deadline = match next_deadline(deadline, now, interval) {
            Some(next) => next,
            None => {
                warn!(
                    late_ms = now.saturating_duration_since(deadline).as_millis(),
                    "Tick loop fell behind, resetting ticker"
                );
                ticker.reset();
                now + interval
            }
        };
    }
}

/// Deadline of the tick after the one due at `deadline`
///
/// `None` when that deadline has already passed at `now`: the ticker would
/// fire it immediately, so the loop has fallen a whole period behind.
fn next_deadline(deadline: Instant, now: Instant, interval: Duration) -> Option<Instant> {
    let next = deadline + interval;
    (now < next).then_some(next)
}

/// Per-tick logging without repeating the same warning every second
#[derive(Default)]
struct TickLog {
    fell_back: bool,
    undelivered: u32,
}

impl TickLog {
    fn record(&mut self, tick: &Tick) {
        if tick.fell_back != self.fell_back {
            if tick.fell_back {
                warn!(zone = %tick.zone, "Configured timezone unavailable, using default");
            } else {
                info!(zone = %tick.zone, "Configured timezone available again");
            }
            self.fell_back = tick.fell_back;
        }

        match tick.action {
            TickAction::Sent(DisplayCommand::ClearMatrix) => info!("Matrix cleared"),
            TickAction::Sent(command) => debug!(?command, "Update sent"),
            TickAction::Quiet => trace!("Sleeping"),
            TickAction::Undelivered(command, e) => {
                self.undelivered += 1;
                warn!(
                    ?command,
                    error = ?e,
                    total = self.undelivered,
                    "Display command not delivered"
                );
            }
        }
    }
}
