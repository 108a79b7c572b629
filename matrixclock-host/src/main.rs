//! Matrix clock host service
//!
//! Owns the canonical clock state, samples the wall clock on a fixed period
//! and drives the LED matrix on the display processor with one-way command
//! packets.
//!
//! - Packets go to stdout (or the configured output) for the display link
//! - Console commands are read from stdin, replies and logs go to stderr
//!
//! ```text
//! matrixclock-host --config matrixclock.toml | matrixclock-display-sim --ansi
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use embassy_executor::Spawner;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use static_cell::StaticCell;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use matrixclock_core::scheduler::{ClockScheduler, ClockStore};

mod channels;
mod clock;
mod config;
mod tasks;
mod transport;

use crate::channels::SHUTDOWN;
use crate::clock::ChronoClock;
use crate::config::ConfigPersistence;
use crate::transport::{open_output, QueuedChannel};

/// Shared clock state, read by the console and written by the tick loop
static STORE: StaticCell<ClockStore<CriticalSectionRawMutex, ChronoClock>> = StaticCell::new();

#[derive(Debug, Parser)]
#[command(version, about = "LED matrix clock host service")]
struct Args {
    /// Configuration file; created on the first timezone or hour mode change
    #[arg(short, long, default_value = "matrixclock.toml")]
    config: PathBuf,

    /// Packet output, `-` for stdout. Overrides `[transport] output`.
    #[arg(short, long)]
    output: Option<String>,
}

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let code = match run(Args::parse()).await {
        Ok(()) => 0,
        Err(e) => {
            error!("{e:#}");
            1
        }
    };

    // The console thread may still be blocked on stdin
    std::process::exit(code);
}

async fn run(args: Args) -> anyhow::Result<()> {
    info!("Matrix clock host starting...");

    let persistence = ConfigPersistence::load(&args.config)
        .with_context(|| format!("loading {}", args.config.display()))?;
    let config = persistence.config().clone();

    let clock_config = config.clock_config(&ChronoClock);
    let store: &'static ClockStore<_, _> = STORE.init(ClockStore::new(&clock_config, ChronoClock));
    let state = store.snapshot();
    info!(
        timezone = %state.timezone_name,
        hour_mode = u8::from(state.hour_mode),
        running = state.running,
        "Clock state initialized"
    );

    let output = args.output.unwrap_or_else(|| config.transport.output.clone());
    let out = open_output(&output).with_context(|| format!("opening output {output}"))?;
    let (channel, writer) =
        QueuedChannel::spawn(out, config.queue_depth()).context("starting display TX")?;
    info!(output = %output, "Display link ready");

    tasks::spawn_console(store, persistence).context("starting console")?;

    let scheduler = ClockScheduler::new(store, ChronoClock, channel);
    tasks::tick_loop(scheduler, config.tick_interval(), &SHUTDOWN).await;

    // The scheduler owned the only sender; the writer drains and exits
    if writer.join().is_err() {
        warn!("Display TX thread panicked");
    }

    info!("Matrix clock host stopped");
    Ok(())
}
