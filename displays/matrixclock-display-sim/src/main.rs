//! Matrix clock display processor, simulated
//!
//! Reads command packets from stdin (or a file, FIFO or serial device given
//! with `--input`) and draws the 13×8 matrix on stdout. Logs go to stderr.
//!
//! ```text
//! matrixclock-host | matrixclock-display-sim --ansi
//! ```

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use matrixclock_display::Dispatcher;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod receiver;
mod sink;

use receiver::pump;
use sink::TerminalSink;

#[derive(Debug, Parser)]
#[command(version, about = "Simulated LED matrix for the matrix clock")]
struct Args {
    /// Read packets from this path instead of stdin
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Redraw the matrix in place with ANSI cursor movement
    #[arg(long)]
    ansi: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let input: Box<dyn Read> = match &args.input {
        Some(path) => Box::new(
            File::open(path).with_context(|| format!("failed to open {}", path.display()))?,
        ),
        None => Box::new(io::stdin().lock()),
    };

    info!(input = ?args.input, ansi = args.ansi, "Display simulator started");

    let mut dispatcher = Dispatcher::new(TerminalSink::new(io::stdout().lock(), args.ansi));
    let stats = pump(BufReader::new(input), &mut dispatcher).context("input failed")?;

    info!(
        applied = stats.applied,
        rejected = stats.rejected,
        malformed = stats.malformed,
        frames = dispatcher.sink().frames_drawn(),
        "Input closed"
    );
    Ok(())
}
