//! Control console
//!
//! Line commands on stdin, one JSON reply per line on stderr:
//!
//! ```text
//! status               {"hour":14,"minute":32,...,"timezoneName":"Europe/Paris","hourMode":24}
//! start | stop         {"ok":true}
//! timezone             {"timezone":"Europe/Paris"}
//! timezone Asia/Dhaka  {"ok":true,"timezone":"Asia/Dhaka"}
//! hour-mode 12         {"ok":true,"hourMode":12}
//! quit                 (stops the clock)
//! ```
//!
//! End of input behaves like `quit`.

use std::io::{self, BufRead, Write};
use std::thread::{self, JoinHandle};

use embassy_sync::blocking_mutex::raw::RawMutex;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::{info, warn};

use matrixclock_core::scheduler::ClockStore;
use matrixclock_core::traits::ZoneDirectory;

use crate::channels::SHUTDOWN;
use crate::config::ConfigPersistence;

/// A parsed console line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command<'a> {
    Status,
    Start,
    Stop,
    /// Query (`None`) or change the timezone
    Timezone(Option<&'a str>),
    HourMode(u8),
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("unknown command '{0}'")]
    Unknown(String),
    #[error("'{0}' needs an argument")]
    MissingArgument(&'static str),
    #[error("hour mode must be 12 or 24, got '{0}'")]
    BadHourMode(String),
}

impl<'a> Command<'a> {
    /// Parse one line. Blank lines yield `None`.
    pub fn parse(line: &'a str) -> Result<Option<Self>, ParseError> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word {
            "" => return Ok(None),
            "status" => Command::Status,
            "start" => Command::Start,
            "stop" => Command::Stop,
            "quit" | "exit" => Command::Quit,
            "timezone" | "tz" => Command::Timezone(Some(rest).filter(|r| !r.is_empty())),
            "hour-mode" => {
                if rest.is_empty() {
                    return Err(ParseError::MissingArgument("hour-mode"));
                }
                let mode = rest
                    .parse()
                    .map_err(|_| ParseError::BadHourMode(rest.into()))?;
                Command::HourMode(mode)
            }
            other => return Err(ParseError::Unknown(other.into())),
        };
        Ok(Some(command))
    }
}

/// What the console does with a line
#[derive(Debug, PartialEq)]
pub enum Outcome {
    Reply(Value),
    Quit,
    Nothing,
}

/// Console state: the shared store plus, when configured, the file that
/// timezone and hour mode changes are saved to
pub struct Console<'a, M: RawMutex, Z> {
    store: &'a ClockStore<M, Z>,
    persistence: Option<ConfigPersistence>,
}

impl<'a, M: RawMutex, Z: ZoneDirectory> Console<'a, M, Z> {
    pub fn new(store: &'a ClockStore<M, Z>, persistence: Option<ConfigPersistence>) -> Self {
        Self { store, persistence }
    }

    pub fn handle_line(&mut self, line: &str) -> Outcome {
        match Command::parse(line) {
            Ok(Some(command)) => self.execute(command),
            Ok(None) => Outcome::Nothing,
            Err(e) => Outcome::Reply(failure(e)),
        }
    }

    pub fn execute(&mut self, command: Command<'_>) -> Outcome {
        let reply = match command {
            Command::Status => match serde_json::to_value(self.store.snapshot()) {
                Ok(status) => status,
                Err(e) => failure(e),
            },
            Command::Start => {
                self.store.start();
                info!("Clock started");
                json!({ "ok": true })
            }
            Command::Stop => {
                self.store.stop();
                info!("Clock stopped");
                json!({ "ok": true })
            }
            Command::Timezone(None) => json!({ "timezone": self.store.timezone().as_str() }),
            Command::Timezone(Some(name)) => match self.store.set_timezone(name) {
                Ok(zone) => {
                    info!(timezone = %zone, "Timezone changed");
                    self.persist();
                    json!({ "ok": true, "timezone": zone.as_str() })
                }
                Err(e) => {
                    warn!(timezone = name, error = %e, "Timezone rejected");
                    failure(e)
                }
            },
            Command::HourMode(value) => match self.store.set_hour_mode_value(value) {
                Ok(mode) => {
                    info!(hour_mode = value, "Hour mode changed");
                    self.persist();
                    json!({ "ok": true, "hourMode": u8::from(mode) })
                }
                Err(e) => failure(e),
            },
            Command::Quit => return Outcome::Quit,
        };
        Outcome::Reply(reply)
    }

    fn persist(&mut self) {
        let Some(persistence) = self.persistence.as_mut() else {
            return;
        };
        // The change is live either way; only the restart value is at risk
        if let Err(e) = persistence.persist_clock(&self.store.snapshot()) {
            warn!(error = %e, "Failed to save configuration");
        }
    }
}

fn failure(error: impl std::fmt::Display) -> Value {
    json!({ "ok": false, "error": error.to_string() })
}

/// Read commands until `quit` or end of input, then raise [`SHUTDOWN`]
pub fn run_console<R, W, M, Z>(input: R, mut replies: W, console: &mut Console<'_, M, Z>)
where
    R: BufRead,
    W: Write,
    M: RawMutex,
    Z: ZoneDirectory,
{
    for line in input.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                warn!(error = %e, "Console read failed");
                break;
            }
        };

        match console.handle_line(&line) {
            Outcome::Reply(reply) => {
                if writeln!(replies, "{reply}").is_err() {
                    break;
                }
            }
            Outcome::Quit => break,
            Outcome::Nothing => {}
        }
    }

    info!("Console closed, shutting down");
    SHUTDOWN.signal(());
}

/// Run the console on stdin/stderr in its own thread
pub fn spawn_console<M, Z>(
    store: &'static ClockStore<M, Z>,
    persistence: ConfigPersistence,
) -> io::Result<JoinHandle<()>>
where
    M: RawMutex + Sync + 'static,
    Z: ZoneDirectory + Sync + 'static,
{
    thread::Builder::new().name("console".into()).spawn(move || {
        let mut console = Console::new(store, Some(persistence));
        run_console(io::stdin().lock(), io::stderr(), &mut console);
    })
}
