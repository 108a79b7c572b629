//! Bounded packet link to the display processor
//!
//! The tick loop never touches the output directly. Commands go into a
//! bounded queue and a writer thread encodes and writes them, so a slow or
//! stalled reader costs dropped commands rather than a stalled clock.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::thread::{self, JoinHandle};

use crossbeam_channel::{Receiver, Sender, TrySendError};
use tracing::{error, info, trace};

use matrixclock_core::traits::{ChannelError, CommandChannel};
use matrixclock_protocol::DisplayCommand;

/// Sending half of the link
pub struct QueuedChannel {
    tx: Sender<DisplayCommand>,
}

impl QueuedChannel {
    /// Start a writer thread draining a queue of `depth` commands into `out`
    ///
    /// The thread exits when every `QueuedChannel` is dropped or the first
    /// write fails; after that, sends report `Unavailable`.
    pub fn spawn<W>(out: W, depth: usize) -> io::Result<(Self, JoinHandle<()>)>
    where
        W: Write + Send + 'static,
    {
        let (tx, rx) = crossbeam_channel::bounded(depth.max(1));
        let handle = thread::Builder::new()
            .name("display-tx".into())
            .spawn(move || writer_loop(out, rx))?;
        Ok((Self { tx }, handle))
    }
}

impl CommandChannel for QueuedChannel {
    fn send(&mut self, command: DisplayCommand) -> Result<(), ChannelError> {
        self.tx.try_send(command).map_err(|e| match e {
            TrySendError::Full(_) => ChannelError::Full,
            TrySendError::Disconnected(_) => ChannelError::Unavailable,
        })
    }
}

fn writer_loop<W: Write>(mut out: W, rx: Receiver<DisplayCommand>) {
    info!("Display TX started");

    for command in rx {
        let bytes = command.to_packet().to_bytes();
        if let Err(e) = out.write_all(&bytes).and_then(|()| out.flush()) {
            error!(error = %e, "Display link write failed, closing");
            return;
        }
        trace!(?command, len = bytes.len(), "packet written");
    }

    info!("Display TX stopped");
}

/// Open the configured output: `-` is stdout, anything else a path
pub fn open_output(output: &str) -> io::Result<Box<dyn Write + Send>> {
    if output == "-" {
        return Ok(Box::new(io::stdout()));
    }
    let file = OpenOptions::new().create(true).append(true).open(output)?;
    Ok(Box::new(file))
}
