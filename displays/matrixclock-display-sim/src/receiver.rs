//! Byte stream to matrix
//!
//! Feeds incoming bytes through the packet parser and hands every decoded
//! command to the dispatcher. Nothing received can stop the loop: bad
//! framing, unknown messages and out-of-range times are counted and dropped.

use std::io::{self, Read};

use matrixclock_display::{Dispatcher, MatrixSink};
use matrixclock_protocol::{DisplayCommand, PacketParser};
use tracing::{debug, warn};

/// Counters for one receive session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RxStats {
    /// Commands that produced a frame
    pub applied: u64,
    /// Commands rejected by the dispatcher
    pub rejected: u64,
    /// Packets that failed framing or decoding
    pub malformed: u64,
}

/// Receive until end of input
pub fn pump<R: Read, S: MatrixSink>(
    input: R,
    dispatcher: &mut Dispatcher<S>,
) -> io::Result<RxStats> {
    let mut parser = PacketParser::new();
    let mut stats = RxStats::default();

    for byte in input.bytes() {
        let packet = match parser.feed(byte?) {
            Ok(Some(packet)) => packet,
            Ok(None) => continue,
            Err(e) => {
                debug!(error = ?e, "dropped malformed packet");
                stats.malformed += 1;
                continue;
            }
        };

        let command = match DisplayCommand::from_packet(&packet) {
            Ok(command) => command,
            Err(e) => {
                debug!(msg_type = packet.msg_type, error = ?e, "dropped unknown packet");
                stats.malformed += 1;
                continue;
            }
        };

        match dispatcher.handle(command) {
            Ok(()) => {
                debug!(?command, "applied");
                stats.applied += 1;
            }
            Err(e) => {
                warn!(?command, error = ?e, "rejected command");
                stats.rejected += 1;
            }
        }
    }

    Ok(stats)
}
