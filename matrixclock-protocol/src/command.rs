//! Commands sent from the host to the display processor

use crate::packet::{Packet, PacketError};

/// Show a time on the matrix. Payload: `[hour, minute, second]` as `i8`.
pub const MSG_UPDATE_TIME: u8 = 0x30;
/// Blank the matrix. No payload.
pub const MSG_CLEAR_MATRIX: u8 = 0x31;

/// A command for the display processor
///
/// Fields are signed and unchecked: a peer may send anything, and range
/// validation belongs to the receiving side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayCommand {
    /// Render `hour:minute`; `second` drives the separator blink
    UpdateTime { hour: i8, minute: i8, second: i8 },
    /// Turn every pixel off
    ClearMatrix,
}

impl DisplayCommand {
    /// Build an update from an already range-checked local time
    pub fn update_time(hour: u8, minute: u8, second: u8) -> Self {
        DisplayCommand::UpdateTime {
            hour: hour as i8,
            minute: minute as i8,
            second: second as i8,
        }
    }

    /// Wire message type for this command
    pub fn msg_type(&self) -> u8 {
        match self {
            DisplayCommand::UpdateTime { .. } => MSG_UPDATE_TIME,
            DisplayCommand::ClearMatrix => MSG_CLEAR_MATRIX,
        }
    }

    /// Encode this command into a packet
    pub fn to_packet(&self) -> Packet {
        let mut packet = Packet::empty(self.msg_type());
        if let DisplayCommand::UpdateTime {
            hour,
            minute,
            second,
        } = *self
        {
            // Three bytes always fit in MAX_PAYLOAD_SIZE
            let _ = packet
                .payload
                .extend_from_slice(&[hour as u8, minute as u8, second as u8]);
        }
        packet
    }

    /// Parse a command from a received packet
    pub fn from_packet(packet: &Packet) -> Result<Self, PacketError> {
        match (packet.msg_type, packet.payload.as_slice()) {
            (MSG_UPDATE_TIME, &[hour, minute, second]) => Ok(DisplayCommand::UpdateTime {
                hour: hour as i8,
                minute: minute as i8,
                second: second as i8,
            }),
            (MSG_CLEAR_MATRIX, []) => Ok(DisplayCommand::ClearMatrix),
            _ => Err(PacketError::InvalidPacket),
        }
    }
}
