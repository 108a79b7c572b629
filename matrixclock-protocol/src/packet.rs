//! Packet framing for the command link.
//!
//! Packet format:
//! - START (1 byte): 0xA5 synchronization byte
//! - LENGTH (1 byte): payload length (0-8)
//! - TYPE (1 byte): message type identifier
//! - PAYLOAD (0-8 bytes): type-specific data
//! - CHECKSUM (1 byte): XOR of LENGTH, TYPE, and all PAYLOAD bytes

use heapless::Vec;

/// Packet synchronization byte
pub const PACKET_START: u8 = 0xA5;

/// Maximum payload size in bytes
pub const MAX_PAYLOAD_SIZE: usize = 8;

/// START + LENGTH + TYPE + CHECKSUM
const OVERHEAD: usize = 4;

/// Largest encoded packet
pub const MAX_PACKET_SIZE: usize = OVERHEAD + MAX_PAYLOAD_SIZE;

/// Framing errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PacketError {
    /// Payload exceeds [`MAX_PAYLOAD_SIZE`]
    PayloadTooLarge,
    /// Checksum mismatch
    InvalidChecksum,
    /// Length byte out of range, unknown type, or malformed payload
    InvalidPacket,
    /// Output buffer too small for encoding
    BufferTooSmall,
}

/// One framed message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packet {
    /// Message type identifier
    pub msg_type: u8,
    /// Payload data
    pub payload: Vec<u8, MAX_PAYLOAD_SIZE>,
}

impl Packet {
    /// Build a packet, rejecting payloads that do not fit
    pub fn new(msg_type: u8, payload: &[u8]) -> Result<Self, PacketError> {
        let payload = Vec::from_slice(payload).map_err(|_| PacketError::PayloadTooLarge)?;
        Ok(Self { msg_type, payload })
    }

    /// Build a packet with no payload
    pub fn empty(msg_type: u8) -> Self {
        Self {
            msg_type,
            payload: Vec::new(),
        }
    }

    fn checksum(length: u8, msg_type: u8, payload: &[u8]) -> u8 {
        payload.iter().fold(length ^ msg_type, |acc, byte| acc ^ byte)
    }

    /// Number of bytes [`Packet::encode`] will write
    pub fn encoded_len(&self) -> usize {
        OVERHEAD + self.payload.len()
    }

    /// Encode into `buffer`, returning the number of bytes written
    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, PacketError> {
        let len = self.encoded_len();
        let out = buffer.get_mut(..len).ok_or(PacketError::BufferTooSmall)?;

        let length = self.payload.len() as u8;
        let (header, rest) = out.split_at_mut(3);
        header.copy_from_slice(&[PACKET_START, length, self.msg_type]);
        let (body, tail) = rest.split_at_mut(self.payload.len());
        body.copy_from_slice(&self.payload);
        tail[0] = Self::checksum(length, self.msg_type, &self.payload);

        Ok(len)
    }

    /// Encode into a fixed-capacity vector
    pub fn to_bytes(&self) -> Vec<u8, MAX_PACKET_SIZE> {
        let mut buffer = [0u8; MAX_PACKET_SIZE];
        let mut bytes = Vec::new();
        // The payload is bounded by MAX_PAYLOAD_SIZE, so both steps always fit.
        if let Ok(len) = self.encode(&mut buffer) {
            let _ = bytes.extend_from_slice(&buffer[..len]);
        }
        bytes
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Sync,
    Length,
    Type,
    Payload,
    Checksum,
}

/// Streaming packet parser
///
/// Bytes may arrive one at a time and in any split; garbage between packets
/// is skipped until the next START byte.
#[derive(Debug, Clone)]
pub struct PacketParser {
    stage: Stage,
    payload: Vec<u8, MAX_PAYLOAD_SIZE>,
    length: u8,
    msg_type: u8,
}

impl Default for PacketParser {
    fn default() -> Self {
        Self::new()
    }
}

impl PacketParser {
    pub const fn new() -> Self {
        Self {
            stage: Stage::Sync,
            payload: Vec::new(),
            length: 0,
            msg_type: 0,
        }
    }

    /// Drop any partially received packet
    pub fn reset(&mut self) {
        self.stage = Stage::Sync;
        self.payload.clear();
        self.length = 0;
        self.msg_type = 0;
    }

    /// Feed one byte
    ///
    /// Returns `Ok(Some(packet))` once a packet completes, `Ok(None)` while
    /// more bytes are needed. On error the parser has already resynchronized.
    pub fn feed(&mut self, byte: u8) -> Result<Option<Packet>, PacketError> {
        match self.stage {
            Stage::Sync => {
                if byte == PACKET_START {
                    self.stage = Stage::Length;
                }
            }
            Stage::Length => {
                if byte as usize > MAX_PAYLOAD_SIZE {
                    self.reset();
                    return Err(PacketError::InvalidPacket);
                }
                self.length = byte;
                self.stage = Stage::Type;
            }
            Stage::Type => {
                self.msg_type = byte;
                self.payload.clear();
                self.stage = if self.length == 0 {
                    Stage::Checksum
                } else {
                    Stage::Payload
                };
            }
            Stage::Payload => {
                // Capacity is guaranteed by the LENGTH check above
                let _ = self.payload.push(byte);
                if self.payload.len() == self.length as usize {
                    self.stage = Stage::Checksum;
                }
            }
            Stage::Checksum => {
                let expected = Packet::checksum(self.length, self.msg_type, &self.payload);
                if byte != expected {
                    self.reset();
                    return Err(PacketError::InvalidChecksum);
                }
                let packet = Packet {
                    msg_type: self.msg_type,
                    payload: core::mem::take(&mut self.payload),
                };
                self.reset();
                return Ok(Some(packet));
            }
        }
        Ok(None)
    }
}
