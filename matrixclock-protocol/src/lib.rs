//! Matrix clock command protocol
//!
//! This crate defines the one-way link between the host processor (which owns
//! the clock state) and the display processor (which drives the LED matrix).
//! Only two messages travel over it: an update carrying the time to show, and
//! a request to blank the matrix.
//!
//! # Packet Overview
//!
//! ```text
//! ┌───────┬────────┬──────┬─────────────┬──────────┐
//! │ START │ LENGTH │ TYPE │ PAYLOAD     │ CHECKSUM │
//! │ 1B    │ 1B     │ 1B   │ 0–8B        │ 1B       │
//! └───────┴────────┴──────┴─────────────┴──────────┘
//! ```
//!
//! The codec only checks framing. Whether an `UpdateTime` carries a sensible
//! time is decided on the display side, which must not trust the sender.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod command;
pub mod packet;

pub use command::{DisplayCommand, MSG_CLEAR_MATRIX, MSG_UPDATE_TIME};
pub use packet::{Packet, PacketError, PacketParser, MAX_PAYLOAD_SIZE, PACKET_START};
