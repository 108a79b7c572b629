//! Collaborator traits
//!
//! These traits define the interface between the clock logic and the
//! platform: where time comes from, which zones exist, and how commands
//! reach the display processor.

pub mod channel;
pub mod time;

pub use channel::{ChannelError, CommandChannel};
pub use time::{LocalTime, TimeError, TimeSource, ZoneDirectory};
