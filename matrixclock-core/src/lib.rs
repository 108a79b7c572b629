//! Board-agnostic core logic for the matrix clock
//!
//! This crate contains everything on the host side that does not depend on a
//! particular operating system, clock or transport:
//!
//! - Configuration types (timezone name, 12/24 hour mode)
//! - The shared clock state and its single lock
//! - The run/sleep state machine and the matrix latch
//! - The tick scheduler that turns wall-clock samples into display commands
//! - Traits for the time source, timezone directory and command channel

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod scheduler;
pub mod state;
pub mod traits;
