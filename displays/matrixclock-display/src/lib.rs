//! LED matrix rendering for the matrix clock
//!
//! This crate provides:
//! - [`Frame`], the bit-packed pixel grid of the 13×8 matrix
//! - The 3×5 digit font
//! - [`render`] / [`clear`], pure functions from a time to a frame
//! - [`MatrixSink`], the hardware write boundary
//! - [`Dispatcher`], which validates incoming commands and feeds the sink
//!
//! # Architecture
//!
//! The display processor is a dumb terminal. It receives
//! [`DisplayCommand`](matrixclock_protocol::DisplayCommand)s from the host,
//! never trusts their contents, and keeps no state of its own between them.
//! Everything up to the sink is pure and runs unchanged in host unit tests.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod backend;
pub mod dispatch;
pub mod font;
pub mod frame;
pub mod renderer;

// Re-export key types
pub use backend::MatrixSink;
pub use dispatch::{CommandError, Dispatcher};
pub use font::Glyph;
pub use frame::{Frame, HEIGHT, WIDTH, WORDS, WORD_BITS};
pub use renderer::{clear, render};
