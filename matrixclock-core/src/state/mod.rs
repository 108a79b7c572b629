//! Clock state and the run/sleep machine
//!
//! The run state is explicit and finite; whether the next tick updates,
//! clears or stays quiet is a pure function of it and the matrix latch.

pub mod clock;
pub mod events;
pub mod machine;

pub use clock::ClockState;
pub use events::Event;
pub use machine::{Emission, MatrixState, RunState};
