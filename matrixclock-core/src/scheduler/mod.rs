//! Clock state ownership and the periodic tick
//!
//! [`ClockStore`] is the one shared, lock-guarded copy of the clock state;
//! any number of callers may read or reconfigure it. [`ClockScheduler`] is
//! owned by the single periodic driver and turns each tick into at most one
//! display command.

pub mod store;
pub mod tick;

pub use store::{ClockStore, Published};
pub use tick::{ClockScheduler, Tick, TickAction};
