//! Host tasks
//!
//! The tick loop runs on the embassy executor; the console reads stdin on
//! its own thread. They communicate only through the clock store and the
//! shutdown signal.

pub mod console;
pub mod tick;

pub use console::spawn_console;
pub use tick::tick_loop;
