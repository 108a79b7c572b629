//! Cross-thread signals
//!
//! The console runs on a plain std thread; the tick loop runs on the
//! embassy executor. They share the clock store and this signal.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

/// Raised once by the console (`quit` or end of input) to stop the tick loop
pub static SHUTDOWN: Signal<CriticalSectionRawMutex, ()> = Signal::new();
