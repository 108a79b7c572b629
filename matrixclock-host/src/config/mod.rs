//! Host configuration
//!
//! Loaded from a TOML file at startup. Timezone and hour mode changes made
//! at runtime are written back so they survive a restart.

pub mod loader;

pub use loader::ConfigPersistence;
