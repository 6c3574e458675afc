//! Debounce CLI library
//!
//! Settings loading, logging setup, and the stdin line relay used by the
//! `debounce` binary.

pub mod logging;
pub mod relay;
pub mod settings;

// Re-exports
pub use relay::{relay, RelayOptions, RelayStats};
pub use settings::{LogConfig, Settings};
