//! Trailing-edge debouncing
//!
//! This crate provides:
//! - A debounce controller that collapses bursts of calls into one
//!   deferred execution with the last call's arguments
//! - A pluggable scheduler capability with a virtual clock for tests and a
//!   tokio-backed implementation for real time
//! - Configuration with a defined policy for negative delays

pub mod config;
pub mod controller;
pub mod error;
pub mod scheduler;

// Re-exports
pub use config::{delay_from_millis, DebounceConfig};
pub use controller::{debounce, DebounceState, Debouncer};
pub use error::{DebounceError, Result};
pub use scheduler::{Scheduler, Task, TimerId, TokioScheduler, VirtualScheduler};
