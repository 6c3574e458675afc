//! Error types for debounce construction

use thiserror::Error;

/// Errors raised while setting up a debouncer
///
/// Calling a debouncer never fails; only the surrounding setup can.
#[derive(Debug, Error)]
pub enum DebounceError {
    /// No tokio runtime is available on the current thread
    #[error("no tokio runtime available: {0}")]
    NoRuntime(#[from] tokio::runtime::TryCurrentError),

    /// Configuration value out of range or malformed
    #[error("invalid debounce configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for debounce setup
pub type Result<T> = std::result::Result<T, DebounceError>;
