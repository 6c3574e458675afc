//! Debounce configuration
//!
//! Delays arrive as signed millisecond counts from config files,
//! environment variables, and command lines. Negative values clamp to zero.

use crate::error::{DebounceError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::warn;

/// Default quiet period
pub const DEFAULT_DELAY_MS: i64 = 300;

/// Largest accepted quiet period (one hour)
pub const MAX_DELAY_MS: i64 = 3_600_000;

/// Debounce settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebounceConfig {
    /// Quiet period in milliseconds; negative values clamp to zero
    #[serde(default = "default_delay_ms")]
    pub delay_ms: i64,
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self {
            delay_ms: DEFAULT_DELAY_MS,
        }
    }
}

fn default_delay_ms() -> i64 {
    DEFAULT_DELAY_MS
}

impl DebounceConfig {
    /// Config with the given delay
    pub fn with_delay_ms(delay_ms: i64) -> Self {
        Self { delay_ms }
    }

    /// Check the delay is within range
    ///
    /// Negative delays pass (they clamp); delays above [`MAX_DELAY_MS`] do not.
    pub fn validate(&self) -> Result<()> {
        if self.delay_ms > MAX_DELAY_MS {
            return Err(DebounceError::InvalidConfig(format!(
                "delay_ms must be at most {} (got {})",
                MAX_DELAY_MS, self.delay_ms
            )));
        }
        Ok(())
    }

    /// Effective quiet period
    pub fn delay(&self) -> Result<Duration> {
        self.validate()?;
        if self.delay_ms < 0 {
            warn!("Negative debounce delay {}ms clamped to 0ms", self.delay_ms);
        }
        Ok(delay_from_millis(self.delay_ms))
    }
}

/// Convert a signed millisecond count to a delay, clamping negatives to zero
pub fn delay_from_millis(ms: i64) -> Duration {
    Duration::from_millis(ms.max(0).unsigned_abs())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_delay() {
        let config = DebounceConfig::default();
        assert_eq!(config.delay_ms, DEFAULT_DELAY_MS);
        assert_eq!(config.delay().unwrap(), Duration::from_millis(300));
    }

    #[test]
    fn test_negative_delay_clamps_to_zero() {
        assert_eq!(delay_from_millis(-250), Duration::ZERO);
        assert_eq!(delay_from_millis(i64::MIN), Duration::ZERO);
        assert_eq!(
            DebounceConfig::with_delay_ms(-1).delay().unwrap(),
            Duration::ZERO
        );
    }

    #[test]
    fn test_delay_above_max_rejected() {
        let config = DebounceConfig::with_delay_ms(MAX_DELAY_MS + 1);
        let err = config.delay().unwrap_err();
        assert!(matches!(err, DebounceError::InvalidConfig(_)));

        assert_eq!(
            DebounceConfig::with_delay_ms(MAX_DELAY_MS).delay().unwrap(),
            Duration::from_secs(3600)
        );
    }

    #[test]
    fn test_deserialize_from_toml() {
        let config: DebounceConfig = toml::from_str("delay_ms = 125").unwrap();
        assert_eq!(config.delay().unwrap(), Duration::from_millis(125));

        let config: DebounceConfig = toml::from_str("").unwrap();
        assert_eq!(config, DebounceConfig::default());

        let config: DebounceConfig = toml::from_str("delay_ms = -40").unwrap();
        assert_eq!(config.delay().unwrap(), Duration::ZERO);
    }
}
