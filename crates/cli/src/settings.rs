//! Layered settings for the debounce CLI
//!
//! Sources, later wins:
//! 1. Built-in defaults
//! 2. TOML file (`--config`, or `<config dir>/debounce/config.toml`)
//! 3. `DEBOUNCE__*` environment variables (`__` separates sections)
//! 4. Command-line flags (applied by the caller)

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use debounce::DebounceConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable prefix
pub const ENV_PREFIX: &str = "DEBOUNCE";

/// Complete CLI settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Debounce behaviour
    #[serde(default)]
    pub debounce: DebounceConfig,

    /// Logging
    #[serde(default)]
    pub log: LogConfig,
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Filter directive (`RUST_LOG` takes precedence)
    #[serde(default = "default_level")]
    pub level: String,

    /// Log to this file instead of stderr
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            file: None,
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}

/// Per-user config file location
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("debounce").join("config.toml"))
}

/// Load settings from the file and process environment
///
/// An explicit path must exist; the per-user default is optional.
pub fn load(explicit: Option<&Path>) -> Result<Settings> {
    load_with_env(explicit, environment())
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

fn load_with_env(explicit: Option<&Path>, env: Environment) -> Result<Settings> {
    let mut builder = Config::builder();

    match explicit {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            builder = builder.add_source(File::from(path));
        }
        None => {
            if let Some(path) = default_config_path() {
                builder = builder.add_source(File::from(path.as_path()).required(false));
            }
        }
    }

    let settings: Settings = builder
        .add_source(env)
        .build()
        .context("Failed to load configuration")?
        .try_deserialize()
        .context("Invalid configuration")?;

    settings.debounce.validate()?;
    Ok(settings)
}
