//! Show the effective configuration

use anyhow::{Context, Result};
use cli_lib::settings::{self, Settings};
use owo_colors::OwoColorize;
use std::path::Path;

/// Print the merged settings and the delay they resolve to
pub async fn run(settings: &Settings, explicit: Option<&Path>) -> Result<()> {
    let source = match explicit {
        Some(path) => path.display().to_string(),
        None => match settings::default_config_path() {
            Some(path) if path.exists() => path.display().to_string(),
            _ => "(none, using defaults)".to_string(),
        },
    };

    println!("{}", "Effective Configuration".bold());
    println!("{}: {}\n", "Location".dimmed(), source.dimmed());

    let rendered = toml::to_string_pretty(settings)
        .context("Failed to render configuration")?;
    println!("{}", rendered.trim_end());

    let delay = settings.debounce.delay()?;
    println!("\n{}: {}ms", "Effective delay".cyan(), delay.as_millis());

    println!("\n{}", "Valid Ranges:".bold());
    println!(
        "  debounce.delay_ms: 0-{} (negative values clamp to 0)",
        debounce::config::MAX_DELAY_MS
    );

    Ok(())
}
