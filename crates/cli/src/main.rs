//! Debounce CLI - debounce command

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cmd;

use cli_lib::{logging, settings};

/// Debounce - emit a line only after the input goes quiet
#[derive(Parser)]
#[command(name = "debounce")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Config file (default: <config dir>/debounce/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Relay stdin to stdout, writing the last line of each burst
    Run {
        /// Quiet period in milliseconds (negative values clamp to 0)
        #[arg(long, allow_negative_numbers = true)]
        delay_ms: Option<i64>,

        /// Prefix output with the input line number
        #[arg(short, long)]
        numbered: bool,
    },
    /// Show the effective configuration
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut settings = settings::load(cli.config.as_deref())?;
    if let Some(path) = &cli.log_file {
        settings.log.file = Some(path.clone());
    }
    if let Commands::Run {
        delay_ms: Some(delay_ms),
        ..
    } = &cli.command
    {
        settings.debounce.delay_ms = *delay_ms;
    }

    // Initialize tracing
    let _log_guard = logging::init(&settings.log)?;

    match cli.command {
        Commands::Run { numbered, .. } => cmd::run::run(&settings, numbered).await,
        Commands::Config => cmd::config::run(&settings, cli.config.as_deref()).await,
    }
}
