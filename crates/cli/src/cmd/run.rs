//! Relay stdin to stdout through a debouncer

use anyhow::Result;
use cli_lib::{relay, RelayOptions, Settings};
use tokio::io::BufReader;
use tracing::info;

pub async fn run(settings: &Settings, numbered: bool) -> Result<()> {
    let delay = settings.debounce.delay()?;
    info!("Relaying stdin with a {:?} quiet period", delay);

    let stats = relay(
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
        delay,
        RelayOptions { numbered },
    )
    .await?;

    info!(
        "Relay finished: {} lines read, {} emitted",
        stats.lines_read, stats.lines_emitted
    );
    Ok(())
}
