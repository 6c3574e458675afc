//! Line relay through a debouncer
//!
//! Every input line is a call to the debouncer. Whenever the input stays
//! quiet for the delay, the last line of the burst is written out. When
//! the input closes, a pending line still settles before the relay ends.

use anyhow::{Context, Result};
use debounce::{Debouncer, TokioScheduler};
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::LocalSet;
use tracing::debug;

/// Counters for a finished relay
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RelayStats {
    /// Lines read from the input
    pub lines_read: u64,
    /// Settled lines written to the output
    pub lines_emitted: u64,
}

/// Output formatting
#[derive(Debug, Default, Clone, Copy)]
pub struct RelayOptions {
    /// Prefix each emitted line with its 1-based input line number
    pub numbered: bool,
}

/// Relay `input` to `output`, emitting only the lines that settle
///
/// Must run inside a tokio runtime, of either flavor. Deferred lines fire
/// on the relay's own thread, so lines that arrive together collapse even
/// with a zero delay.
pub async fn relay<R, W>(
    input: R,
    output: W,
    delay: Duration,
    options: RelayOptions,
) -> Result<RelayStats>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    LocalSet::new()
        .run_until(relay_lines(input, output, delay, options))
        .await
}

async fn relay_lines<R, W>(
    input: R,
    mut output: W,
    delay: Duration,
    options: RelayOptions,
) -> Result<RelayStats>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    // Fails early outside a runtime instead of panicking on first schedule
    Handle::try_current().context("Relay needs a tokio runtime")?;

    let (settled_tx, mut settled_rx) = mpsc::unbounded_channel::<(u64, String)>();

    // The channel closes once the debouncer and its pending task are gone
    let mut debouncer = Some(Debouncer::new(
        move |settled: (u64, String)| {
            if let Err(e) = settled_tx.send(settled) {
                // Receiver only goes away once the relay has returned
                debug!("Dropping settled line {}: relay finished", e.0 .0);
            }
        },
        delay,
        TokioScheduler::local(),
    ));

    let mut lines = input.lines();
    let mut stats = RelayStats::default();

    loop {
        tokio::select! {
            line = lines.next_line(), if debouncer.is_some() => {
                match line.context("Failed to read input")? {
                    Some(line) => {
                        stats.lines_read += 1;
                        if let Some(debouncer) = &debouncer {
                            debouncer.call((stats.lines_read, line));
                        }
                    }
                    None => {
                        debug!("Input closed after {} lines", stats.lines_read);
                        debouncer = None;
                    }
                }
            }
            settled = settled_rx.recv() => match settled {
                Some((number, line)) => {
                    let rendered = if options.numbered {
                        format!("{}: {}\n", number, line)
                    } else {
                        format!("{}\n", line)
                    };
                    output
                        .write_all(rendered.as_bytes())
                        .await
                        .context("Failed to write output")?;
                    output.flush().await.context("Failed to flush output")?;
                    stats.lines_emitted += 1;
                    debug!("Emitted line {}", number);
                }
                None => break,
            },
        }
    }

    Ok(stats)
}
