// Line-oriented driver
// Feeds newline-delimited JSON messages through a processor, one call per line

use super::pipeline::{error_report, MomentumProcessor};
use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, warn};

/// Counts reported at the end of a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub processed: usize,
    pub failed: usize,
    /// True when a failure ended the run before the input was exhausted
    pub stopped_early: bool,
}

impl RunSummary {
    pub fn succeeded(&self) -> usize {
        self.processed - self.failed
    }
}

/// Process every non-blank line from `reader`, writing one JSON line per
/// message to `writer`.
///
/// Failures are written as error reports. With `fail_fast` the run stops
/// after the first one.
pub async fn run_lines<R, W>(
    processor: &MomentumProcessor,
    mut reader: R,
    mut writer: W,
    fail_fast: bool,
) -> anyhow::Result<RunSummary>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut summary = RunSummary::default();
    let mut line = Vec::new();
    let mut line_number = 0usize;

    // Lines are read as bytes so a bad encoding fails only that message
    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line).await? == 0 {
            break;
        }
        line_number += 1;
        if line.iter().all(u8::is_ascii_whitespace) {
            continue;
        }

        summary.processed += 1;
        let output = match processor.process_bytes(&line) {
            Ok(enriched) => {
                debug!(line = line_number, "Message enriched");
                Value::from(enriched)
            }
            Err(e) => {
                summary.failed += 1;
                warn!(line = line_number, kind = %e.kind(), error = %e, "Message rejected");
                error_report(&e)
            }
        };

        let mut encoded = serde_json::to_vec(&output)?;
        encoded.push(b'\n');
        writer.write_all(&encoded).await?;

        if fail_fast && summary.failed > 0 {
            summary.stopped_early = true;
            break;
        }
    }

    writer.flush().await?;

    info!(
        processed = summary.processed,
        failed = summary.failed,
        stopped_early = summary.stopped_early,
        "Finished processing messages"
    );

    Ok(summary)
}
