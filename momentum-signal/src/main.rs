use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use common::init_logging;
use momentum_signal::{load_config, run_lines, MomentumProcessor, ProcessorConfig};
use tokio::io::{self, AsyncBufRead, BufReader};
use tracing::info;

#[derive(Debug, Parser)]
#[command(
    name = "momentum-processor",
    version,
    about = "Enrich newline-delimited market-data messages with a momentum signal"
)]
struct Cli {
    /// Read messages from this file instead of stdin.
    #[arg(long)]
    input: Option<PathBuf>,
    /// Path to a TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Reject messages that fail the built-in market-data schema.
    #[arg(long)]
    strict_schema: bool,
    /// Override the configured log level (trace, debug, info, warn, error).
    #[arg(long)]
    log_level: Option<String>,
    /// Stop at the first message that fails.
    #[arg(long)]
    fail_fast: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ProcessorConfig::default(),
    };
    if cli.strict_schema {
        config.strict_schema = true;
    }
    if let Some(level) = &cli.log_level {
        config.logging.level = level.clone();
    }

    init_logging(&config.logging)?;
    info!("Starting momentum processor");

    let processor = MomentumProcessor::from_config(&config);
    let reader: Box<dyn AsyncBufRead + Unpin> = match &cli.input {
        Some(path) => {
            let file = tokio::fs::File::open(path)
                .await
                .with_context(|| format!("failed to open {}", path.display()))?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(BufReader::new(io::stdin())),
    };

    let summary = run_lines(&processor, reader, io::stdout(), cli.fail_fast).await?;

    if summary.failed > 0 {
        bail!(
            "{} of {} messages failed",
            summary.failed,
            summary.processed
        );
    }

    Ok(())
}
