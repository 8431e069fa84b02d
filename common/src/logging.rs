//! Logging bootstrap for binaries
//!
//! Libraries only emit `tracing` events; installing a subscriber is left to
//! the process that owns `main`.

use anyhow::{anyhow, Context};
use serde::{Deserialize, Serialize};
use tracing::Level;

/// Logging section of a service configuration file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// Maximum level emitted (trace, debug, info, warn, error)
    #[serde(default = "default_level")]
    pub level: String,

    /// Include the event target (module path) in each line
    #[serde(default)]
    pub with_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            with_target: false,
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}

impl LoggingConfig {
    /// Parse the configured level
    pub fn max_level(&self) -> anyhow::Result<Level> {
        parse_level(&self.level)
    }
}

pub fn parse_level(level: &str) -> anyhow::Result<Level> {
    level
        .trim()
        .parse::<Level>()
        .with_context(|| format!("unknown log level: {level:?}"))
}

/// Install a global fmt subscriber writing to stderr.
///
/// stdout is reserved for message output.
pub fn init_logging(config: &LoggingConfig) -> anyhow::Result<()> {
    let level = config.max_level()?;

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(config.with_target)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!("failed to install tracing subscriber: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, "info");
        assert_eq!(config.max_level().unwrap(), Level::INFO);
    }

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("debug").unwrap(), Level::DEBUG);
        assert_eq!(parse_level(" WARN ").unwrap(), Level::WARN);
        assert!(parse_level("verbose").is_err());
    }
}
