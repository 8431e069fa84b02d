//! Momentum processor configuration

use anyhow::{bail, Context};
use common::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Largest rounding precision accepted for `momentum_value`
pub const MAX_PRECISION: u32 = 10;

/// Top-level configuration for the processor binary
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ProcessorConfig {
    /// Reject messages that fail the built-in market-data schema
    #[serde(default)]
    pub strict_schema: bool,

    /// Momentum computation parameters
    #[serde(default)]
    pub momentum: MomentumConfig,

    /// Log output settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ProcessorConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        self.momentum.validate()?;
        self.logging.max_level()?;
        Ok(())
    }
}

/// Thresholds and fallbacks used by the momentum computation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MomentumConfig {
    /// Momentum strictly above this is a BUY (0.05 = +5%)
    #[serde(default = "default_buy_threshold")]
    pub buy_threshold: f64,

    /// Momentum strictly below this is a SELL (-0.05 = -5%)
    #[serde(default = "default_sell_threshold")]
    pub sell_threshold: f64,

    /// Current price used when a message has none
    #[serde(default = "default_price")]
    pub default_price: f64,

    /// Lookback price used when a message has none
    #[serde(default = "default_price_lookback")]
    pub default_price_lookback: f64,

    /// Symbol reported in logs when a message has none
    #[serde(default = "default_symbol")]
    pub default_symbol: String,

    /// Decimal places kept in `momentum_value`
    #[serde(default = "default_precision")]
    pub precision: u32,
}

impl Default for MomentumConfig {
    fn default() -> Self {
        Self {
            buy_threshold: default_buy_threshold(),
            sell_threshold: default_sell_threshold(),
            default_price: default_price(),
            default_price_lookback: default_price_lookback(),
            default_symbol: default_symbol(),
            precision: default_precision(),
        }
    }
}

fn default_buy_threshold() -> f64 {
    0.05
}

fn default_sell_threshold() -> f64 {
    -0.05
}

fn default_price() -> f64 {
    100.0
}

fn default_price_lookback() -> f64 {
    95.0
}

fn default_symbol() -> String {
    "UNKNOWN".to_string()
}

fn default_precision() -> u32 {
    4
}

impl MomentumConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        if !self.buy_threshold.is_finite() || !self.sell_threshold.is_finite() {
            bail!("momentum thresholds must be finite");
        }
        if self.buy_threshold < self.sell_threshold {
            bail!(
                "buy_threshold ({}) must not be below sell_threshold ({})",
                self.buy_threshold,
                self.sell_threshold
            );
        }
        if !self.default_price.is_finite() {
            bail!("default_price must be finite");
        }
        if !self.default_price_lookback.is_finite() || self.default_price_lookback == 0.0 {
            bail!("default_price_lookback must be finite and non-zero");
        }
        if self.precision > MAX_PRECISION {
            bail!("precision {} exceeds maximum of {}", self.precision, MAX_PRECISION);
        }
        Ok(())
    }
}

/// Load and validate configuration from a TOML file
pub fn load_config(path: impl AsRef<Path>) -> anyhow::Result<ProcessorConfig> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let config: ProcessorConfig = toml::from_str(&content)
        .with_context(|| format!("failed to parse config {}", path.display()))?;
    config.validate()?;
    Ok(config)
}

/// Save configuration to TOML file
pub fn save_config(config: &ProcessorConfig, path: impl AsRef<Path>) -> anyhow::Result<()> {
    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Create a default configuration file template
pub fn create_config_template(path: impl AsRef<Path>) -> anyhow::Result<()> {
    let template = "# Momentum Processor Configuration

# Reject messages whose symbol/price/price_lookback have the wrong type
strict_schema = false

[momentum]
# Momentum strictly above this is a BUY (0.05 = +5%)
buy_threshold = 0.05

# Momentum strictly below this is a SELL (-0.05 = -5%)
sell_threshold = -0.05

# Fallbacks for messages without prices
default_price = 100.0
default_price_lookback = 95.0
default_symbol = \"UNKNOWN\"

# Decimal places kept in momentum_value
precision = 4

[logging]
# trace, debug, info, warn or error
level = \"info\"
with_target = false
";

    std::fs::write(path, template)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ProcessorConfig::default();
        assert!(!config.strict_schema);
        assert_eq!(config.momentum.buy_threshold, 0.05);
        assert_eq!(config.momentum.sell_threshold, -0.05);
        assert_eq!(config.momentum.precision, 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = ProcessorConfig::default();
        let serialized = toml::to_string(&config).unwrap();
        let deserialized: ProcessorConfig = toml::from_str(&serialized).unwrap();

        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: ProcessorConfig = toml::from_str(
            "[momentum]
buy_threshold = 0.1
",
        )
        .unwrap();

        assert_eq!(config.momentum.buy_threshold, 0.1);
        assert_eq!(config.momentum.sell_threshold, -0.05);
        assert_eq!(config.momentum.default_price_lookback, 95.0);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_invalid_configs_rejected() {
        let inverted = MomentumConfig {
            buy_threshold: -0.1,
            sell_threshold: 0.1,
            ..Default::default()
        };
        assert!(inverted.validate().is_err());

        let zero_lookback = MomentumConfig {
            default_price_lookback: 0.0,
            ..Default::default()
        };
        assert!(zero_lookback.validate().is_err());

        let too_precise = MomentumConfig {
            precision: 11,
            ..Default::default()
        };
        assert!(too_precise.validate().is_err());
    }

    #[test]
    fn test_template_loads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("momentum.toml");

        create_config_template(&path).unwrap();
        let config = load_config(&path).unwrap();

        assert_eq!(config, ProcessorConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("saved.toml");

        let mut config = ProcessorConfig::default();
        config.strict_schema = true;
        config.logging.level = "debug".to_string();
        save_config(&config, &path).unwrap();

        assert_eq!(load_config(&path).unwrap(), config);
    }

    #[test]
    fn test_load_rejects_bad_log_level() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[logging]\nlevel = \"loud\"\n").unwrap();

        assert!(load_config(&path).is_err());
    }
}
