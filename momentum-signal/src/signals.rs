use serde::{Deserialize, Serialize};

pub mod momentum;

pub use momentum::{MomentumGenerator, MomentumInput};

/// Discrete trading recommendation derived from momentum
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum MomentumSignal {
    Buy,
    Sell,
    Hold,
}

impl MomentumSignal {
    /// Classify a momentum ratio. Both comparisons are strict, so a value
    /// sitting exactly on a threshold is a `Hold`.
    pub fn classify(momentum: f64, buy_threshold: f64, sell_threshold: f64) -> Self {
        if momentum > buy_threshold {
            MomentumSignal::Buy
        } else if momentum < sell_threshold {
            MomentumSignal::Sell
        } else {
            MomentumSignal::Hold
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MomentumSignal::Buy => "BUY",
            MomentumSignal::Sell => "SELL",
            MomentumSignal::Hold => "HOLD",
        }
    }
}

impl std::fmt::Display for MomentumSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for MomentumSignal {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BUY" => Ok(MomentumSignal::Buy),
            "SELL" => Ok(MomentumSignal::Sell),
            "HOLD" => Ok(MomentumSignal::Hold),
            other => Err(anyhow::anyhow!("unknown momentum signal: {other}")),
        }
    }
}

/// Result of the momentum computation for one message
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MomentumReading {
    /// Unrounded `(price - lookback) / lookback`
    pub raw_momentum: f64,
    /// Momentum rounded to the configured precision
    pub momentum_value: f64,
    pub momentum_signal: MomentumSignal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_thresholds_are_strict() {
        assert_eq!(MomentumSignal::classify(0.05, 0.05, -0.05), MomentumSignal::Hold);
        assert_eq!(MomentumSignal::classify(-0.05, 0.05, -0.05), MomentumSignal::Hold);
        assert_eq!(MomentumSignal::classify(0.0501, 0.05, -0.05), MomentumSignal::Buy);
        assert_eq!(MomentumSignal::classify(-0.0501, 0.05, -0.05), MomentumSignal::Sell);
    }

    #[test]
    fn test_signal_strings() {
        assert_eq!(MomentumSignal::Buy.to_string(), "BUY");
        assert_eq!(serde_json::to_string(&MomentumSignal::Sell).unwrap(), "\"SELL\"");
        assert_eq!("HOLD".parse::<MomentumSignal>().unwrap(), MomentumSignal::Hold);
        assert!("hold".parse::<MomentumSignal>().is_err());
    }
}
