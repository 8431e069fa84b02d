// Momentum Signal Generator
// Compares the current price with a lookback price and classifies the change

use super::{MomentumReading, MomentumSignal};
use crate::config::MomentumConfig;
use common::{EnrichedMessage, Map, ProcessorError, Result, ValidatedMessage, Value};
use rust_decimal::prelude::*;
use tracing::{debug, error, info};

const SYMBOL_FIELD: &str = "symbol";
const PRICE_FIELD: &str = "price";
const PRICE_LOOKBACK_FIELD: &str = "price_lookback";

/// Normalized, fully typed input of the momentum computation
#[derive(Debug, Clone, PartialEq)]
pub struct MomentumInput {
    pub symbol: String,
    pub price: f64,
    /// Price observed N periods ago
    pub price_lookback: f64,
}

impl MomentumInput {
    /// Read the price fields out of a validated message, filling in the
    /// configured defaults for anything that is absent.
    pub fn from_message(message: &ValidatedMessage, config: &MomentumConfig) -> Result<Self> {
        let symbol = match message.get(SYMBOL_FIELD) {
            Some(Value::String(symbol)) => symbol.clone(),
            Some(other) => other.to_string(),
            None => config.default_symbol.clone(),
        };

        let price = match message.get(PRICE_FIELD) {
            Some(value) => coerce_f64(PRICE_FIELD, value)?,
            None => config.default_price,
        };

        let price_lookback = match message.get(PRICE_LOOKBACK_FIELD) {
            Some(value) => coerce_f64(PRICE_LOOKBACK_FIELD, value)?,
            None => config.default_price_lookback,
        };

        Ok(Self {
            symbol,
            price,
            price_lookback,
        })
    }

    /// Compute and classify the momentum ratio
    pub fn reading(&self, config: &MomentumConfig) -> Result<MomentumReading> {
        if self.price_lookback == 0.0 {
            return Err(ProcessorError::DegenerateInput {
                price_lookback: self.price_lookback,
            });
        }

        let raw_momentum = (self.price - self.price_lookback) / self.price_lookback;
        if !raw_momentum.is_finite() {
            // Only reachable when the subtraction or division overflows
            return Err(ProcessorError::DegenerateInput {
                price_lookback: self.price_lookback,
            });
        }

        let momentum_signal =
            MomentumSignal::classify(raw_momentum, config.buy_threshold, config.sell_threshold);

        Ok(MomentumReading {
            raw_momentum,
            momentum_value: round_to_precision(raw_momentum, config.precision),
            momentum_signal,
        })
    }
}

/// Interpret a JSON value as a finite `f64`.
///
/// Numbers convert directly, booleans map to 1.0/0.0 and strings are parsed
/// after trimming. Everything else is rejected.
pub fn coerce_f64(field: &'static str, value: &Value) -> Result<f64> {
    let parsed = match value {
        Value::Number(number) => number.as_f64(),
        Value::Bool(flag) => Some(if *flag { 1.0 } else { 0.0 }),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    };

    match parsed {
        Some(number) if number.is_finite() => Ok(number),
        _ => Err(ProcessorError::NumericConversion {
            field,
            value: value.clone(),
        }),
    }
}

/// Round half-to-even at `precision` decimal places.
///
/// Values too large for a `Decimal` are returned unchanged; at that
/// magnitude an f64 has no fractional digits left to round.
pub fn round_to_precision(value: f64, precision: u32) -> f64 {
    Decimal::from_f64(value)
        .map(|decimal| decimal.round_dp_with_strategy(precision, RoundingStrategy::MidpointNearestEven))
        .and_then(|rounded| rounded.to_f64())
        .unwrap_or(value)
}

/// Momentum signal generator
pub struct MomentumGenerator {
    config: MomentumConfig,
}

impl MomentumGenerator {
    /// Create a new momentum generator
    pub fn new(config: MomentumConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MomentumConfig {
        &self.config
    }

    /// Enrich a validated message with `momentum_value` and `momentum_signal`
    pub fn compute(&self, message: &ValidatedMessage) -> Result<EnrichedMessage> {
        let input = MomentumInput::from_message(message, &self.config).map_err(|e| {
            error!(error = %e, "Failed to read momentum inputs");
            e
        })?;

        info!(symbol = %input.symbol, "Computing momentum signal");

        let reading = input.reading(&self.config).map_err(|e| {
            error!(symbol = %input.symbol, error = %e, "Momentum computation failed");
            e
        })?;

        debug!(
            symbol = %input.symbol,
            price = input.price,
            price_lookback = input.price_lookback,
            momentum_value = reading.momentum_value,
            momentum_signal = %reading.momentum_signal,
            "Momentum result"
        );

        let mut additions = Map::new();
        additions.insert(
            EnrichedMessage::MOMENTUM_VALUE.to_string(),
            Value::from(reading.momentum_value),
        );
        additions.insert(
            EnrichedMessage::MOMENTUM_SIGNAL.to_string(),
            Value::from(reading.momentum_signal.as_str()),
        );

        Ok(EnrichedMessage::merge(message, additions))
    }
}

impl Default for MomentumGenerator {
    fn default() -> Self {
        Self::new(MomentumConfig::default())
    }
}
