// Momentum Processing Pipeline
// Runs schema validation and momentum computation for a single message

use super::config::{MomentumConfig, ProcessorConfig};
use super::signals::MomentumGenerator;
use super::validators::{self, AcceptAll, FieldSchema, SchemaValidator};
use common::{EnrichedMessage, ProcessorError, RawMessage, Result, ValidatedMessage};
use serde_json::{json, Value};
use tracing::{error, info};

/// Validator followed by the momentum generator.
///
/// Holds no per-message state, so one processor can be shared across threads.
pub struct MomentumProcessor {
    validator: Box<dyn SchemaValidator>,
    generator: MomentumGenerator,
}

impl MomentumProcessor {
    /// Create a new processor
    pub fn new(validator: Box<dyn SchemaValidator>, config: MomentumConfig) -> Self {
        Self {
            validator,
            generator: MomentumGenerator::new(config),
        }
    }

    /// Build a processor from a loaded configuration file
    pub fn from_config(config: &ProcessorConfig) -> Self {
        let validator: Box<dyn SchemaValidator> = if config.strict_schema {
            info!("Using strict market-data schema");
            Box::new(FieldSchema::market_data())
        } else {
            Box::new(AcceptAll)
        };
        Self::new(validator, config.momentum.clone())
    }

    pub fn config(&self) -> &MomentumConfig {
        self.generator.config()
    }

    /// Check a raw message against the configured schema
    pub fn validate(&self, raw: RawMessage) -> Result<ValidatedMessage> {
        validators::validate(raw, &*self.validator)
    }

    /// Enrich a validated message with the momentum fields
    pub fn compute(&self, message: &ValidatedMessage) -> Result<EnrichedMessage> {
        self.generator.compute(message)
    }

    /// Validate then compute
    pub fn process(&self, raw: RawMessage) -> Result<EnrichedMessage> {
        let validated = self.validate(raw)?;
        self.compute(&validated)
    }

    /// Parse one JSON object and process it
    pub fn process_json(&self, text: &str) -> Result<EnrichedMessage> {
        self.process_bytes(text.as_bytes())
    }

    /// Like [`process_json`](Self::process_json), but for raw bytes that may
    /// not be valid UTF-8. Invalid encodings are reported as malformed JSON.
    pub fn process_bytes(&self, bytes: &[u8]) -> Result<EnrichedMessage> {
        let raw: RawMessage = serde_json::from_slice(bytes).map_err(|e| {
            error!(error = %e, "Malformed JSON message");
            ProcessorError::MalformedJson(e)
        })?;
        self.process(raw)
    }
}

impl Default for MomentumProcessor {
    fn default() -> Self {
        Self::new(Box::new(AcceptAll), MomentumConfig::default())
    }
}

/// JSON line reported in place of an enriched message when processing fails
pub fn error_report(error: &ProcessorError) -> Value {
    json!({
        "error": {
            "kind": error.kind().as_str(),
            "message": error.to_string(),
        }
    })
}
