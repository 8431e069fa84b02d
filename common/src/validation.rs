// Schema Validators
// Gate raw messages before they reach the momentum computation

use crate::error::{ProcessorError, Result};
use crate::message::{RawMessage, ValidatedMessage};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::{debug, error};

/// Predicate deciding whether a raw message has an acceptable shape
pub trait SchemaValidator: Send + Sync {
    fn is_valid(&self, message: &RawMessage) -> bool;
}

impl<F> SchemaValidator for F
where
    F: Fn(&RawMessage) -> bool + Send + Sync,
{
    fn is_valid(&self, message: &RawMessage) -> bool {
        self(message)
    }
}

/// Check `raw` against `validator`, handing it back as a [`ValidatedMessage`].
///
/// The mapping is passed through as-is; validation never normalizes.
pub fn validate<V>(raw: RawMessage, validator: &V) -> Result<ValidatedMessage>
where
    V: SchemaValidator + ?Sized,
{
    debug!(fields = raw.len(), "Validating message schema");

    if !validator.is_valid(&raw) {
        error!(payload = ?raw, "Invalid message schema");
        return Err(ProcessorError::SchemaValidation { message: raw });
    }

    Ok(ValidatedMessage::assume_valid(raw))
}

/// Accepts every mapping
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl SchemaValidator for AcceptAll {
    fn is_valid(&self, _message: &RawMessage) -> bool {
        true
    }
}

/// Expected JSON type of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    String,
    Number,
    /// A JSON number, or a string that parses as a finite number
    NumberOrNumericString,
    Any,
}

impl FieldType {
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            FieldType::String => value.is_string(),
            FieldType::Number => value.is_number(),
            FieldType::NumberOrNumericString => match value {
                Value::Number(_) => true,
                Value::String(text) => text
                    .trim()
                    .parse::<f64>()
                    .map(f64::is_finite)
                    .unwrap_or(false),
                _ => false,
            },
            FieldType::Any => true,
        }
    }
}

/// Declarative schema: required keys plus type rules for keys that are present
#[derive(Debug, Clone, Default)]
pub struct FieldSchema {
    required: Vec<String>,
    types: BTreeMap<String, FieldType>,
}

impl FieldSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schema for market-data messages. All fields are optional, but when
    /// present `symbol` must be a string and prices must be numeric.
    pub fn market_data() -> Self {
        Self::new()
            .field("symbol", FieldType::String)
            .field("price", FieldType::NumberOrNumericString)
            .field("price_lookback", FieldType::NumberOrNumericString)
    }

    /// Require `key` to be present
    pub fn require(mut self, key: impl Into<String>) -> Self {
        self.required.push(key.into());
        self
    }

    /// Constrain the type of `key` whenever it is present
    pub fn field(mut self, key: impl Into<String>, field_type: FieldType) -> Self {
        self.types.insert(key.into(), field_type);
        self
    }

    /// First rule the message breaks, if any
    pub fn violation(&self, message: &RawMessage) -> Option<String> {
        if let Some(missing) = self.required.iter().find(|key| !message.contains_key(*key)) {
            return Some(format!("missing required field `{missing}`"));
        }

        self.types.iter().find_map(|(key, field_type)| {
            message
                .get(key)
                .filter(|value| !field_type.matches(value))
                .map(|value| format!("field `{key}` should be {field_type:?}, got {value}"))
        })
    }
}

impl SchemaValidator for FieldSchema {
    fn is_valid(&self, message: &RawMessage) -> bool {
        match self.violation(message) {
            Some(reason) => {
                debug!(%reason, "Schema rule failed");
                false
            }
            None => true,
        }
    }
}

/// Combines multiple validators with AND logic
pub struct CompositeValidator {
    validators: Vec<Box<dyn SchemaValidator>>,
}

impl CompositeValidator {
    pub fn new() -> Self {
        Self {
            validators: Vec::new(),
        }
    }

    pub fn add_validator(mut self, validator: Box<dyn SchemaValidator>) -> Self {
        self.validators.push(validator);
        self
    }

    pub fn len(&self) -> usize {
        self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }
}

impl Default for CompositeValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaValidator for CompositeValidator {
    fn is_valid(&self, message: &RawMessage) -> bool {
        self.validators.iter().all(|validator| validator.is_valid(message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use serde_json::json;

    fn raw(value: Value) -> RawMessage {
        match value {
            Value::Object(map) => map,
            other => panic!("fixture must be an object, got {other}"),
        }
    }

    #[test]
    fn test_validate_passes_message_through() {
        let message = raw(json!({ "symbol": "AAPL", "price": 187.2, "venue": "XNAS" }));

        let validated = validate(message.clone(), &AcceptAll).unwrap();
        assert_eq!(validated.as_map(), &message);
    }

    #[test]
    fn test_validate_rejects_with_message() {
        let reject = |_: &RawMessage| false;
        let message = raw(json!({ "price": 1 }));

        let err = validate(message.clone(), &reject).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert_eq!(err.rejected_message(), Some(&message));
    }

    #[test]
    fn test_closure_validator() {
        let has_symbol = |m: &RawMessage| m.contains_key("symbol");

        assert!(validate(raw(json!({ "symbol": "X" })), &has_symbol).is_ok());
        assert!(validate(raw(json!({ "price": 1 })), &has_symbol).is_err());
    }

    #[test]
    fn test_market_data_schema() {
        let schema = FieldSchema::market_data();

        assert!(schema.is_valid(&raw(json!({}))));
        assert!(schema.is_valid(&raw(json!({ "symbol": "AAPL", "price": "101.5", "price_lookback": 99 }))));
        assert!(!schema.is_valid(&raw(json!({ "symbol": 42 }))));
        assert!(!schema.is_valid(&raw(json!({ "price": "abc" }))));
        assert!(!schema.is_valid(&raw(json!({ "price_lookback": null }))));
    }

    #[test]
    fn test_required_fields() {
        let schema = FieldSchema::new()
            .require("symbol")
            .field("symbol", FieldType::String);

        assert_eq!(
            schema.violation(&raw(json!({ "price": 1 }))),
            Some("missing required field `symbol`".to_string())
        );
        assert_eq!(schema.violation(&raw(json!({ "symbol": "MSFT" }))), None);
    }

    #[test]
    fn test_composite_validator() {
        let composite = CompositeValidator::new()
            .add_validator(Box::new(FieldSchema::market_data()))
            .add_validator(Box::new(|m: &RawMessage| m.contains_key("price")));

        assert_eq!(composite.len(), 2);
        assert!(composite.is_valid(&raw(json!({ "price": 10 }))));
        assert!(!composite.is_valid(&raw(json!({ "symbol": "AAPL" }))));
        assert!(!composite.is_valid(&raw(json!({ "price": [10] }))));

        assert!(CompositeValidator::default().is_valid(&raw(json!({}))));
    }
}
