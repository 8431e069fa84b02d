// Market-data message model
// Raw, validated and enriched views over the same untyped JSON mapping

use serde::Serialize;
use serde_json::{Map, Value};

/// Untyped mapping as received from the transport layer
pub type RawMessage = Map<String, Value>;

/// A message that passed schema validation.
///
/// Wraps the original mapping without copying or normalizing it. Unknown
/// keys are carried along so they can be merged back into the output.
///
/// The only way to obtain one is [`validate`](crate::validation::validate):
///
/// ```compile_fail
/// let _ = common::ValidatedMessage::assume_valid(common::RawMessage::new());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ValidatedMessage(Map<String, Value>);

impl ValidatedMessage {
    /// Wrap a mapping that a schema validator has already accepted
    pub(crate) fn assume_valid(raw: RawMessage) -> Self {
        Self(raw)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

/// Validated message with the computed momentum fields merged in
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct EnrichedMessage(Map<String, Value>);

impl EnrichedMessage {
    pub const MOMENTUM_VALUE: &'static str = "momentum_value";
    pub const MOMENTUM_SIGNAL: &'static str = "momentum_signal";

    /// Copy `base` and overlay `additions` on top of it.
    ///
    /// Keys in `additions` win over keys already present in `base`.
    pub fn merge(base: &ValidatedMessage, additions: Map<String, Value>) -> Self {
        let mut merged = base.as_map().clone();
        merged.extend(additions);
        Self(merged)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn momentum_value(&self) -> Option<f64> {
        self.0.get(Self::MOMENTUM_VALUE).and_then(Value::as_f64)
    }

    pub fn momentum_signal(&self) -> Option<&str> {
        self.0.get(Self::MOMENTUM_SIGNAL).and_then(Value::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<EnrichedMessage> for Value {
    fn from(message: EnrichedMessage) -> Self {
        Value::Object(message.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: Value) -> RawMessage {
        match value {
            Value::Object(map) => map,
            other => panic!("fixture must be an object, got {other}"),
        }
    }

    #[test]
    fn test_merge_overrides_existing_keys() {
        let base = ValidatedMessage::assume_valid(raw(json!({
            "symbol": "AAPL",
            "momentum_signal": "stale",
        })));
        let additions = raw(json!({
            "momentum_value": 0.1,
            "momentum_signal": "BUY",
        }));

        let enriched = EnrichedMessage::merge(&base, additions);

        assert!(!enriched.is_empty());
        assert_eq!(enriched.len(), 3);
        assert_eq!(enriched.get("symbol"), Some(&json!("AAPL")));
        assert_eq!(enriched.momentum_signal(), Some("BUY"));
        assert_eq!(enriched.momentum_value(), Some(0.1));
    }

    #[test]
    fn test_merge_leaves_base_untouched() {
        let base = ValidatedMessage::assume_valid(raw(json!({ "price": "110" })));
        let _ = EnrichedMessage::merge(&base, raw(json!({ "momentum_value": 0.1 })));

        assert_eq!(base.len(), 1);
        assert!(!base.contains_key("momentum_value"));
    }

    #[test]
    fn test_serializes_as_plain_object() {
        let base = ValidatedMessage::assume_valid(raw(json!({ "symbol": "MSFT" })));
        let enriched = EnrichedMessage::merge(&base, raw(json!({ "momentum_signal": "HOLD" })));

        let text = serde_json::to_string(&enriched).unwrap();
        let back: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(back, json!({ "symbol": "MSFT", "momentum_signal": "HOLD" }));
    }
}
