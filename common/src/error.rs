// Processor error taxonomy
// Every failure is surfaced to the caller; nothing here is retried

use crate::message::RawMessage;
use serde_json::Value;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProcessorError>;

/// Failures produced while validating or enriching a single message
#[derive(Debug, Error)]
pub enum ProcessorError {
    /// The schema predicate rejected the raw message
    #[error("Invalid message format")]
    SchemaValidation { message: RawMessage },

    /// A price field could not be read as a finite floating-point number
    #[error("field `{field}` is not a valid number: {value}")]
    NumericConversion { field: &'static str, value: Value },

    /// Lookback price of zero makes the momentum ratio undefined
    #[error("price_lookback is {price_lookback}, momentum is undefined")]
    DegenerateInput { price_lookback: f64 },

    /// Input text was not valid JSON
    #[error("malformed JSON message: {0}")]
    MalformedJson(#[from] serde_json::Error),
}

/// Coarse classification used by callers to pick a recovery policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidInput,
    InvalidNumericInput,
    DegenerateInput,
    MalformedInput,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidInput => "invalid_input",
            ErrorKind::InvalidNumericInput => "invalid_numeric_input",
            ErrorKind::DegenerateInput => "degenerate_input",
            ErrorKind::MalformedInput => "malformed_input",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ProcessorError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ProcessorError::SchemaValidation { .. } => ErrorKind::InvalidInput,
            ProcessorError::NumericConversion { .. } => ErrorKind::InvalidNumericInput,
            ProcessorError::DegenerateInput { .. } => ErrorKind::DegenerateInput,
            ProcessorError::MalformedJson(_) => ErrorKind::MalformedInput,
        }
    }

    /// The rejected message, when the failure came from schema validation
    pub fn rejected_message(&self) -> Option<&RawMessage> {
        match self {
            ProcessorError::SchemaValidation { message } => Some(message),
            _ => None,
        }
    }
}
