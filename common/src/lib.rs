//! Shared message model, error taxonomy and logging bootstrap
//!
//! Everything that flows between the validator, the momentum computer and
//! the driver binary lives here so the stages agree on one set of types.
//! Schema validation lives here too: it is the only way to obtain a
//! [`ValidatedMessage`].

pub mod error;
pub mod logging;
pub mod message;
pub mod validation;

pub use error::{ErrorKind, ProcessorError, Result};
pub use logging::{init_logging, LoggingConfig};
pub use message::{EnrichedMessage, RawMessage, ValidatedMessage};
pub use validation::{validate, AcceptAll, CompositeValidator, FieldSchema, FieldType, SchemaValidator};

pub use serde_json::{Map, Value};
