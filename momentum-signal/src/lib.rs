// Momentum Signal Generation
// Validates single market-data messages and enriches them with a momentum signal

pub mod config;
pub mod driver;
pub mod pipeline;
pub mod signals;

pub use config::{create_config_template, load_config, save_config, MomentumConfig, ProcessorConfig};
pub use driver::{run_lines, RunSummary};
pub use pipeline::{error_report, MomentumProcessor};
pub use signals::{MomentumGenerator, MomentumInput, MomentumReading, MomentumSignal};
pub use common::validation as validators;
pub use common::{AcceptAll, CompositeValidator, FieldSchema, FieldType, SchemaValidator};

pub use common::{EnrichedMessage, ErrorKind, ProcessorError, RawMessage, ValidatedMessage};

/// Check `raw` against `validator`
pub fn validate<V>(raw: RawMessage, validator: &V) -> common::Result<ValidatedMessage>
where
    V: SchemaValidator + ?Sized,
{
    validators::validate(raw, validator)
}

/// Enrich a validated message using the default momentum parameters
pub fn compute(message: &ValidatedMessage) -> common::Result<EnrichedMessage> {
    MomentumGenerator::default().compute(message)
}
