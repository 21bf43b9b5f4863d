//! Recast - Transform
//!
//! Per-record step pipeline: schema edits, computed fields and drops.
//!
//! # Overview
//!
//! A [`Pipeline`] is built once from a validated
//! [`PipelineConfig`](recast_config::PipelineConfig) and then applied to each
//! record independently. Steps can:
//! - Remove fields (`drop-fields`)
//! - Reshape key/value records (`merge-key-value`, `unwrap-key-value`)
//! - Change representation (`cast`, `flatten`)
//! - Derive fields from expressions (`compute`)
//! - Discard the record (`drop`)
//!
//! # Architecture
//!
//! ```text
//! [Record] → [when?] Step 1 → [when?] Step 2 → ... → Some(Record') | None
//! ```
//!
//! Every step may carry a `when` predicate, compiled once at initialization.
//! A predicate that is false (or cannot be evaluated) skips only its own step.
//! A `drop` step that runs ends processing immediately.
//!
//! After initialization the pipeline is immutable: `process` takes `&self`
//! and may be called from any number of threads at once.
//!
//! # Adding a New Step
//!
//! 1. **Create config struct** with `TryFrom<&StepInstanceConfig>`:
//!
//! ```ignore
//! impl TryFrom<&StepInstanceConfig> for MyConfig {
//!     type Error = String;
//!
//!     fn try_from(config: &StepInstanceConfig) -> Result<Self, Self::Error> {
//!         let threshold = config.try_get_str("threshold")?;
//!         // ...
//!     }
//! }
//! ```
//!
//! 2. **Implement `Step`** on the step struct.
//!
//! 3. **Register in `create_default_registry()`** and add the type name to
//!    `KNOWN_STEP_TYPES` in `recast-config`.
//!
//! # Modules
//!
//! - `pipeline` - Sequential step execution with predicates
//! - `registry` - Step creation from configuration
//! - `schema_edit` - Pure struct edits shared by the steps
//! - `drop_fields`, `merge_key_value`, `unwrap_key_value`, `cast`, `flatten`,
//!   `compute`, `drop` - the built-in steps
//!
//! # Example
//!
//! ```
//! use recast_config::PipelineConfig;
//! use recast_record::{FieldType, Record, Struct, StructuredValue};
//! use recast_transform::Pipeline;
//! use std::str::FromStr;
//!
//! let config = PipelineConfig::from_str(
//!     r#"
//!     [[steps]]
//!     type = "drop-fields"
//!     fields = ["password"]
//!     "#,
//! )
//! .unwrap();
//! let pipeline = Pipeline::initialize(&config).unwrap();
//!
//! let value = Struct::builder()
//!     .field("user", FieldType::String, "jane")
//!     .field("password", FieldType::String, "secret")
//!     .build()
//!     .unwrap();
//! let out = pipeline.process(Record::new(value)).unwrap().unwrap();
//! let value = out.value().and_then(|p| p.as_struct()).unwrap();
//! assert!(value.get("password").is_none());
//! ```

mod error;
mod pipeline;
pub mod cast;
pub mod compute;
pub mod drop;
pub mod drop_fields;
pub mod flatten;
pub mod merge_key_value;
pub mod registry;
pub mod schema_edit;
pub mod unwrap_key_value;

pub use cast::{CastConfig, CastFactory, CastStep};
pub use compute::{ComputeConfig, ComputeFactory, ComputeField, ComputeStep, ComputeTarget};
pub use drop::{DropFactory, DropStep};
pub use drop_fields::{DropFieldsConfig, DropFieldsFactory, DropFieldsStep};
pub use error::TransformError;
pub use flatten::{FlattenConfig, FlattenFactory, FlattenStep};
pub use merge_key_value::{MergeKeyValueFactory, MergeKeyValueStep};
pub use pipeline::Pipeline;
pub use registry::{StepFactory, StepRegistry};
pub use unwrap_key_value::{UnwrapKeyValueConfig, UnwrapKeyValueFactory, UnwrapKeyValueStep};

use recast_record::Record;

/// Result type for step operations
pub type TransformResult<T> = Result<T, TransformError>;

/// A single record transformation
///
/// Implementors must be `Send + Sync`: one step instance is shared by every
/// thread that processes records through the pipeline.
///
/// # Example
///
/// ```ignore
/// struct MyStep;
///
/// impl Step for MyStep {
///     fn apply(&self, record: Record) -> TransformResult<Option<Record>> {
///         Ok(Some(record))
///     }
///
///     fn name(&self) -> &'static str {
///         "my-step"
///     }
/// }
/// ```
pub trait Step: Send + Sync {
    /// Transform a record
    ///
    /// Returns `Ok(None)` when the record is dropped. An error fails this
    /// record only.
    fn apply(&self, record: Record) -> TransformResult<Option<Record>>;

    /// Step type name for logging
    fn name(&self) -> &'static str;
}

/// Create a step registry with all built-in steps
///
/// Includes:
/// - `drop-fields` - Remove named fields
/// - `merge-key-value` - Union key fields into the value
/// - `unwrap-key-value` - Keep only the value (or the key)
/// - `cast` - Convert a part to one scalar type
/// - `flatten` - Replace nested structs by delimited leaf fields
/// - `compute` - Add or overwrite fields from expressions
/// - `drop` - Discard the record
pub fn create_default_registry() -> StepRegistry {
    let mut registry = StepRegistry::new();
    registry.register("drop-fields", DropFieldsFactory);
    registry.register("merge-key-value", MergeKeyValueFactory);
    registry.register("unwrap-key-value", UnwrapKeyValueFactory);
    registry.register("cast", CastFactory);
    registry.register("flatten", FlattenFactory);
    registry.register("compute", ComputeFactory);
    registry.register("drop", DropFactory);
    registry
}
