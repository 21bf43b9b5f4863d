//! Pipeline - Sequential record transformation
//!
//! The `Pipeline` applies its steps in configuration order to one record at
//! a time.
//!
//! # Design
//!
//! - **Built once**: Step parameters and `when` predicates are parsed and
//!   compiled by `initialize`; a bad configuration never yields a pipeline
//! - **Sequential execution**: Each step receives the output of the previous
//! - **Guarded steps**: A step whose predicate is false is skipped; a
//!   predicate that fails to evaluate counts as false. Both are logged at
//!   debug, and a predicate naming an unknown root is warned about once at
//!   initialization
//! - **Short-circuit**: A step that drops the record ends processing
//! - **Fail the record, not the pipeline**: A step error fails the current
//!   `process` call only
//! - **Shared read-only**: `process` takes `&self`, so one pipeline can serve
//!   any number of threads

use crate::registry::StepRegistry;
use crate::{Step, TransformResult, create_default_registry};
use recast_config::{ConfigError, PipelineConfig};
use recast_expr::Expression;
use recast_record::Record;
use tracing::{debug, info, trace, warn};

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod tests;

/// A step and its optional guard
struct PipelineStep {
    step: Box<dyn Step>,
    when: Option<Expression>,
}

/// Ordered, immutable list of steps
pub struct Pipeline {
    steps: Vec<PipelineStep>,
}

impl Pipeline {
    /// Build a pipeline with the built-in steps
    ///
    /// # Errors
    /// Returns the first configuration error found, before any record is
    /// processed.
    pub fn initialize(config: &PipelineConfig) -> Result<Self, ConfigError> {
        Self::with_registry(config, &create_default_registry())
    }

    /// Build a pipeline resolving step types through `registry`
    pub fn with_registry(
        config: &PipelineConfig,
        registry: &StepRegistry,
    ) -> Result<Self, ConfigError> {
        let mut steps = Vec::with_capacity(config.steps.len());

        for (index, step_config) in config.steps.iter().enumerate() {
            let when = step_config
                .when
                .as_deref()
                .map(|source| {
                    Expression::parse(source).map_err(|e| {
                        ConfigError::invalid_expression(
                            index,
                            &step_config.step_type,
                            source,
                            e.to_string(),
                        )
                    })
                })
                .transpose()?;

            if let Some(when) = &when {
                let unknown = when.unknown_roots();
                if !unknown.is_empty() {
                    warn!(
                        step = index,
                        step_type = %step_config.step_type,
                        when = when.source(),
                        roots = ?unknown,
                        "predicate references unknown roots, evaluating them always fails"
                    );
                }
            }

            let step = registry.create(index, step_config)?;
            steps.push(PipelineStep { step, when });
        }

        let pipeline = Self { steps };
        info!(steps = ?pipeline.names(), "pipeline initialized");
        Ok(pipeline)
    }

    /// Get the number of steps
    #[inline]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Check if the pipeline has no steps
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Step type names in execution order
    pub fn names(&self) -> Vec<&'static str> {
        self.steps.iter().map(|s| s.step.name()).collect()
    }

    /// Run a record through every step
    ///
    /// Returns `Ok(None)` if a step dropped the record.
    ///
    /// # Errors
    ///
    /// The first step error stops processing and fails this record only.
    pub fn process(&self, record: Record) -> TransformResult<Option<Record>> {
        let mut current = record;

        for (index, entry) in self.steps.iter().enumerate() {
            let name = entry.step.name();

            if let Some(when) = &entry.when {
                match when.evaluate_predicate(&current) {
                    Ok(true) => {}
                    Ok(false) => {
                        debug!(step = index, name, "predicate is false, skipping step");
                        continue;
                    }
                    Err(e) => {
                        debug!(
                            step = index,
                            name,
                            when = when.source(),
                            error = %e,
                            "predicate failed to evaluate, skipping step"
                        );
                        continue;
                    }
                }
            }

            trace!(step = index, name, "applying step");
            match entry.step.apply(current)? {
                Some(next) => current = next,
                None => {
                    debug!(step = index, name, "record dropped");
                    return Ok(None);
                }
            }
        }

        Ok(Some(current))
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("steps", &self.names())
            .finish()
    }
}
