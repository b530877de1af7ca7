//! # Validation Pipeline
//!
//! Glues the pieces together: resolve the schema through a
//! [`SchemaSource`], load the data through the content loader, validate,
//! and hand back a [`ValidationReport`].

use omics_core::{ErrorRecord, GuardError};

use crate::engine::ValidationEngine;
use crate::loader::load_document;
use crate::rules::ValidationRule;
use crate::source::SchemaSource;

/// Outcome of one validation run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationReport {
    /// Violations in discovery order; empty means valid.
    pub errors: Vec<ErrorRecord>,
}

impl ValidationReport {
    /// True iff no violations were found.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Canonical `[path] message` strings, in discovery order.
    pub fn rendered(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }
}

/// Validate the data at `data` against the schema at `schema_location`,
/// or against the bundled default schema when no location is given.
///
/// # Errors
///
/// - [`GuardError::Load`] when the schema or the data cannot be loaded.
/// - [`GuardError::Internal`] when the schema cannot be compiled.
///
/// Schema violations are reported in the returned report, not as errors.
pub fn validate_locations(
    source: &SchemaSource,
    schema_location: Option<&str>,
    data: &str,
    rules: Vec<Box<dyn ValidationRule>>,
) -> Result<ValidationReport, GuardError> {
    let schema = match schema_location {
        Some(location) => source.resolve(location)?,
        None => source.resolve_default()?,
    };
    let document = load_document(data)?;

    let engine = ValidationEngine::new(&schema)?.with_rules(rules);
    Ok(ValidationReport {
        errors: engine.validate(&document),
    })
}
