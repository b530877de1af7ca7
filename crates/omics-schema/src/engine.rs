//! # Validation Engine
//!
//! Structural validation of a data document against a JSON Schema
//! (Draft 7), backed by the `jsonschema` crate.
//!
//! ## Contract
//!
//! - Validation is exhaustive: every violation is reported, in the order
//!   the underlying validator discovers them.
//! - An empty result, and only an empty result, means "valid".
//! - Neither document is mutated and no I/O is performed. Internal `$ref`s
//!   (`#/definitions/...`) resolve natively; external references are
//!   refused by [`OfflineRetriever`], so a schema that needs them fails to
//!   compile.
//! - A compiled [`ValidationEngine`] holds no per-call state and may be
//!   shared across threads and reused for any number of data documents.

use std::fmt;

use jsonschema::{Draft, Retrieve, Uri, Validator};
use omics_core::{path_from_pointer, Document, ErrorRecord, GuardError};
use serde_json::Value;
use thiserror::Error;

use crate::rules::ValidationRule;

/// Failure to compile a schema into a validator.
#[derive(Error, Debug)]
pub enum EngineError {
    /// The schema is not a valid Draft 7 schema, or references a
    /// document that cannot be resolved offline.
    #[error("schema cannot be compiled: {reason}")]
    SchemaCompile {
        /// The validator's explanation.
        reason: String,
    },
}

impl From<EngineError> for GuardError {
    fn from(err: EngineError) -> Self {
        GuardError::Internal(err.to_string())
    }
}

/// Retriever that refuses every external `$ref`.
struct OfflineRetriever;

impl Retrieve for OfflineRetriever {
    fn retrieve(
        &self,
        uri: &Uri<&str>,
    ) -> Result<Value, Box<dyn std::error::Error + Send + Sync>> {
        Err(format!("external reference '{}' cannot be resolved offline", uri.as_str()).into())
    }
}

/// A compiled schema plus optional custom rules.
pub struct ValidationEngine {
    validator: Validator,
    rules: Vec<Box<dyn ValidationRule>>,
}

impl ValidationEngine {
    /// Compile `schema` for Draft 7 validation with format assertions.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::SchemaCompile`] if the schema is invalid.
    pub fn new(schema: &Document) -> Result<Self, EngineError> {
        let mut opts = jsonschema::options();
        opts.with_draft(Draft::Draft7)
            .should_validate_formats(true)
            .with_retriever(OfflineRetriever);

        let validator = opts.build(schema).map_err(|e| {
            tracing::error!(error = %e, "schema failed to compile");
            EngineError::SchemaCompile {
                reason: e.to_string(),
            }
        })?;

        Ok(Self {
            validator,
            rules: Vec::new(),
        })
    }

    /// Register a custom rule to run after structural validation.
    pub fn with_rule(mut self, rule: Box<dyn ValidationRule>) -> Self {
        self.rules.push(rule);
        self
    }

    /// Register several custom rules, preserving their order.
    pub fn with_rules(mut self, rules: impl IntoIterator<Item = Box<dyn ValidationRule>>) -> Self {
        self.rules.extend(rules);
        self
    }

    /// Validate `data`, returning every violation in discovery order.
    pub fn validate(&self, data: &Document) -> Vec<ErrorRecord> {
        let mut errors: Vec<ErrorRecord> = self
            .validator
            .iter_errors(data)
            .map(|e| {
                let pointer = e.instance_path.to_string();
                ErrorRecord::new(e.to_string(), path_from_pointer(&pointer, data))
            })
            .collect();

        for rule in &self.rules {
            let found = rule.check(data);
            if !found.is_empty() {
                tracing::debug!(rule = rule.name(), count = found.len(), "custom rule reported violations");
            }
            errors.extend(found);
        }

        if errors.is_empty() {
            tracing::debug!("validation successful");
        } else {
            tracing::info!(errors = errors.len(), "validation failed");
        }
        errors
    }
}

impl fmt::Debug for ValidationEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rules: Vec<&str> = self.rules.iter().map(|r| r.name()).collect();
        f.debug_struct("ValidationEngine")
            .field("draft", &"draft-07")
            .field("rules", &rules)
            .finish_non_exhaustive()
    }
}

/// One-off validation of `data` against `schema`.
///
/// # Errors
///
/// Returns [`EngineError::SchemaCompile`] if the schema is invalid. Schema
/// violations are returned in the `Ok` vector, never as errors.
pub fn validate(schema: &Document, data: &Document) -> Result<Vec<ErrorRecord>, EngineError> {
    Ok(ValidationEngine::new(schema)?.validate(data))
}
