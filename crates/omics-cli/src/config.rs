//! # Configuration File
//!
//! Optional JSON or YAML file passed with `--config`. It is loaded through
//! the same content loader as data documents, so a path, inline text, JSON
//! and YAML are all accepted.
//!
//! ```yaml
//! schema: https://example.org/phenopacket.schema.json
//! rules:
//!   - kind: prefix
//!     pointer: /id
//!     prefix: PROBAND
//! ```
//!
//! A `--schema` flag on the command line overrides `schema` here; with
//! neither, the bundled default schema is used.

use std::path::Path;

use anyhow::Context;
use omics_schema::{load_document, RuleConfig, RuleError, ValidationRule};
use serde::Deserialize;
use serde_json::Value;

/// Settings read from a configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GuardConfig {
    /// Default schema location (path or URL).
    #[serde(default)]
    pub schema: Option<String>,
    /// Custom rules run after schema validation.
    #[serde(default)]
    pub rules: Vec<RuleConfig>,
}

impl GuardConfig {
    /// Load the configuration at `path`, or the defaults when `None`.
    ///
    /// An empty file yields the defaults.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or parsed, or has unknown fields.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let document = load_document(path)
            .with_context(|| format!("loading configuration from '{}'", path.display()))?;
        if document.is_null() {
            return Ok(Self::default());
        }

        let config = Self::from_document(document)
            .with_context(|| format!("invalid configuration in '{}'", path.display()))?;
        tracing::debug!(
            schema = config.schema.as_deref().unwrap_or("<bundled>"),
            rules = config.rules.len(),
            "loaded configuration"
        );
        Ok(config)
    }

    /// Parse configuration from an already-loaded document.
    ///
    /// # Errors
    ///
    /// Fails on unknown fields or malformed rules.
    pub fn from_document(document: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(document)
    }

    /// The schema location to use: the command-line value, then the file's.
    pub fn schema_location<'a>(&'a self, cli: Option<&'a str>) -> Option<&'a str> {
        cli.or(self.schema.as_deref())
    }

    /// Instantiate the configured rules in declaration order.
    ///
    /// # Errors
    ///
    /// Returns the first [`RuleError`] encountered.
    pub fn build_rules(&self) -> Result<Vec<Box<dyn ValidationRule>>, RuleError> {
        self.rules.iter().map(RuleConfig::build).collect()
    }
}
