//! # Custom Validation Rules
//!
//! Checks that JSON Schema cannot express conveniently run as
//! [`ValidationRule`]s after structural validation. A rule inspects the data
//! document and returns zero or more [`ErrorRecord`]s, which the engine
//! appends to the structural violations in registration order.
//!
//! Two configurable rules are built in and can be declared in a
//! configuration file through [`RuleConfig`]:
//!
//! ```yaml
//! rules:
//!   - kind: prefix
//!     pointer: /id
//!     prefix: PROBAND
//!   - kind: contains
//!     pointer: /subject/timeAtLastEncounter/age/iso8601duration
//!     needle: "Y"
//!     message: Age must be in years (e.g., P25Y)
//! ```

use omics_core::{path_from_pointer, Document, ErrorRecord};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// A check run against the data document after schema validation.
pub trait ValidationRule: Send + Sync {
    /// Short identifier used in log lines.
    fn name(&self) -> &str;

    /// Inspect `data` and report violations. Must not mutate or retain it.
    fn check(&self, data: &Document) -> Vec<ErrorRecord>;
}

/// Error building a rule from its configuration.
#[derive(Error, Debug)]
pub enum RuleError {
    /// The target is not an RFC 6901 JSON pointer.
    #[error("invalid JSON pointer '{0}': must be empty or start with '/'")]
    InvalidPointer(String),
}

/// Declarative rule definition, tagged by `kind`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RuleConfig {
    /// String at `pointer` must start with `prefix`.
    Prefix {
        /// JSON pointer to the checked value.
        pointer: String,
        /// Required leading text.
        prefix: String,
    },
    /// String at `pointer` must contain `needle`.
    Contains {
        /// JSON pointer to the checked value.
        pointer: String,
        /// Required substring.
        needle: String,
        /// Replacement for the default message.
        #[serde(default)]
        message: Option<String>,
    },
}

impl RuleConfig {
    /// Instantiate the configured rule.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::InvalidPointer`] for a malformed pointer.
    pub fn build(&self) -> Result<Box<dyn ValidationRule>, RuleError> {
        match self {
            RuleConfig::Prefix { pointer, prefix } => Ok(Box::new(PrefixRule {
                pointer: checked_pointer(pointer)?,
                prefix: prefix.clone(),
            })),
            RuleConfig::Contains {
                pointer,
                needle,
                message,
            } => Ok(Box::new(ContainsRule {
                pointer: checked_pointer(pointer)?,
                needle: needle.clone(),
                message: message.clone(),
            })),
        }
    }
}

fn checked_pointer(pointer: &str) -> Result<String, RuleError> {
    if pointer.is_empty() || pointer.starts_with('/') {
        Ok(pointer.to_string())
    } else {
        Err(RuleError::InvalidPointer(pointer.to_string()))
    }
}

/// The string at `pointer`, or `None` when absent or not a string.
fn string_at<'a>(data: &'a Document, pointer: &str) -> Option<&'a str> {
    match data.pointer(pointer) {
        Some(Value::String(s)) => Some(s.as_str()),
        _ => None,
    }
}

/// Requires a string value to start with a fixed prefix.
#[derive(Debug, Clone)]
pub struct PrefixRule {
    pointer: String,
    prefix: String,
}

impl ValidationRule for PrefixRule {
    fn name(&self) -> &str {
        "prefix"
    }

    fn check(&self, data: &Document) -> Vec<ErrorRecord> {
        match string_at(data, &self.pointer) {
            Some(value) if !value.starts_with(&self.prefix) => vec![ErrorRecord::new(
                format!("'{value}' does not start with '{}'", self.prefix),
                path_from_pointer(&self.pointer, data),
            )],
            _ => Vec::new(),
        }
    }
}

/// Requires a string value to contain a substring.
#[derive(Debug, Clone)]
pub struct ContainsRule {
    pointer: String,
    needle: String,
    message: Option<String>,
}

impl ValidationRule for ContainsRule {
    fn name(&self) -> &str {
        "contains"
    }

    fn check(&self, data: &Document) -> Vec<ErrorRecord> {
        match string_at(data, &self.pointer) {
            Some(value) if !value.contains(&self.needle) => {
                let message = self
                    .message
                    .clone()
                    .unwrap_or_else(|| format!("'{value}' does not contain '{}'", self.needle));
                vec![ErrorRecord::new(message, path_from_pointer(&self.pointer, data))]
            }
            _ => Vec::new(),
        }
    }
}
