//! # Error Types — Loading and Classification
//!
//! All errors use `thiserror` for derive-based `Display` and `Error`
//! implementations.
//!
//! ## Design
//!
//! - Loading failures ([`LoadError`]) are expected operational outcomes:
//!   unreadable files, unparsable text, unreachable schema URLs. They are
//!   never retried, only classified and re-raised with context.
//! - Schema violations are not represented here at all. They are ordinary
//!   return values (`Vec<ErrorRecord>`).
//! - [`GuardError`] separates operational failures from internal ones so
//!   the front end can log the latter with a full diagnostic trace.

use std::path::PathBuf;

use thiserror::Error;

/// Type-erased underlying cause, as produced by parsers and HTTP clients.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Failure to turn a location or raw text into a [`crate::Document`].
#[derive(Error, Debug)]
pub enum LoadError {
    /// A path was detected but the file could not be read.
    #[error("cannot read '{}': {source}", .path.display())]
    ContentUnreadable {
        /// The path that was probed.
        path: PathBuf,
        /// The filesystem error.
        #[source]
        source: std::io::Error,
    },

    /// The text parses as neither JSON nor YAML.
    #[error("content is not valid JSON or YAML")]
    ContentUnparsable {
        /// The YAML parser's error (the last fallback attempted).
        #[source]
        source: BoxError,
    },

    /// The text is valid YAML but holds a value JSON cannot express, such
    /// as `.nan`, `.inf`, or a mapping used as a key.
    #[error("content is valid YAML but has no JSON representation: {reason}")]
    ContentUnrepresentable {
        /// What was found and where.
        reason: String,
    },

    /// A remote schema could not be fetched (transport failure or non-2xx).
    #[error("cannot fetch '{url}': {source}")]
    SchemaUnreachable {
        /// The URL that was requested.
        url: String,
        /// The transport-level cause.
        #[source]
        source: BoxError,
    },

    /// Umbrella for any failure while resolving a schema location.
    #[error("could not load schema from {location}")]
    SchemaLoadFailed {
        /// The schema identifier as supplied by the caller.
        location: String,
        /// The root cause.
        #[source]
        source: Box<LoadError>,
    },
}

impl LoadError {
    /// Wrap `self` as a [`LoadError::SchemaLoadFailed`] for `location`.
    pub fn for_schema(self, location: impl Into<String>) -> Self {
        LoadError::SchemaLoadFailed {
            location: location.into(),
            source: Box::new(self),
        }
    }

    /// The innermost non-umbrella error.
    pub fn root_cause(&self) -> &LoadError {
        match self {
            LoadError::SchemaLoadFailed { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

/// Top-level failure of a validation run.
#[derive(Error, Debug)]
pub enum GuardError {
    /// Expected operational failure: file, network, or parse problem.
    #[error(transparent)]
    Load(#[from] LoadError),

    /// Unforeseen failure inside the validation engine.
    #[error("internal validation error: {0}")]
    Internal(String),
}

impl GuardError {
    /// True for failures that indicate a defect rather than bad input.
    pub fn is_internal(&self) -> bool {
        matches!(self, GuardError::Internal(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn schema_wrapper_keeps_location_and_cause() {
        let inner = LoadError::SchemaUnreachable {
            url: "https://example.org/schema.json".into(),
            source: "HTTP status 404 Not Found".into(),
        };
        let err = inner.for_schema("https://example.org/schema.json");

        assert_eq!(
            err.to_string(),
            "could not load schema from https://example.org/schema.json"
        );
        assert!(matches!(err.root_cause(), LoadError::SchemaUnreachable { .. }));
        let cause = err.source().map(ToString::to_string).unwrap_or_default();
        assert!(cause.contains("404"), "cause chain lost: {cause}");
    }

    #[test]
    fn unparsable_message_is_summarised() {
        let err = LoadError::ContentUnparsable {
            source: "mapping values are not allowed in this context at line 1".into(),
        };
        assert_eq!(err.to_string(), "content is not valid JSON or YAML");
    }

    #[test]
    fn unrepresentable_is_not_reported_as_unparsable() {
        let err = LoadError::ContentUnrepresentable {
            reason: "non-finite number .nan at value".into(),
        };
        assert_eq!(
            err.to_string(),
            "content is valid YAML but has no JSON representation: non-finite number .nan at value"
        );
        assert!(!err.to_string().contains("not valid"));
    }

    #[test]
    fn internal_errors_are_distinguishable() {
        let internal = GuardError::Internal("schema failed to compile".into());
        let operational = GuardError::from(LoadError::ContentUnparsable {
            source: "bad".into(),
        });
        assert!(internal.is_internal());
        assert!(!operational.is_internal());
    }
}
