//! # Error Records
//!
//! The interchange format between the validation engine and its callers.
//! Records are produced fresh for every validation call and keep the order
//! in which violations were discovered, so rendered output is stable
//! across runs.

use std::fmt;

use crate::document::PathSegment;

/// Rendered location of a violation at the document root.
pub const ROOT_PATH: &str = "root";

/// A single validation violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorRecord {
    /// Human-readable description of the violated constraint.
    pub message: String,
    /// Keys and indices from the data document root to the offending value.
    pub path: Vec<PathSegment>,
}

impl ErrorRecord {
    /// Create a record at the given location.
    pub fn new(message: impl Into<String>, path: Vec<PathSegment>) -> Self {
        Self {
            message: message.into(),
            path,
        }
    }

    /// Create a record addressed to the document root.
    pub fn at_root(message: impl Into<String>) -> Self {
        Self::new(message, Vec::new())
    }

    /// Dotted rendering of [`Self::path`], e.g. `samples.0.id`, or `root`.
    pub fn location(&self) -> String {
        render_path(&self.path)
    }
}

impl fmt::Display for ErrorRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.location(), self.message)
    }
}

/// Join path segments with `.`; the empty path renders as [`ROOT_PATH`].
pub fn render_path(path: &[PathSegment]) -> String {
    if path.is_empty() {
        return ROOT_PATH.to_string();
    }
    path.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(".")
}
