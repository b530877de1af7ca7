//! # Documents and Instance Paths
//!
//! A [`Document`] is the in-memory tree produced by parsing JSON or YAML.
//! JSON is the lingua franca: YAML input is converted into the same
//! `serde_json::Value` tree so that the validation engine sees one shape.
//!
//! Locations inside a document are sequences of [`PathSegment`]s. The
//! validation engine reports locations as RFC 6901 JSON pointers; this
//! module turns them back into segments, using the document itself to tell
//! array indices apart from object keys that happen to look numeric.

use std::fmt;

use serde_json::Value;

/// A parsed JSON or YAML document.
pub type Document = Value;

/// One step from a document root towards a nested value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// An object member name.
    Key(String),
    /// A zero-based array position.
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(key) => f.write_str(key),
            PathSegment::Index(index) => write!(f, "{index}"),
        }
    }
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        PathSegment::Key(key.to_string())
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        PathSegment::Index(index)
    }
}

/// Convert a JSON pointer into path segments relative to `instance`.
///
/// The empty pointer addresses the root and yields no segments. A token is
/// classified as [`PathSegment::Index`] only when the value it descends
/// from is an array; once the walk leaves the document (a dangling pointer)
/// every remaining token is treated as a key.
pub fn path_from_pointer(pointer: &str, instance: &Document) -> Vec<PathSegment> {
    let mut segments = Vec::new();
    let mut current = Some(instance);

    for raw in pointer.split('/').skip(1) {
        let token = unescape_token(raw);
        let segment = match current {
            Some(Value::Array(items)) => match token.parse::<usize>() {
                Ok(index) => {
                    current = items.get(index);
                    PathSegment::Index(index)
                }
                Err(_) => {
                    current = None;
                    PathSegment::Key(token)
                }
            },
            Some(Value::Object(members)) => {
                current = members.get(&token);
                PathSegment::Key(token)
            }
            _ => {
                current = None;
                PathSegment::Key(token)
            }
        };
        segments.push(segment);
    }

    segments
}

/// Undo RFC 6901 escaping. `~1` must be replaced before `~0`.
fn unescape_token(raw: &str) -> String {
    if raw.contains('~') {
        raw.replace("~1", "/").replace("~0", "~")
    } else {
        raw.to_string()
    }
}
