//! # Content Loading
//!
//! Turns a path or a raw string into a parsed [`Document`].
//!
//! ## Path vs. Content
//!
//! A string is probed as a filesystem path only when it contains no newline
//! and is shorter than [`MAX_PATH_PROBE_LEN`] characters. If the probe finds
//! a regular file, its contents are read; otherwise the string itself is the
//! document text. A non-existent path is therefore *not* an error here: it
//! is reinterpreted as literal content (and usually parses as a YAML
//! scalar).
//!
//! ## JSON vs. YAML
//!
//! Text is parsed as JSON first and as YAML on failure, whatever the file
//! extension says. YAML trees are converted into the JSON value model so
//! downstream code sees a single representation.

use std::path::{Path, PathBuf};

use omics_core::{render_path, Document, LoadError, PathSegment};
use serde_json::Value;
use serde_yaml::Value as YamlValue;

/// Strings at least this many characters long are never probed as paths.
pub const MAX_PATH_PROBE_LEN: usize = 4096;

/// Where a document comes from.
#[derive(Debug, Clone, Copy)]
pub enum ContentSource<'a> {
    /// An explicit filesystem path. Always read, never reinterpreted.
    Path(&'a Path),
    /// A string that is either a path or the document text itself.
    Text(&'a str),
}

impl<'a> From<&'a Path> for ContentSource<'a> {
    fn from(path: &'a Path) -> Self {
        ContentSource::Path(path)
    }
}

impl<'a> From<&'a PathBuf> for ContentSource<'a> {
    fn from(path: &'a PathBuf) -> Self {
        ContentSource::Path(path.as_path())
    }
}

impl<'a> From<&'a str> for ContentSource<'a> {
    fn from(text: &'a str) -> Self {
        ContentSource::Text(text)
    }
}

impl<'a> From<&'a String> for ContentSource<'a> {
    fn from(text: &'a String) -> Self {
        ContentSource::Text(text.as_str())
    }
}

/// Load and parse a document from a path or a raw string.
///
/// # Errors
///
/// - [`LoadError::ContentUnreadable`] if a path was detected but reading it
///   failed.
/// - [`LoadError::ContentUnparsable`] if the text is neither JSON nor YAML.
/// - [`LoadError::ContentUnrepresentable`] if the YAML holds a value JSON
///   cannot express.
pub fn load_document<'a>(source: impl Into<ContentSource<'a>>) -> Result<Document, LoadError> {
    match source.into() {
        ContentSource::Path(path) => parse_text(&read_file(path)?),
        ContentSource::Text(text) => match probe_path(text) {
            Some(path) => parse_text(&read_file(path)?),
            None => parse_text(text),
        },
    }
}

/// Parse text as JSON, falling back to YAML.
///
/// # Errors
///
/// Returns [`LoadError::ContentUnparsable`] carrying the YAML error when
/// both parsers reject the text, or [`LoadError::ContentUnrepresentable`]
/// when the YAML parses but cannot be expressed as JSON.
pub fn parse_text(text: &str) -> Result<Document, LoadError> {
    match serde_json::from_str::<Value>(text) {
        Ok(value) => Ok(value),
        Err(json_err) => {
            tracing::debug!(error = %json_err, "JSON decode failed, attempting YAML");
            let yaml: YamlValue = serde_yaml::from_str(text).map_err(|e| {
                tracing::debug!(error = %e, "YAML decode failed");
                LoadError::ContentUnparsable {
                    source: Box::new(e),
                }
            })?;
            yaml_into_json(yaml, &mut Vec::new())
        }
    }
}

/// The path to read for `text`, if `text` names an existing regular file.
fn probe_path(text: &str) -> Option<&Path> {
    if text.contains('\n') || text.chars().count() >= MAX_PATH_PROBE_LEN {
        return None;
    }
    let path = Path::new(text);
    path.is_file().then_some(path)
}

fn read_file(path: &Path) -> Result<String, LoadError> {
    std::fs::read_to_string(path).map_err(|e| {
        tracing::error!(path = %path.display(), error = %e, "failed to read file");
        LoadError::ContentUnreadable {
            path: path.to_path_buf(),
            source: e,
        }
    })
}

/// Move a YAML tree into the JSON value model.
///
/// Scalar mapping keys are stringified the way a JSON encoder would and tags
/// are dropped. `path` tracks the node being converted so that a value with
/// no JSON form is reported where it occurs.
fn yaml_into_json(node: YamlValue, path: &mut Vec<PathSegment>) -> Result<Value, LoadError> {
    let value = match node {
        YamlValue::Null => Value::Null,
        YamlValue::Bool(b) => Value::Bool(b),
        YamlValue::Number(n) => match json_number(&n) {
            Some(number) => Value::Number(number),
            None => return Err(unrepresentable(format!("non-finite number {n}"), path)),
        },
        YamlValue::String(s) => Value::String(s),
        YamlValue::Sequence(items) => {
            let mut array = Vec::with_capacity(items.len());
            for (index, item) in items.into_iter().enumerate() {
                path.push(PathSegment::Index(index));
                array.push(yaml_into_json(item, path)?);
                path.pop();
            }
            Value::Array(array)
        }
        YamlValue::Mapping(entries) => {
            let mut object = serde_json::Map::with_capacity(entries.len());
            for (key, item) in entries {
                let Some(key) = mapping_key(key) else {
                    return Err(unrepresentable("non-scalar mapping key".to_string(), path));
                };
                path.push(PathSegment::Key(key.clone()));
                let converted = yaml_into_json(item, path)?;
                path.pop();
                object.insert(key, converted);
            }
            Value::Object(object)
        }
        YamlValue::Tagged(tagged) => return yaml_into_json(tagged.value, path),
    };
    Ok(value)
}

/// Integers stay integers; floats must be finite.
fn json_number(n: &serde_yaml::Number) -> Option<serde_json::Number> {
    if let Some(i) = n.as_i64() {
        Some(i.into())
    } else if let Some(u) = n.as_u64() {
        Some(u.into())
    } else {
        n.as_f64().and_then(serde_json::Number::from_f64)
    }
}

fn mapping_key(key: YamlValue) -> Option<String> {
    match key {
        YamlValue::String(s) => Some(s),
        YamlValue::Number(n) => Some(n.to_string()),
        YamlValue::Bool(b) => Some(b.to_string()),
        YamlValue::Null => Some("null".to_string()),
        YamlValue::Tagged(tagged) => mapping_key(tagged.value),
        YamlValue::Sequence(_) | YamlValue::Mapping(_) => None,
    }
}

fn unrepresentable(what: String, path: &[PathSegment]) -> LoadError {
    let reason = format!("{what} at {}", render_path(path));
    tracing::debug!(%reason, "YAML value has no JSON form");
    LoadError::ContentUnrepresentable { reason }
}
