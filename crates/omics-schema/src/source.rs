//! # Schema Resolution
//!
//! [`SchemaSource`] resolves a schema location into a parsed [`Document`]:
//!
//! 1. A location already in the cache is returned without I/O.
//! 2. `http://` and `https://` locations are fetched through the
//!    [`SchemaFetcher`]; the body is parsed JSON-first, YAML on failure,
//!    regardless of the declared content type.
//! 3. [`BUNDLED_SCHEMA_ID`] resolves to the schema embedded in this crate.
//! 4. Anything else is a path or literal schema text, delegated to
//!    [`crate::loader::load_document`].
//!
//! Successful loads are stored under the location string exactly as given.
//! Every failure surfaces as [`LoadError::SchemaLoadFailed`] wrapping the
//! root cause.
//!
//! ## Concurrency
//!
//! The cache is a `parking_lot::RwLock` around a `HashMap`. Two callers
//! racing on the same uncached location may both load it; the last insert
//! wins, and both results are equal by value. Documents are shared as
//! `Arc<Document>` and never mutated.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use omics_core::{Document, GuardError, LoadError};
use parking_lot::RwLock;

use crate::bundled::{BUNDLED_SCHEMA_ID, BUNDLED_SCHEMA_TEXT};
use crate::fetch::{HttpFetcher, SchemaFetcher};
use crate::loader::{load_document, parse_text};

/// Process-lifetime, unbounded, write-once-per-key schema cache.
#[derive(Debug, Default)]
pub struct SchemaCache {
    entries: RwLock<HashMap<String, Arc<Document>>>,
}

impl SchemaCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a previously resolved location.
    pub fn get(&self, location: &str) -> Option<Arc<Document>> {
        self.entries.read().get(location).cloned()
    }

    /// Store a document, replacing any concurrent insert for the same key.
    pub fn insert(&self, location: &str, document: Document) -> Arc<Document> {
        let document = Arc::new(document);
        self.entries
            .write()
            .insert(location.to_string(), Arc::clone(&document));
        document
    }

    /// Number of cached locations.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns true if nothing has been cached yet.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

/// Resolves schema locations into documents, caching by location.
pub struct SchemaSource {
    cache: SchemaCache,
    fetcher: Arc<dyn SchemaFetcher>,
}

impl SchemaSource {
    /// Create a source that fetches remote schemas over HTTP.
    ///
    /// # Errors
    ///
    /// Returns [`GuardError::Internal`] if the HTTP client cannot be built.
    pub fn new() -> Result<Self, GuardError> {
        let fetcher = HttpFetcher::new()
            .map_err(|e| GuardError::Internal(format!("cannot build HTTP client: {e}")))?;
        Ok(Self::with_fetcher(Arc::new(fetcher)))
    }

    /// Create a source with a caller-supplied fetcher.
    pub fn with_fetcher(fetcher: Arc<dyn SchemaFetcher>) -> Self {
        Self {
            cache: SchemaCache::new(),
            fetcher,
        }
    }

    /// The cache owned by this source.
    pub fn cache(&self) -> &SchemaCache {
        &self.cache
    }

    /// Resolve `location` into a schema document.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::SchemaLoadFailed`] carrying `location` and the
    /// underlying content, network, or parse failure.
    pub fn resolve(&self, location: &str) -> Result<Arc<Document>, LoadError> {
        if let Some(schema) = self.cache.get(location) {
            tracing::debug!(location = %describe(location), "schema found in memory cache");
            return Ok(schema);
        }

        tracing::info!(location = %describe(location), "loading schema");
        let schema = self.load(location).map_err(|e| {
            tracing::error!(location = %describe(location), error = %e, "failed to load schema");
            e.for_schema(location)
        })?;

        Ok(self.cache.insert(location, schema))
    }

    /// Resolve the bundled default schema.
    ///
    /// # Errors
    ///
    /// Fails only if the embedded schema text is corrupt.
    pub fn resolve_default(&self) -> Result<Arc<Document>, LoadError> {
        self.resolve(BUNDLED_SCHEMA_ID)
    }

    fn load(&self, location: &str) -> Result<Document, LoadError> {
        if is_remote(location) {
            let fetched = self.fetcher.fetch(location)?;
            tracing::debug!(
                url = location,
                content_type = fetched.content_type.as_deref().unwrap_or("<none>"),
                "fetched remote schema"
            );
            parse_text(&fetched.body)
        } else if location == BUNDLED_SCHEMA_ID {
            parse_text(BUNDLED_SCHEMA_TEXT)
        } else {
            load_document(location)
        }
    }
}

impl fmt::Debug for SchemaSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaSource")
            .field("cached", &self.cache.len())
            .finish_non_exhaustive()
    }
}

/// Whether `location` is fetched over the network.
pub fn is_remote(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

/// Short label for log lines; inline schema text is not echoed.
fn describe(location: &str) -> String {
    if location.contains('\n') || location.len() > 256 {
        format!("<inline schema, {} bytes>", location.len())
    } else {
        location.to_string()
    }
}
