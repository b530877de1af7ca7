//! # omics-schema — Schema Resolution & Metadata Validation
//!
//! Validates JSON/YAML metadata documents against a JSON Schema and reports
//! every violation as an addressable [`omics_core::ErrorRecord`].
//!
//! ## Pipeline
//!
//! 1. [`SchemaSource`] resolves a schema location (path, URL, inline text,
//!    or [`BUNDLED_SCHEMA_ID`]) and caches the parsed document in memory.
//! 2. [`load_document`] resolves the data document, deciding between path
//!    and inline content, and between JSON and YAML.
//! 3. [`ValidationEngine`] runs Draft 7 validation plus any configured
//!    [`ValidationRule`]s.
//! 4. [`validate_locations`] chains the three and returns a
//!    [`ValidationReport`].
//!
//! ## Crate Policy
//!
//! - Depends only on `omics-core` internally.
//! - Loading failures are errors; schema violations are return values.
//! - The only network access is the schema fetch, bounded by
//!   [`FETCH_TIMEOUT`].

pub mod bundled;
pub mod engine;
pub mod fetch;
pub mod loader;
pub mod pipeline;
pub mod rules;
pub mod source;

pub use bundled::BUNDLED_SCHEMA_ID;
pub use engine::{validate, EngineError, ValidationEngine};
pub use fetch::{FetchedSchema, HttpFetcher, SchemaFetcher, FETCH_TIMEOUT};
pub use loader::{load_document, parse_text, ContentSource, MAX_PATH_PROBE_LEN};
pub use pipeline::{validate_locations, ValidationReport};
pub use rules::{ContainsRule, PrefixRule, RuleConfig, RuleError, ValidationRule};
pub use source::{is_remote, SchemaCache, SchemaSource};
