//! # omics-core — Foundational Types for OmicsGuard
//!
//! Leaf crate of the workspace. Defines the value types that flow between
//! the loading layer, the validation engine, and the command-line front end:
//!
//! - [`Document`] — a parsed JSON or YAML tree. Schema and data documents
//!   share the same representation and are never mutated after parsing.
//! - [`ErrorRecord`] — one structural violation: a human-readable message
//!   plus the location of the offending value, rendered `[path] message`.
//! - [`LoadError`] / [`GuardError`] — the failure taxonomy. Schema
//!   violations are *not* errors; they are ordinary `Vec<ErrorRecord>`
//!   return values.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `omics-*` crates.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod document;
pub mod error;
pub mod record;

pub use document::{path_from_pointer, Document, PathSegment};
pub use error::{BoxError, GuardError, LoadError};
pub use record::{render_path, ErrorRecord, ROOT_PATH};
