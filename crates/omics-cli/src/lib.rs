//! # omics-cli — Command-Line Front End for OmicsGuard
//!
//! Provides the `omicsguard` binary:
//!
//! ```bash
//! omicsguard --data sample.yaml
//! omicsguard --data sample.json --schema https://example.org/phenopacket.json
//! omicsguard --data sample.json --config omicsguard.yaml -vv
//! ```
//!
//! ## Output Contract
//!
//! - stdout carries exactly one line: `true` (valid) or `false` (invalid).
//! - Violations go to stderr as ` - [path] message`, in discovery order.
//! - Logs go to stderr through `tracing`.
//! - Exit status is [`EXIT_VALID`] for a valid document and [`EXIT_FAILURE`]
//!   for anything else: invalid data, operational failures, internal errors.
//!
//! ## Crate Policy
//!
//! - Argument parsing and output formatting live here; validation logic
//!   lives in `omics-schema`.

pub mod config;
pub mod validate;

use omics_core::{GuardError, LoadError};
use omics_schema::RuleError;
use tracing_subscriber::EnvFilter;

/// Exit status for a document that conforms to its schema.
pub const EXIT_VALID: u8 = 0;

/// Exit status for invalid documents and every kind of failure.
pub const EXIT_FAILURE: u8 = 1;

/// How a failed run should be reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Bad input or environment: unreadable file, unreachable URL, unparsable
    /// text, bad config, or a closed output stream.
    Operational,
    /// A defect or an unforeseen engine failure.
    Internal,
}

/// Classify a run failure for logging severity.
pub fn classify(err: &anyhow::Error) -> FailureKind {
    if let Some(guard) = err.downcast_ref::<GuardError>() {
        return if guard.is_internal() {
            FailureKind::Internal
        } else {
            FailureKind::Operational
        };
    }
    if err.downcast_ref::<LoadError>().is_some()
        || err.downcast_ref::<RuleError>().is_some()
        || err.downcast_ref::<serde_json::Error>().is_some()
        || err.downcast_ref::<std::io::Error>().is_some()
    {
        return FailureKind::Operational;
    }
    FailureKind::Internal
}

/// Log a run failure at the severity its kind deserves.
pub fn report_failure(err: &anyhow::Error) {
    match classify(err) {
        FailureKind::Operational => tracing::error!("{err:#}"),
        FailureKind::Internal => {
            tracing::error!("an unexpected error occurred during validation: {err:?}")
        }
    }
}

/// Install the global `tracing` subscriber, writing to stderr.
///
/// `RUST_LOG` wins when set; otherwise `verbose` picks the level
/// (0 = warn, 1 = info, 2 = debug, 3+ = trace).
pub fn init_tracing(verbose: u8, json: bool) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}
