//! # omicsguard CLI entry point
//!
//! Parses command-line arguments, installs logging, and maps the outcome of
//! a validation run onto the process exit status.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use omics_cli::config::GuardConfig;
use omics_cli::validate::{run_validate, ValidateArgs};
use omics_cli::{init_tracing, report_failure, EXIT_FAILURE};
use omics_schema::SchemaSource;

/// OmicsGuard: validate genomic metadata against a schema.
///
/// Validates a JSON or YAML data file against a JSON Schema (Draft 7). If no
/// schema is provided, the bundled GA4GH Phenopacket schema is used.
/// Prints `true` to stdout if validation passes, `false` otherwise;
/// violations are printed to stderr.
#[derive(Parser, Debug)]
#[command(name = "omicsguard", version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    validate: ValidateArgs,

    /// Path to a JSON/YAML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Emit log lines as JSON.
    #[arg(long)]
    log_json: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.log_json);

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "omicsguard starting");

    let result = GuardConfig::load(cli.config.as_deref()).and_then(|config| {
        let source = SchemaSource::new()?;
        run_validate(
            &cli.validate,
            &config,
            &source,
            &mut std::io::stdout().lock(),
            &mut std::io::stderr().lock(),
        )
    });

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            report_failure(&e);
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_requires_data() {
        assert!(Cli::try_parse_from(["omicsguard"]).is_err());
    }

    #[test]
    fn cli_parse_minimal() {
        let cli = Cli::try_parse_from(["omicsguard", "--data", "sample.json"]).unwrap();
        assert_eq!(cli.validate.data, "sample.json");
        assert!(cli.validate.schema.is_none());
        assert!(cli.config.is_none());
        assert_eq!(cli.verbose, 0);
        assert!(!cli.log_json);
    }

    #[test]
    fn cli_parse_all_options() {
        let cli = Cli::try_parse_from([
            "omicsguard",
            "--data",
            "sample.yaml",
            "--schema",
            "https://example.org/schema.json",
            "--config",
            "omicsguard.yaml",
            "-vv",
            "--log-json",
        ])
        .unwrap();
        assert_eq!(
            cli.validate.schema.as_deref(),
            Some("https://example.org/schema.json")
        );
        assert_eq!(cli.config, Some(PathBuf::from("omicsguard.yaml")));
        assert_eq!(cli.verbose, 2);
        assert!(cli.log_json);
    }
}
