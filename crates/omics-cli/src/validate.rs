//! # Validate Command
//!
//! Resolves the schema, loads the data document, validates, and writes the
//! verdict. Operational and internal failures propagate as errors so the
//! caller can log them; schema violations are written out and mapped to
//! [`EXIT_FAILURE`].

use std::io::Write;

use anyhow::Context;
use clap::Args;
use omics_schema::{validate_locations, SchemaSource};

use crate::config::GuardConfig;
use crate::{EXIT_FAILURE, EXIT_VALID};

/// Arguments for validating one document.
#[derive(Args, Debug, Clone)]
pub struct ValidateArgs {
    /// Path to the data file (JSON/YAML) to validate.
    #[arg(long)]
    pub data: String,

    /// Path or URL to the JSON/YAML schema. Defaults to the bundled
    /// Phenopacket schema.
    #[arg(long)]
    pub schema: Option<String>,
}

/// Run one validation and write the verdict.
///
/// Writes `true` or `false` to `out`, and one ` - [path] message` line per
/// violation to `diag`.
///
/// # Errors
///
/// Returns loading failures (`GuardError::Load`), engine failures
/// (`GuardError::Internal`), rule configuration errors, and write errors.
pub fn run_validate(
    args: &ValidateArgs,
    config: &GuardConfig,
    source: &SchemaSource,
    out: &mut impl Write,
    diag: &mut impl Write,
) -> anyhow::Result<u8> {
    let schema_location = config.schema_location(args.schema.as_deref());
    tracing::debug!(
        schema = schema_location.unwrap_or("<bundled>"),
        data = %args.data,
        "validating"
    );

    let rules = config.build_rules()?;
    let report = validate_locations(source, schema_location, &args.data, rules)?;

    if report.is_valid() {
        writeln!(out, "true").context("writing verdict")?;
        return Ok(EXIT_VALID);
    }

    writeln!(out, "false").context("writing verdict")?;
    for line in report.rendered() {
        writeln!(diag, " - {line}").context("writing violations")?;
    }
    Ok(EXIT_FAILURE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{classify, FailureKind};
    use std::path::Path;

    const ID_SCHEMA: &str =
        r#"{"type":"object","required":["id"],"properties":{"id":{"type":"string"}}}"#;

    fn write(dir: &Path, name: &str, contents: &str) -> String {
        let path = dir.join(name);
        std::fs::write(&path, contents).unwrap();
        path.to_str().unwrap().to_string()
    }

    fn run(args: &ValidateArgs, config: &GuardConfig) -> (anyhow::Result<u8>, String, String) {
        let source = SchemaSource::new().unwrap();
        let (mut out, mut diag) = (Vec::new(), Vec::new());
        let result = run_validate(args, config, &source, &mut out, &mut diag);
        (
            result,
            String::from_utf8(out).unwrap(),
            String::from_utf8(diag).unwrap(),
        )
    }

    #[test]
    fn valid_document_prints_true() {
        let dir = tempfile::tempdir().unwrap();
        let args = ValidateArgs {
            data: write(dir.path(), "data.json", r#"{"id": "PROBAND001"}"#),
            schema: Some(write(dir.path(), "schema.json", ID_SCHEMA)),
        };

        let (result, out, diag) = run(&args, &GuardConfig::default());
        assert_eq!(result.unwrap(), EXIT_VALID);
        assert_eq!(out, "true\n");
        assert!(diag.is_empty());
    }

    #[test]
    fn invalid_document_prints_false_and_violations() {
        let dir = tempfile::tempdir().unwrap();
        let args = ValidateArgs {
            data: write(dir.path(), "data.yaml", "name: nobody\n"),
            schema: Some(write(dir.path(), "schema.json", ID_SCHEMA)),
        };

        let (result, out, diag) = run(&args, &GuardConfig::default());
        assert_eq!(result.unwrap(), EXIT_FAILURE);
        assert_eq!(out, "false\n");
        assert!(diag.starts_with(" - [root] "), "{diag}");
    }

    #[test]
    fn config_schema_and_rules_apply() {
        let dir = tempfile::tempdir().unwrap();
        let config = GuardConfig::from_document(serde_json::json!({
            "schema": write(dir.path(), "schema.json", ID_SCHEMA),
            "rules": [{"kind": "prefix", "pointer": "/id", "prefix": "PROBAND"}]
        }))
        .unwrap();
        let args = ValidateArgs {
            data: write(dir.path(), "data.json", r#"{"id": "SAMPLE1"}"#),
            schema: None,
        };

        let (result, out, diag) = run(&args, &config);
        assert_eq!(result.unwrap(), EXIT_FAILURE);
        assert_eq!(out, "false\n");
        assert_eq!(diag, " - [id] 'SAMPLE1' does not start with 'PROBAND'\n");
    }

    #[test]
    fn bundled_schema_is_the_default() {
        let dir = tempfile::tempdir().unwrap();
        let args = ValidateArgs {
            data: write(dir.path(), "data.json", r#"{"id": "PROBAND001"}"#),
            schema: None,
        };

        let (result, out, diag) = run(&args, &GuardConfig::default());
        assert_eq!(result.unwrap(), EXIT_FAILURE);
        assert_eq!(out, "false\n");
        assert!(diag.contains("subject"), "{diag}");
        assert!(diag.contains("metaData"), "{diag}");
    }

    #[test]
    fn unloadable_schema_is_an_operational_failure() {
        let dir = tempfile::tempdir().unwrap();
        let args = ValidateArgs {
            data: write(dir.path(), "data.json", "{}"),
            schema: Some("{\n  \"type\": [".to_string()),
        };

        let (result, out, _) = run(&args, &GuardConfig::default());
        let err = result.unwrap_err();
        assert_eq!(classify(&err), FailureKind::Operational);
        assert!(err.to_string().starts_with("could not load schema from"));
        assert!(out.is_empty(), "no verdict on failure");
    }

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::ErrorKind::BrokenPipe.into())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn closed_stdout_is_an_operational_failure() {
        let dir = tempfile::tempdir().unwrap();
        let args = ValidateArgs {
            data: write(dir.path(), "data.json", r#"{"id": "PROBAND001"}"#),
            schema: Some(write(dir.path(), "schema.json", ID_SCHEMA)),
        };
        let source = SchemaSource::new().unwrap();

        let err = run_validate(&args, &GuardConfig::default(), &source, &mut ClosedPipe, &mut Vec::new())
            .unwrap_err();
        assert_eq!(err.to_string(), "writing verdict");
        assert_eq!(classify(&err), FailureKind::Operational);
    }

    #[test]
    fn uncompilable_schema_is_an_internal_failure() {
        let dir = tempfile::tempdir().unwrap();
        let args = ValidateArgs {
            data: write(dir.path(), "data.json", "{}"),
            schema: Some(write(dir.path(), "schema.json", r#"{"type": 12}"#)),
        };

        let (result, _, _) = run(&args, &GuardConfig::default());
        assert_eq!(classify(&result.unwrap_err()), FailureKind::Internal);
    }
}
