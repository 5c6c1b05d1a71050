//! `bomblab validate`
//!
//! Checks bomb files without running them and reports every issue.

use std::path::Path;

use crate::cli::args::{OutputFormat, ValidateArgs};
use crate::config::{BombLoader, LoaderOptions};
use crate::error::{BombError, ConfigError, ValidationIssue};

/// Validation outcome for one file.
struct Report {
    errors: Vec<String>,
    warnings: Vec<String>,
}

fn strings(issues: &[ValidationIssue]) -> Vec<String> {
    issues.iter().map(ToString::to_string).collect()
}

fn check_file(loader: &BombLoader, path: &Path) -> (Report, Option<ConfigError>) {
    tracing::info!(file = %path.display(), "validating bomb");
    match loader.load(path) {
        Ok(loaded) => (
            Report {
                errors: Vec::new(),
                warnings: strings(&loaded.warnings),
            },
            None,
        ),
        Err(err) => {
            let errors = match &err {
                ConfigError::ValidationError { errors, .. } => strings(errors),
                other => vec![other.to_string()],
            };
            (
                Report {
                    errors,
                    warnings: Vec::new(),
                },
                Some(err),
            )
        }
    }
}

/// Validate bomb files.
///
/// Every file is checked and reported before the first failure, if any,
/// is returned.
///
/// # Errors
///
/// Returns the config error of the first file that failed.
pub fn run(args: &ValidateArgs) -> Result<(), BombError> {
    let loader = BombLoader::new(LoaderOptions {
        strict: args.strict,
        ..LoaderOptions::default()
    });

    let mut first_failure = None;
    let mut json_reports = Vec::with_capacity(args.files.len());
    for path in &args.files {
        let (report, failure) = check_file(&loader, path);
        match args.format {
            OutputFormat::Human => {
                let status = if report.errors.is_empty() { "ok" } else { "FAILED" };
                println!("{}: {status}", path.display());
                for line in report.errors.iter().chain(&report.warnings) {
                    println!("  {line}");
                }
            }
            OutputFormat::Json => json_reports.push(serde_json::json!({
                "file": path.display().to_string(),
                "valid": report.errors.is_empty(),
                "errors": report.errors,
                "warnings": report.warnings,
            })),
        }
        if first_failure.is_none() {
            first_failure = failure;
        }
    }

    if args.format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&json_reports)?);
    }
    first_failure.map_or(Ok(()), |err| Err(err.into()))
}
