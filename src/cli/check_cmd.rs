//! Handler for the `bcc check` subcommand.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::config::{CheckConfig, Config, OutputFormat};
use crate::diagnostics::DiagnosticBag;
use crate::unit::{CompilationUnit, UnitReport};

use super::{collect_units, CliError};

/// Totals over all checked units
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct CheckSummary {
    pub(crate) units: usize,
    pub(crate) errors: usize,
    pub(crate) warnings: usize,
}

impl CheckSummary {
    fn record(&mut self, diagnostics: &DiagnosticBag) {
        self.units += 1;
        self.errors += diagnostics.error_count();
        self.warnings += diagnostics.warning_count();
    }

    pub(crate) fn exit_code(&self) -> ExitCode {
        if self.errors > 0 {
            ExitCode::FAILURE
        } else {
            ExitCode::SUCCESS
        }
    }

    pub(crate) fn describe(&self) -> String {
        if self.errors == 0 && self.warnings == 0 {
            return format!("Checked {} unit(s), no errors found", self.units);
        }
        let mut parts = Vec::new();
        if self.errors > 0 {
            parts.push(format!("{} error(s)", self.errors));
        }
        if self.warnings > 0 {
            parts.push(format!("{} warning(s)", self.warnings));
        }
        format!("Checked {} unit(s), found {}", self.units, parts.join(", "))
    }
}

pub(crate) fn run_check(
    paths: &[PathBuf],
    config: &Config,
    format: OutputFormat,
) -> Result<CheckSummary, CliError> {
    let units = collect_units(paths)?;
    if units.is_empty() {
        return Err(CliError::NoInput);
    }

    let mut summary = CheckSummary::default();
    for path in &units {
        let (report, source) = check_unit(path, &config.check);
        summary.record(&report.diagnostics);

        match format {
            OutputFormat::Json => println!("{}", report.to_json()),
            OutputFormat::Human => print_report(&report, &source),
        }
    }

    tracing::info!(
        units = summary.units,
        errors = summary.errors,
        warnings = summary.warnings,
        "check finished"
    );

    if format == OutputFormat::Human {
        if summary.errors > 0 {
            eprintln!("\n{}", summary.describe());
        } else {
            println!("{}", summary.describe());
        }
    }

    Ok(summary)
}

/// Load, build and check one unit.
///
/// A unit that cannot be loaded or built yields a report with no results and
/// a single error diagnostic, so the remaining units are still checked.
pub(crate) fn check_unit(path: &Path, config: &CheckConfig) -> (UnitReport, String) {
    let built = CompilationUnit::load(path).and_then(CompilationUnit::build);
    match built {
        Ok(unit) => {
            let report = unit.check(config);
            (report, unit.source().to_string())
        }
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "unit rejected");
            let report = UnitReport {
                file: path.to_path_buf(),
                results: Vec::new(),
                diagnostics: DiagnosticBag::from(e.to_diagnostic(path)),
            };
            (report, String::new())
        }
    }
}

fn print_report(report: &UnitReport, source: &str) {
    for (index, result) in report.results.iter().enumerate() {
        if let Ok(ty) = result {
            println!("{}[{}]: {}", report.file.display(), index, ty);
        }
    }
    if !report.diagnostics.is_empty() {
        eprintln!("{}", report.diagnostics.format_text(source));
    }
}
