//! Command-line interface for the bCC semantic checker
//!
//! Provides commands: check, deps, explain

mod check_cmd;
mod deps_cmd;
mod explain_cmd;

use clap::{Parser, Subcommand};
use miette::Diagnostic as MietteDiagnostic;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use thiserror::Error;

use crate::config::{Config, ConfigError, OutputFormat};
use crate::unit::UnitError;

/// File extension of compilation units picked up from directories
pub const UNIT_EXTENSION: &str = "json";

/// bcc - resolve expression types and dependencies of compilation units
#[derive(Parser, Debug)]
#[command(name = "bcc")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Output results and diagnostics as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Show debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file (defaults to ./bcc.toml when present)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve the type of every expression in the given units
    Check {
        /// Unit files or directories containing them
        #[arg(value_name = "FILES", default_value = ".")]
        paths: Vec<PathBuf>,

        /// Stop each unit at its first resolution failure
        #[arg(long)]
        fail_fast: bool,
    },

    /// List the dependency tokens of every expression in a unit
    Deps {
        /// Unit file
        #[arg(value_name = "FILE")]
        path: PathBuf,
    },

    /// Explain an error or warning code
    Explain {
        /// Code to explain (e.g., E1002, W0006)
        code: String,
    },
}

/// Errors that abort a command
#[derive(Debug, Error, MietteDiagnostic)]
pub enum CliError {
    #[error(transparent)]
    #[diagnostic(code(bcc::config), help("see `bcc.toml` for the accepted keys"))]
    Config(#[from] ConfigError),

    #[error(transparent)]
    #[diagnostic(code(bcc::unit))]
    Unit(#[from] UnitError),

    #[error("could not read directory {path}: {message}")]
    #[diagnostic(code(bcc::io))]
    Walk { path: String, message: String },

    #[error("no compilation units found")]
    #[diagnostic(
        code(bcc::no_input),
        help("pass unit files or a directory containing `.json` units")
    )]
    NoInput,

    #[error("unknown code `{0}`")]
    #[diagnostic(code(bcc::unknown_code), help("codes look like E1002 or W0006"))]
    UnknownCode(String),
}

impl Cli {
    /// Configuration from `--config`, or `bcc.toml` in the working directory
    pub fn load_config(&self) -> Result<Config, CliError> {
        let config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::discover(Path::new("."))?,
        };
        Ok(config)
    }

    /// Output format after applying `--json`
    pub fn output_format(&self, config: &Config) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            config.output.format
        }
    }

    /// Run the parsed command
    pub fn run(&self) -> Result<ExitCode, CliError> {
        let mut config = self.load_config()?;
        let format = self.output_format(&config);

        match &self.command {
            Command::Check { paths, fail_fast } => {
                config.check.fail_fast |= *fail_fast;
                let summary = check_cmd::run_check(paths, &config, format)?;
                Ok(summary.exit_code())
            }
            Command::Deps { path } => {
                deps_cmd::run_deps(path, format)?;
                Ok(ExitCode::SUCCESS)
            }
            Command::Explain { code } => {
                explain_cmd::run_explain(code)?;
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}

/// Expand directories into the unit files they contain, sorted by path
pub(crate) fn collect_units(paths: &[PathBuf]) -> Result<Vec<PathBuf>, CliError> {
    let mut units = Vec::new();
    for path in paths {
        if path.is_dir() {
            let mut found: Vec<PathBuf> = walkdir(path)?
                .into_iter()
                .filter(|entry| entry.extension().is_some_and(|ext| ext == UNIT_EXTENSION))
                .collect();
            found.sort();
            units.extend(found);
        } else {
            // Explicit files are taken as given; a missing one reports when loaded.
            units.push(path.clone());
        }
    }
    Ok(units)
}

/// Simple recursive directory walker
fn walkdir(path: &Path) -> Result<Vec<PathBuf>, CliError> {
    let walk_error = |e: std::io::Error| CliError::Walk {
        path: path.display().to_string(),
        message: e.to_string(),
    };

    let mut results = Vec::new();
    for entry in std::fs::read_dir(path).map_err(walk_error)? {
        let entry_path = entry.map_err(walk_error)?.path();
        if entry_path.is_file() {
            results.push(entry_path);
        } else if entry_path.is_dir() {
            results.extend(walkdir(&entry_path)?);
        }
    }
    Ok(results)
}
