//! Handler for the `bcc deps` subcommand.

use std::path::Path;

use crate::config::OutputFormat;
use crate::unit::CompilationUnit;

use super::CliError;

pub(crate) fn run_deps(path: &Path, format: OutputFormat) -> Result<(), CliError> {
    let unit = CompilationUnit::load(path)?.build()?;
    let names = dependency_names(&unit.dependencies());

    match format {
        OutputFormat::Json => {
            let json = serde_json::json!({
                "file": unit.file.display().to_string(),
                "dependencies": names,
            });
            println!("{}", json);
        }
        OutputFormat::Human => {
            for (index, deps) in names.iter().enumerate() {
                println!("{}[{}]: {}", unit.file.display(), index, deps.join(", "));
            }
        }
    }
    Ok(())
}

/// Token names per expression, in dependency order
pub(crate) fn dependency_names(deps: &[Vec<crate::env::Declaration>]) -> Vec<Vec<String>> {
    deps.iter()
        .map(|tokens| tokens.iter().map(|d| d.name.clone()).collect())
        .collect()
}
