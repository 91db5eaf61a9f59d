//! Configuration for `bcc` (bcc.toml)

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// File name looked up by `Config::discover`
pub const CONFIG_FILE: &str = "bcc.toml";

/// Project configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Type checking options
    #[serde(default)]
    pub check: CheckConfig,

    /// Output options
    #[serde(default)]
    pub output: OutputConfig,
}

/// Type checking options
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CheckConfig {
    /// Stop a unit at its first resolution failure
    #[serde(default)]
    pub fail_fast: bool,
}

/// Output options
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
}

/// How diagnostics and results are printed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Human,
    Json,
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read {path}: {message}")]
    Io { path: String, message: String },

    #[error("invalid configuration: {0}")]
    Parse(String),

    #[error("could not serialize configuration: {0}")]
    Serialize(String),
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        Self::parse(&content)
    }

    /// Parse configuration from a TOML string
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Serialize the configuration to TOML
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))
    }

    /// Load `dir/bcc.toml` if present, defaults otherwise
    pub fn discover(dir: &Path) -> Result<Self, ConfigError> {
        let path = dir.join(CONFIG_FILE);
        if path.is_file() {
            tracing::debug!(path = %path.display(), "loading configuration");
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }
}

#[cfg(test)]
mod tests;
