//! Analyzer configuration.
//!
//! All analysis tables (signatures, policy lists, pattern catalog) are
//! compiled in; this configuration only covers the knobs around them:
//! scan filters, reporting thresholds, and the clone time limit.

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("configuration file not found: {0}")]
    FileNotFound(String),

    #[error("invalid configuration path: {0}")]
    InvalidPath(String),

    #[error("configuration error: {0}")]
    Parse(#[from] config::ConfigError),
}

/// Runtime settings for the analyzer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Minimum confidence for a detection to appear in reports (1 keeps the
    /// detector's include-if-positive contract)
    pub min_confidence: u8,
    /// File extensions scanned during directory walks (no leading dot)
    pub supported_extensions: Vec<String>,
    /// Directory names skipped entirely during walks
    pub skip_dirs: Vec<String>,
    /// Wall-clock bound for remote repository clones, in seconds
    pub clone_timeout_secs: u64,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            min_confidence: 1,
            supported_extensions: [
                "json", "js", "ts", "py", "java", "go", "rs", "yaml", "yml", "toml", "xml", "md",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            skip_dirs: [".git", "node_modules", "__pycache__", ".venv", "venv"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            clone_timeout_secs: 300,
        }
    }
}

impl AnalyzerConfig {
    /// Load configuration from a TOML file with `ARCHINTEL_` environment
    /// variable overrides (double underscore separates nested keys).
    ///
    /// An explicitly requested file that does not exist is an error; there
    /// is no silent fallback to defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        let path_str = path
            .to_str()
            .ok_or_else(|| ConfigError::InvalidPath(format!("{:?}", path)))?;

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path_str.to_string()));
        }

        let config = Config::builder()
            .add_source(File::with_name(path_str))
            .add_source(
                Environment::with_prefix("ARCHINTEL")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// True if a file with this extension should be scanned.
    pub fn supports_extension(&self, ext: &str) -> bool {
        let ext = ext.to_lowercase();
        self.supported_extensions.iter().any(|e| *e == ext)
    }

    /// True if a directory with this name should be skipped.
    pub fn skips_dir(&self, name: &str) -> bool {
        self.skip_dirs.iter().any(|d| d == name)
    }
}
