//! Run settings loaded from an optional TOML file.
//!
//! Configuration is only read when a file is named with `--config`; without
//! one every setting keeps its default. The category table is fixed and is
//! not configurable.
//!
//! # Configuration File Format
//!
//! ```toml
//! [sort]
//! verbose = true
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Errors that can occur while loading configuration.
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// Configuration file not found at the specified path.
    ConfigNotFound(PathBuf),
    /// Invalid TOML syntax or structure.
    ConfigInvalid(String),
    /// IO error while reading configuration.
    IoError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ConfigNotFound(path) => {
                write!(f, "Configuration file not found: {}", path.display())
            }
            ConfigError::ConfigInvalid(msg) => write!(f, "Invalid configuration: {}", msg),
            ConfigError::IoError(msg) => write!(f, "Could not read configuration: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Top-level configuration, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SortConfig {
    #[serde(default)]
    pub sort: SortSettings,
}

/// General run settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SortSettings {
    /// Narrate every decision, as if `--verbose` were passed.
    #[serde(default)]
    pub verbose: bool,
}

impl SortConfig {
    /// Loads the file at `config_path`, or returns the defaults when no path
    /// is given. No other location is searched.
    ///
    /// # Errors
    ///
    /// Returns an error if the named file is missing, unreadable, or invalid.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        match config_path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ConfigNotFound` if file does not exist.
    /// Returns `ConfigError::ConfigInvalid` if TOML parsing fails.
    /// Returns `ConfigError::IoError` if file cannot be read.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::ConfigNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;
        log::debug!("loaded configuration from {}", path.display());

        Self::parse(&content)
    }

    /// Parse configuration from TOML text.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::ConfigInvalid(e.to_string()))
    }
}
