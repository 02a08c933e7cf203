//!
//! Configuration loaded from `.erbcop.toml`.
//!
//! ```toml
//! [linters.rubocop]
//! enabled = true
//! command = ["bundle", "exec", "rubocop"]
//! ignored_cops = ["Layout/TrailingWhitespace", "Style/FrozenStringLiteralComment"]
//! ```

use crate::filter::SuppressionSet;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = ".erbcop.toml";

/// Cops that only make sense for whole Ruby files, not extracted fragments.
pub const DEFAULT_IGNORED_COPS: &[&str] = &[
    "Layout/InitialIndentation",
    "Layout/LeadingEmptyLines",
    "Layout/TrailingEmptyLines",
    "Layout/TrailingWhitespace",
    "Layout/LineLength",
    "Lint/UselessAssignment",
    "Naming/FileName",
    "Style/FrozenStringLiteralComment",
];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Represents the complete configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub linters: LintersConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LintersConfig {
    #[serde(default)]
    pub rubocop: RubocopConfig,
}

/// Settings for the RuboCop bridge.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RubocopConfig {
    /// Run RuboCop at all (default: true)
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Program and leading arguments used to start RuboCop
    #[serde(default = "default_command")]
    pub command: Vec<String>,

    /// Cops whose offenses are dropped. Replaces the default list when set.
    #[serde(default = "default_ignored_cops")]
    pub ignored_cops: Vec<String>,
}

fn default_true() -> bool {
    true
}

fn default_command() -> Vec<String> {
    vec!["rubocop".to_string()]
}

fn default_ignored_cops() -> Vec<String> {
    DEFAULT_IGNORED_COPS.iter().map(|cop| cop.to_string()).collect()
}

impl Default for RubocopConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            command: default_command(),
            ignored_cops: default_ignored_cops(),
        }
    }
}

impl RubocopConfig {
    pub fn suppression_set(&self) -> SuppressionSet {
        self.ignored_cops.iter().cloned().collect()
    }
}

impl Config {
    /// Parse configuration from TOML text. `path` is only used in errors.
    pub fn from_toml_str(content: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content, path)
    }

    /// Load the explicit config file, else `.erbcop.toml` in `dir`, else defaults.
    pub fn load(explicit: Option<&Path>, dir: &Path) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            log::debug!("Loading config from {}", path.display());
            return Self::from_file(path);
        }

        let candidate = dir.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            log::debug!("Found config file {}", candidate.display());
            return Self::from_file(&candidate);
        }

        log::debug!("No config file found, using defaults");
        Ok(Self::default())
    }
}
