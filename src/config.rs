//! Configuration file
//!
//! ```json
//! {
//!   "unknown_fields": "strip",
//!   "export_dir": "./schemas",
//!   "log_level": "warn"
//! }
//! ```
//!
//! Every key is optional; an absent file is not an error for the CLI, which
//! falls back to [`RegistryConfig::default`].

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::schema::UnknownFieldPolicy;

/// Log levels accepted in `log_level`
pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config JSON in {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Registry and tooling configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegistryConfig {
    /// Policy for payload keys outside the insertable shape (default: strip)
    #[serde(default)]
    pub unknown_fields: UnknownFieldPolicy,

    /// Directory written by `export` (default: ./schemas)
    #[serde(default = "default_export_dir")]
    pub export_dir: PathBuf,

    /// Default log level when MADRASA_SCHEMA_LOG is unset (default: warn)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_export_dir() -> PathBuf {
    PathBuf::from("./schemas")
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            unknown_fields: UnknownFieldPolicy::default(),
            export_dir: default_export_dir(),
            log_level: default_log_level(),
        }
    }
}

impl RegistryConfig {
    /// Load configuration from file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: RegistryConfig =
            serde_json::from_str(&content).map_err(|e| ConfigError::Parse {
                path: path.to_path_buf(),
                source: e,
            })?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> ConfigResult<()> {
        if !LOG_LEVELS.contains(&self.log_level.as_str()) {
            return Err(ConfigError::Invalid(format!(
                "log_level '{}' must be one of {}",
                self.log_level,
                LOG_LEVELS.join(", ")
            )));
        }

        if self.export_dir.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("export_dir must not be empty".into()));
        }

        Ok(())
    }
}
