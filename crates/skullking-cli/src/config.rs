use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::Level;

use skullking_core::model::player::DEFAULT_TOTAL_ROUNDS;

const DEFAULT_STORE_DIR: &str = ".skullking";
const DEFAULT_LOG_FILE: &str = "skullking.jsonl";

/// Root configuration loaded from YAML.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CliConfig {
    #[serde(default = "default_store_dir")]
    pub store_dir: PathBuf,
    #[serde(default = "default_rounds")]
    pub default_rounds: u32,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            store_dir: default_store_dir(),
            default_rounds: default_rounds(),
            logging: LoggingConfig::default(),
        }
    }
}

impl CliConfig {
    /// Load configuration from a YAML file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let path_buf = path.to_path_buf();
        let file = File::open(path).map_err(|source| ConfigError::Read {
            source,
            path: path_buf.clone(),
        })?;
        let reader = BufReader::new(file);
        let mut cfg: CliConfig =
            serde_yaml::from_reader(reader).map_err(|source| ConfigError::Parse {
                source,
                path: path_buf.clone(),
            })?;
        cfg.validate().map_err(|source| ConfigError::Invalid {
            path: path_buf,
            source,
        })?;
        Ok(cfg)
    }

    /// Validate the configuration without performing I/O.
    pub fn validate(&mut self) -> Result<(), ValidationError> {
        if self.store_dir.as_os_str().is_empty() {
            return Err(ValidationError::InvalidField {
                field: "store_dir".to_string(),
                message: "path must not be empty".to_string(),
            });
        }

        if self.default_rounds == 0 {
            return Err(ValidationError::InvalidField {
                field: "default_rounds".to_string(),
                message: "a game needs at least one round".to_string(),
            });
        }

        self.logging.normalize();
        if self.logging.level().is_none() {
            return Err(ValidationError::InvalidField {
                field: "logging.tracing_level".to_string(),
                message: format!("unknown level '{}'", self.logging.tracing_level),
            });
        }
        Ok(())
    }

    /// Where structured logs go when enabled.
    pub fn log_path(&self) -> PathBuf {
        self.logging
            .log_file
            .clone()
            .unwrap_or_else(|| self.store_dir.join(DEFAULT_LOG_FILE))
    }
}

fn default_store_dir() -> PathBuf {
    PathBuf::from(DEFAULT_STORE_DIR)
}

fn default_rounds() -> u32 {
    DEFAULT_TOTAL_ROUNDS
}

/// Logging configuration defaults to human-readable logs on stderr.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default)]
    pub enable_structured: bool,
    #[serde(default = "default_tracing_level")]
    pub tracing_level: String,
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enable_structured: false,
            tracing_level: default_tracing_level(),
            log_file: None,
        }
    }
}

impl LoggingConfig {
    fn normalize(&mut self) {
        if self.tracing_level.trim().is_empty() {
            self.tracing_level = default_tracing_level();
        }
    }

    pub fn level(&self) -> Option<Level> {
        match self.tracing_level.to_ascii_lowercase().as_str() {
            "trace" => Some(Level::TRACE),
            "debug" => Some(Level::DEBUG),
            "info" => Some(Level::INFO),
            "warn" | "warning" => Some(Level::WARN),
            "error" => Some(Level::ERROR),
            _ => None,
        }
    }
}

fn default_tracing_level() -> String {
    "warn".to_string()
}

/// Errors surfaced when loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        #[source]
        source: serde_yaml::Error,
        path: PathBuf,
    },
    #[error("invalid configuration in {path:?}: {source}")]
    Invalid {
        path: PathBuf,
        source: ValidationError,
    },
}

/// Validation failures captured with contextual metadata.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{field}: {message}")]
    InvalidField { field: String, message: String },
}
