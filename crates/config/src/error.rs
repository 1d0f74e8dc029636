//! Errors for loading, saving and editing settings

use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read {path}: {source}")]
    ReadError { path: PathBuf, source: io::Error },

    #[error("Cannot write {path}: {source}")]
    WriteError { path: PathBuf, source: io::Error },

    /// The file is not valid TOML or has wrongly typed values
    #[error("{path} is not a valid config file: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Cannot serialize settings: {0}")]
    SerializeError(#[from] toml::ser::Error),

    /// Refused to save a config with invalid values
    #[error("Invalid settings: {0}")]
    ValidationError(String),

    /// A setting the current program needs is empty
    #[error("Setting '{key}' is not set")]
    MissingSetting { key: String },

    #[error("Invalid value for '{key}': {reason}")]
    InvalidSetting { key: String, reason: String },

    #[error("Cannot create config directory {path}: {source}")]
    DirectoryCreationError { path: PathBuf, source: io::Error },

    #[error("Cannot find a config directory: {reason}")]
    PathResolutionError { reason: String },

    #[error("Cannot back up the previous config: {source}")]
    BackupError { source: io::Error },

    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),
}

impl ConfigError {
    /// The file exists but cannot be used; the programs refuse to start
    pub fn is_corruption(&self) -> bool {
        matches!(
            self,
            ConfigError::ParseError { .. } | ConfigError::ReadError { .. }
        )
    }
}

/// One bad field, e.g. `notion.page_size`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the field in `config.toml`
    pub field: String,
    pub message: String,
    /// The rejected value, when it is worth showing
    pub value: Option<String>,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            value: None,
        }
    }

    pub fn with_value(
        field: impl Into<String>,
        message: impl Into<String>,
        value: impl ToString,
    ) -> Self {
        Self {
            value: Some(value.to_string()),
            ..Self::new(field, message)
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{} {} (got '{}')", self.field, self.message, value),
            None => write!(f, "{} {}", self.field, self.message),
        }
    }
}

impl std::error::Error for ValidationError {}
