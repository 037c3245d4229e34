//! Errors raised while loading or validating configuration

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    /// A required string setting is empty
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    #[error("{field} = {value} is out of range (allowed {min}..={max})")]
    OutOfRange {
        field: String,
        value: u64,
        min: u64,
        max: u64,
    },

    #[error("Invalid value '{value}' for {field} (expected {expected})")]
    InvalidValue {
        field: String,
        value: String,
        expected: String,
    },

    /// The configuration file exists in name only
    #[error("Cannot read config file {}: {source}", path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Config file {} is not valid TOML: {source}", path.display())]
    TomlParsing {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl ConfigError {
    /// Name of the offending setting, when the error is about one
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::MissingField { field }
            | Self::OutOfRange { field, .. }
            | Self::InvalidValue { field, .. } => Some(field),
            Self::ReadFile { .. } | Self::TomlParsing { .. } => None,
        }
    }
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;
