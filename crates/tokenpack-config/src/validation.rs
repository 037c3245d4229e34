//! Configuration validation framework

use crate::{ConfigError, ConfigResult};

/// Tracing levels accepted by the subscriber setup
pub const TRACING_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Trait for validating configuration values
pub trait Validate {
    /// Validate this configuration object
    ///
    /// # Errors
    /// Returns validation errors if the configuration is invalid
    fn validate(&self) -> ConfigResult<()>;
}

/// Validate a value is within a range
///
/// # Errors
/// Returns `ConfigError::OutOfRange` if value is outside the specified range
pub fn validate_range(value: u64, min: u64, max: u64, field_name: &str) -> ConfigResult<()> {
    if value < min || value > max {
        Err(ConfigError::OutOfRange {
            field: field_name.to_string(),
            value,
            min,
            max,
        })
    } else {
        Ok(())
    }
}

/// Validate a string is not empty
///
/// # Errors
/// Returns `ConfigError::MissingField` if the string is empty or whitespace-only
pub fn validate_non_empty(value: &str, field_name: &str) -> ConfigResult<()> {
    if value.trim().is_empty() {
        Err(ConfigError::MissingField {
            field: field_name.to_string(),
        })
    } else {
        Ok(())
    }
}

/// Validate a string is one of a fixed set of choices (case-insensitive)
///
/// # Errors
/// Returns `ConfigError::InvalidValue` listing the accepted choices
pub fn validate_one_of(value: &str, choices: &[&str], field_name: &str) -> ConfigResult<()> {
    if choices.iter().any(|c| c.eq_ignore_ascii_case(value)) {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            field: field_name.to_string(),
            value: value.to_string(),
            expected: format!("one of: {}", choices.join(", ")),
        })
    }
}

/// Validate a bare file extension (`cpp`, not `.cpp` or `*.cpp`)
///
/// # Errors
/// Returns `ConfigError::MissingField` when empty and
/// `ConfigError::InvalidValue` when it carries a dot or path separator
pub fn validate_extension(value: &str, field_name: &str) -> ConfigResult<()> {
    validate_non_empty(value, field_name)?;
    if value.contains(['.', '/', '\\', '*']) {
        return Err(ConfigError::InvalidValue {
            field: field_name.to_string(),
            value: value.to_string(),
            expected: "a bare extension such as 'cpp'".to_string(),
        });
    }
    Ok(())
}
