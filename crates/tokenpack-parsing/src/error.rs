//! Error types for the parsing crate
//!
//! Covers everything that happens before packing: loading a tokenizer,
//! reading source files, finding function boundaries, and counting tokens.

use std::path::Path;
use thiserror::Error;
use tokenpack_common::{CommonError, impl_common_conversions};

/// Parsing-specific error types
#[derive(Error, Debug)]
pub enum ParsingError {
    /// A model argument that could not be turned into a token counter
    #[error("Failed to load model '{model}': {message}")]
    ModelLoad { model: String, message: String },

    /// Source text whose function boundaries could not be resolved
    #[error("Parse error: {0}")]
    Parse(String),

    /// Input path that is missing or yielded no readable files
    #[error("Cannot read input '{path}': {message}")]
    UnreadableInput { path: String, message: String },

    /// No grammar registered for the requested language or extension
    #[error("Language not supported: {0}")]
    LanguageUnsupported(String),

    /// Tree-sitter setup failure
    #[error("Tree-sitter error: {0}")]
    TreeSitterError(String),

    /// Tokenizer failure while counting a unit
    #[error("Token counting error: {0}")]
    TokenCountingError(String),

    /// IO error wrapper
    #[error("IO error: {0}")]
    Io(String),

    /// Other error (fallback)
    #[error("Other error: {0}")]
    Other(String),
}

impl ParsingError {
    /// Create a model load error
    pub fn model_load(model: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ModelLoad {
            model: model.into(),
            message: message.into(),
        }
    }

    /// Create an unreadable input error for `path`
    pub fn unreadable(path: &Path, message: impl Into<String>) -> Self {
        Self::UnreadableInput {
            path: path.display().to_string(),
            message: message.into(),
        }
    }

    /// Create a token counting error
    pub fn token_counting(msg: impl Into<String>) -> Self {
        Self::TokenCountingError(msg.into())
    }
}

impl CommonError for ParsingError {
    fn io_error(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }

    fn parse_error(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    fn other_error(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }
}

impl_common_conversions!(ParsingError);

/// Result type alias for parsing operations
pub type ParsingResult<T> = Result<T, ParsingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_load_message_names_the_model() {
        let err = ParsingError::model_load("missing.json", "no such file");
        assert_eq!(
            err.to_string(),
            "Failed to load model 'missing.json': no such file"
        );
    }

    #[test]
    fn test_io_conversion_goes_through_common_error() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        assert!(matches!(ParsingError::from(io), ParsingError::Io(_)));
    }

    #[test]
    fn test_unreadable_input_keeps_path() {
        let err = ParsingError::unreadable(Path::new("/srv/code"), "not found");
        assert!(err.to_string().contains("/srv/code"));
    }
}
