//! Error types for a packing run

use thiserror::Error;
use tokenpack_common::{CommonError, impl_common_conversions};
use tokenpack_config::ConfigError;
use tokenpack_packing::PackingError;
use tokenpack_parsing::ParsingError;

/// Errors that end a run
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Parsing(#[from] ParsingError),

    #[error(transparent)]
    Packing(#[from] PackingError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The token counting pool could not be started
    #[error("Worker pool error: {0}")]
    WorkerPool(String),

    /// Report could not be rendered
    #[error("Report serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(String),

    #[error("Other error: {0}")]
    Other(String),
}

impl CommonError for PipelineError {
    fn io_error(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }

    fn parse_error(msg: impl Into<String>) -> Self {
        Self::Parsing(ParsingError::Parse(msg.into()))
    }

    fn other_error(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }
}

impl_common_conversions!(PipelineError);

/// Result type alias for pipeline operations
pub type PipelineResult<T> = Result<T, PipelineError>;
