//! Error types for capacity selection and packing

use thiserror::Error;

/// Errors raised by the packing core
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PackingError {
    /// No token counts to size a chunk from
    #[error("Cannot select a chunk capacity for an empty set of units")]
    EmptyInput,

    /// A unit that can never be placed in any chunk
    #[error(
        "Unit '{id}' (#{index}) needs {token_count} tokens but chunk capacity is {capacity}"
    )]
    OversizedUnit {
        id: String,
        index: usize,
        token_count: usize,
        capacity: usize,
    },

    /// Capacity must be a positive number of tokens
    #[error("Chunk capacity must be positive, got {0}")]
    InvalidCapacity(usize),

    /// Malformed line bounds on a unit
    #[error("Unit '{id}' has invalid line range {start_line}-{end_line}")]
    InvalidUnit {
        id: String,
        start_line: usize,
        end_line: usize,
    },

    /// Token totals too large to represent a capacity
    #[error("Token counts are too large to size a power-of-two chunk capacity")]
    CapacityOverflow,
}

/// Result type alias for packing operations
pub type PackingResult<T> = Result<T, PackingError>;
