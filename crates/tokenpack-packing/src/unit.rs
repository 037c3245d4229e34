//! The packable unit: one function-like span with a fixed token cost

use crate::{PackingError, PackingResult};
use serde::Serialize;

/// One extracted function-like span and its token cost
///
/// The token count is fixed at construction and there is no way to change
/// it afterwards; packing moves units into chunks but never edits them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Unit {
    id: String,
    file: String,
    start_line: usize,
    end_line: usize,
    token_count: usize,
}

impl Unit {
    /// Create a unit with 1-based inclusive line bounds
    ///
    /// # Errors
    /// Returns `PackingError::InvalidUnit` when `start_line` is 0 or
    /// `end_line < start_line`
    pub fn new(
        id: impl Into<String>,
        file: impl Into<String>,
        start_line: usize,
        end_line: usize,
        token_count: usize,
    ) -> PackingResult<Self> {
        let id = id.into();
        if start_line == 0 || end_line < start_line {
            return Err(PackingError::InvalidUnit {
                id,
                start_line,
                end_line,
            });
        }

        Ok(Self {
            id,
            file: file.into(),
            start_line,
            end_line,
            token_count,
        })
    }

    /// Function name or signature; not guaranteed unique
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Path of the source file the unit came from
    pub fn file(&self) -> &str {
        &self.file
    }

    pub const fn start_line(&self) -> usize {
        self.start_line
    }

    pub const fn end_line(&self) -> usize {
        self.end_line
    }

    pub const fn token_count(&self) -> usize {
        self.token_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_accessors() {
        let unit = Unit::new("parse_header", "src/http.cpp", 10, 24, 311).unwrap();
        assert_eq!(unit.id(), "parse_header");
        assert_eq!(unit.file(), "src/http.cpp");
        assert_eq!(unit.start_line(), 10);
        assert_eq!(unit.end_line(), 24);
        assert_eq!(unit.token_count(), 311);
    }

    #[test]
    fn test_single_line_unit_is_valid() {
        assert!(Unit::new("f", "a.cpp", 3, 3, 0).is_ok());
    }

    #[test]
    fn test_rejects_zero_start_line() {
        let err = Unit::new("f", "a.cpp", 0, 2, 5).unwrap_err();
        assert!(matches!(err, PackingError::InvalidUnit { start_line: 0, .. }));
    }

    #[test]
    fn test_rejects_inverted_range() {
        assert!(Unit::new("f", "a.cpp", 9, 4, 5).is_err());
    }
}
