//! Slice function text out of source lines using reported boundaries

use crate::error::{ParsingError, ParsingResult};
use crate::parsing::boundary::{BoundaryKind, BoundaryProvider, FunctionBoundary};
use crate::parsing::source::SourceFile;
use serde::Serialize;

/// One function's text with the boundary it came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractedUnit {
    pub name: String,
    pub kind: BoundaryKind,
    pub file: String,
    pub start_line: usize,
    pub end_line: usize,
    /// First line from the start column on, then whole lines, each ending in `\n`
    pub text: String,
}

/// Turns source files into extracted units through a [`BoundaryProvider`]
pub struct UnitExtractor<P: BoundaryProvider> {
    provider: P,
}

impl<P: BoundaryProvider> UnitExtractor<P> {
    pub const fn new(provider: P) -> Self {
        Self { provider }
    }

    pub const fn provider(&self) -> &P {
        &self.provider
    }

    /// Extract every unit in `file`, in boundary order
    ///
    /// # Errors
    /// - Errors from the boundary provider
    /// - `ParsingError::Parse` when a boundary points outside the file's lines
    pub fn extract(&self, file: &SourceFile) -> ParsingResult<Vec<ExtractedUnit>> {
        let boundaries = self.provider.boundaries(&file.text())?;
        let display_path = file.display_path();

        let units = boundaries
            .into_iter()
            .map(|boundary| {
                let text = slice_text(&file.lines, &boundary).ok_or_else(|| {
                    ParsingError::Parse(format!(
                        "{display_path}: boundary for '{}' ({}:{}-{}) is outside the file",
                        boundary.name, boundary.start_line, boundary.start_column, boundary.end_line
                    ))
                })?;

                Ok(ExtractedUnit {
                    name: boundary.name,
                    kind: boundary.kind,
                    file: display_path.clone(),
                    start_line: boundary.start_line,
                    end_line: boundary.end_line,
                    text,
                })
            })
            .collect::<ParsingResult<Vec<_>>>()?;

        tracing::debug!(file = %display_path, units = units.len(), "Extracted units");
        Ok(units)
    }
}

fn slice_text(lines: &[String], boundary: &FunctionBoundary) -> Option<String> {
    let first = boundary.start_line.checked_sub(1)?;
    let last = boundary.end_line.checked_sub(1)?;
    if last < first {
        return None;
    }

    let span = lines.get(first..=last)?;
    let (head, rest) = span.split_first()?;

    let mut text = String::new();
    text.push_str(head.get(boundary.start_column..)?);
    text.push('\n');
    for line in rest {
        text.push_str(line);
        text.push('\n');
    }
    Some(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedBoundaries(Vec<FunctionBoundary>);

    impl BoundaryProvider for FixedBoundaries {
        fn boundaries(&self, _source: &str) -> ParsingResult<Vec<FunctionBoundary>> {
            Ok(self.0.clone())
        }
    }

    fn boundary(start_line: usize, start_column: usize, end_line: usize) -> FunctionBoundary {
        FunctionBoundary {
            name: "f".to_string(),
            kind: BoundaryKind::Function,
            start_line,
            start_column,
            end_line,
        }
    }

    fn file() -> SourceFile {
        SourceFile::from_text(
            "lib.cpp",
            "// header\nstatic int f(int x) {\n  return x;\n}\n",
        )
    }

    #[test]
    fn test_first_line_starts_at_column() {
        let extractor = UnitExtractor::new(FixedBoundaries(vec![boundary(2, 7, 4)]));
        let units = extractor.extract(&file()).unwrap();

        assert_eq!(units.len(), 1);
        assert_eq!(units[0].text, "int f(int x) {\n  return x;\n}\n");
        assert_eq!(units[0].file, "lib.cpp");
        assert_eq!((units[0].start_line, units[0].end_line), (2, 4));
    }

    #[test]
    fn test_single_line_unit() {
        let extractor = UnitExtractor::new(FixedBoundaries(vec![boundary(1, 0, 1)]));
        let units = extractor.extract(&file()).unwrap();
        assert_eq!(units[0].text, "// header\n");
    }

    #[test]
    fn test_out_of_range_boundary_is_a_parse_error() {
        for bad in [boundary(3, 0, 9), boundary(0, 0, 1), boundary(3, 40, 3), boundary(4, 0, 2)] {
            let extractor = UnitExtractor::new(FixedBoundaries(vec![bad]));
            assert!(matches!(
                extractor.extract(&file()),
                Err(ParsingError::Parse(_))
            ));
        }
    }
}
