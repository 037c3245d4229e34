//! Source reading and function boundary extraction

pub mod boundary;
pub mod extractor;
pub mod languages;
pub mod source;

pub use boundary::{BoundaryKind, BoundaryProvider, FunctionBoundary, TreeSitterBoundaryProvider};
pub use extractor::{ExtractedUnit, UnitExtractor};
pub use languages::{LanguageConfig, get_language_config, get_language_from_extension};
pub use source::{SourceFile, SourceReader, read_source_files, read_source_lines};
