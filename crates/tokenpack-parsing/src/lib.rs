//! Tokenpack parsing and token counting crate
//!
//! Everything the packer needs before it can run: source files are read,
//! split into function units with tree-sitter, and measured with a
//! tokenizer.

pub mod chunking;
pub mod error;
pub mod parsing;

// Re-export main types
pub use chunking::{
    LoadOptions, ModelBackend, ModelLoader, TokenCounter, TokenCounterRef, TokenCounterRegistry,
};
pub use error::{ParsingError, ParsingResult};
pub use parsing::{
    BoundaryKind, BoundaryProvider, ExtractedUnit, FunctionBoundary, SourceFile, SourceReader,
    TreeSitterBoundaryProvider, UnitExtractor, get_language_from_extension, read_source_files,
    read_source_lines,
};
