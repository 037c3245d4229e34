//! Orchestration for tokenpack runs
//!
//! Wires the line source, unit extractor and token counter from
//! `tokenpack-parsing` to the packing engine in `tokenpack-packing`, and
//! renders the result.

pub mod error;
pub mod pipeline;
pub mod report;

pub use error::{PipelineError, PipelineResult};
pub use pipeline::{Pipeline, PipelineOutcome, PipelineSettings};
pub use report::{ReportFormat, render_json, render_text};
