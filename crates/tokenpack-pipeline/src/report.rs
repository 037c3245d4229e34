//! Rendering a finished run for stdout

use crate::error::PipelineResult;
use crate::pipeline::PipelineOutcome;
use std::fmt;

/// How a report is written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    /// Line-oriented summary for people
    #[default]
    Text,
    /// The whole outcome as pretty-printed JSON
    Json,
}

impl ReportFormat {
    /// Render `outcome` in this format
    ///
    /// # Errors
    /// Returns `PipelineError::Serialization` when JSON encoding fails
    pub fn render(self, outcome: &PipelineOutcome) -> PipelineResult<String> {
        match self {
            Self::Text => Ok(render_text(outcome)),
            Self::Json => render_json(outcome),
        }
    }
}

/// Per-function listing, sizing statistics, then chunk contents
pub fn render_text(outcome: &PipelineOutcome) -> String {
    TextReport(outcome).to_string()
}

/// # Errors
/// Returns `PipelineError::Serialization` when JSON encoding fails
pub fn render_json(outcome: &PipelineOutcome) -> PipelineResult<String> {
    Ok(serde_json::to_string_pretty(outcome)?)
}

struct TextReport<'a>(&'a PipelineOutcome);

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let outcome = self.0;
        let plan = &outcome.plan;

        for unit in &outcome.units {
            writeln!(f, "Function: {}", unit.id())?;
            writeln!(f, "Start Line: {}", unit.start_line())?;
            writeln!(f, "End Line: {}", unit.end_line())?;
            writeln!(f, "Token Count: {}", unit.token_count())?;
        }

        writeln!(f, "Total Tokens: {}", plan.total_tokens)?;
        match plan.selection {
            Some(choice) => {
                writeln!(f, "Minimum Chunk Size (Power of 2): {}", choice.base_capacity)?;
                writeln!(f, "Optimal Chunk Size (Power of 2): {}", choice.capacity)?;
            }
            None if plan.is_empty() => {}
            None => writeln!(f, "Configured Chunk Size: {}", plan.capacity)?,
        }
        writeln!(f, "Number of Chunks: {}", plan.chunk_count())?;
        writeln!(f, "Min padding: {}", plan.padding)?;

        for (number, chunk) in (1..).zip(&plan.chunks) {
            writeln!(f, "Chunk {number} (Total Tokens: {}):", chunk.total_tokens())?;
            for unit in chunk.units() {
                writeln!(f, "  - {} ({} tokens)", unit.id(), unit.token_count())?;
            }
        }

        Ok(())
    }
}
