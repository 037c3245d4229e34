//! The token counter seam between units and the packer

use crate::error::ParsingResult;
use std::sync::Arc;

/// Measures how many model tokens a piece of source text costs
///
/// Counting runs on worker threads, so counters are `Send + Sync` and must
/// give the same answer for the same text every time.
pub trait TokenCounter: Send + Sync {
    /// Model id or tokenizer path this counter stands for
    fn name(&self) -> &str;

    /// Context length of the model
    fn max_tokens(&self) -> usize;

    /// Tokens in `text`; counters that can fail report zero and log
    fn count(&self, text: &str) -> usize;

    /// Tokens in `text`, with tokenizer failures surfaced
    ///
    /// # Errors
    /// Returns `ParsingError::TokenCountingError` when the tokenizer rejects `text`
    fn try_count(&self, text: &str) -> ParsingResult<usize> {
        Ok(self.count(text))
    }
}

/// Shared handle to a counter
pub type TokenCounterRef = Arc<dyn TokenCounter>;
