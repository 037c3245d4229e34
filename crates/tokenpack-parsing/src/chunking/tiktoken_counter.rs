//! Tiktoken-based token counter for OpenAI models

use super::traits::TokenCounter;
use anyhow::Result;
use tiktoken_rs::{CoreBPE, get_bpe_from_model};

/// Token counter using tiktoken for OpenAI models
pub struct TiktokenCounter {
    /// Model name for identification
    model_name: String,
    /// The tiktoken encoder
    encoder: CoreBPE,
    /// Maximum tokens this model supports
    max_tokens: usize,
}

impl TiktokenCounter {
    /// Create a new tiktoken counter for the specified model
    ///
    /// # Errors
    /// Returns an error when tiktoken has no encoding for `model_name` or the
    /// BPE tables cannot be built
    pub fn new(model_name: &str, max_tokens: usize) -> Result<Self> {
        let encoder = get_bpe_from_model(model_name)?;

        Ok(Self {
            model_name: model_name.to_string(),
            encoder,
            max_tokens,
        })
    }
}

impl TokenCounter for TiktokenCounter {
    fn name(&self) -> &str {
        &self.model_name
    }

    fn max_tokens(&self) -> usize {
        self.max_tokens
    }

    fn count(&self, text: &str) -> usize {
        self.encoder.encode_ordinary(text).len()
    }
}
