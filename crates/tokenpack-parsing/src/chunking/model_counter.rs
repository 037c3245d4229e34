//! Token counter backed by a HuggingFace `tokenizer.json`

use super::traits::TokenCounter;
use crate::error::{ParsingError, ParsingResult};
use std::path::Path;
use std::sync::Arc;
use tokenizers::Tokenizer;

/// Counts tokens the way the model itself will see them
///
/// With `add_special_tokens` on (the default), BOS/EOS and other template
/// tokens the tokenizer adds are part of every count.
pub struct ModelTokenCounter {
    name: String,
    tokenizer: Arc<Tokenizer>,
    max_tokens: usize,
    add_special_tokens: bool,
}

impl ModelTokenCounter {
    pub fn new(name: impl Into<String>, tokenizer: Arc<Tokenizer>, max_tokens: usize) -> Self {
        Self {
            name: name.into(),
            tokenizer,
            max_tokens,
            add_special_tokens: true,
        }
    }

    /// Load a serialized tokenizer from disk
    ///
    /// # Errors
    /// Returns `ParsingError::ModelLoad` when the file is not a readable tokenizer
    pub fn from_file(path: &Path, max_tokens: usize) -> ParsingResult<Self> {
        let name = path.display().to_string();
        let tokenizer = Tokenizer::from_file(path)
            .map_err(|e| ParsingError::model_load(name.clone(), e.to_string()))?;
        Ok(Self::new(name, Arc::new(tokenizer), max_tokens))
    }

    #[must_use]
    pub const fn with_special_tokens(mut self, add_special_tokens: bool) -> Self {
        self.add_special_tokens = add_special_tokens;
        self
    }

    pub const fn adds_special_tokens(&self) -> bool {
        self.add_special_tokens
    }

    /// Size of the tokenizer's vocabulary, added tokens included
    pub fn vocab_size(&self) -> usize {
        self.tokenizer.get_vocab_size(true)
    }
}

impl TokenCounter for ModelTokenCounter {
    fn name(&self) -> &str {
        &self.name
    }

    fn max_tokens(&self) -> usize {
        self.max_tokens
    }

    fn count(&self, text: &str) -> usize {
        self.try_count(text).unwrap_or_else(|e| {
            tracing::warn!(counter = %self.name, "Counting as zero tokens: {e}");
            0
        })
    }

    fn try_count(&self, text: &str) -> ParsingResult<usize> {
        self.tokenizer
            .encode(text, self.add_special_tokens)
            .map(|encoding| encoding.len())
            .map_err(|e| ParsingError::token_counting(format!("{}: {e}", self.name)))
    }
}
