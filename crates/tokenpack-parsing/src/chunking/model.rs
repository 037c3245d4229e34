//! Process-wide tokenizer backend and model loading
//!
//! [`ModelBackend::initialize`] must run before any model is loaded; the
//! loader takes the backend handle as proof. The backend turns off the
//! tokenizers crate's own thread pool because token counting already runs
//! on a bounded pool of its own.

use super::model_counter::ModelTokenCounter;
use super::registry::{HEURISTIC_MODEL_ID, TokenCounterRegistry};
use super::tiktoken_counter::TiktokenCounter;
use super::traits::TokenCounterRef;
use crate::error::{ParsingError, ParsingResult};
use once_cell::sync::OnceCell;
use std::path::Path;
use std::sync::Arc;

static BACKEND: OnceCell<ModelBackend> = OnceCell::new();

/// Handle proving the tokenizer backend has been set up
#[derive(Debug)]
pub struct ModelBackend {
    tokenizer_parallelism: bool,
}

impl ModelBackend {
    /// Set up the backend once per process; later calls return the same handle
    pub fn initialize() -> &'static Self {
        BACKEND.get_or_init(|| {
            tokenizers::utils::parallelism::set_parallelism(false);
            tracing::debug!("Tokenizer backend initialized with internal parallelism off");
            Self {
                tokenizer_parallelism: false,
            }
        })
    }

    pub const fn tokenizer_parallelism(&self) -> bool {
        self.tokenizer_parallelism
    }
}

/// Options applied to every counter a loader builds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    pub add_special_tokens: bool,
    pub max_tokens: usize,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            add_special_tokens: true,
            max_tokens: 8192,
        }
    }
}

/// Resolves a model argument to a token counter
///
/// Resolution order:
/// 1. an existing file is loaded as a tokenizer
/// 2. an id registered exactly as given (always includes `heuristic`)
/// 3. an OpenAI model id tiktoken has an encoding for, unless the argument
///    looks like a file path
///
/// Anything else is a load error.
pub struct ModelLoader {
    backend: &'static ModelBackend,
    options: LoadOptions,
    registry: TokenCounterRegistry,
}

impl ModelLoader {
    pub fn new(backend: &'static ModelBackend, options: LoadOptions) -> Self {
        Self {
            backend,
            options,
            registry: TokenCounterRegistry::new(options.max_tokens),
        }
    }

    /// Loader that resolves ids through a caller-supplied registry
    pub const fn with_registry(
        backend: &'static ModelBackend,
        options: LoadOptions,
        registry: TokenCounterRegistry,
    ) -> Self {
        Self {
            backend,
            options,
            registry,
        }
    }

    pub const fn backend(&self) -> &'static ModelBackend {
        self.backend
    }

    /// Load the counter named by `model`
    ///
    /// # Errors
    /// Returns `ParsingError::ModelLoad` when `model` is neither a readable
    /// tokenizer file nor a known model id
    pub fn load(&self, model: &str) -> ParsingResult<TokenCounterRef> {
        let path = Path::new(model);
        if path.is_file() {
            let counter = ModelTokenCounter::from_file(path, self.options.max_tokens)?
                .with_special_tokens(self.options.add_special_tokens);
            tracing::info!(
                model,
                vocab_size = counter.vocab_size(),
                add_special_tokens = self.options.add_special_tokens,
                "Loaded tokenizer from file"
            );
            return Ok(Arc::new(counter));
        }

        if let Some(counter) = self.registry.get(model) {
            tracing::info!(model, counter = counter.name(), "Using registered token counter");
            return Ok(counter);
        }

        if path.exists() {
            return Err(ParsingError::model_load(model, "path is not a regular file"));
        }
        if is_path_like(model) {
            return Err(ParsingError::model_load(model, "no such tokenizer file"));
        }

        match TiktokenCounter::new(model, self.options.max_tokens) {
            Ok(counter) => {
                tracing::info!(model, "Using tiktoken encoding");
                Ok(Arc::new(counter))
            }
            Err(e) => {
                tracing::debug!(model, error = %e, "No tiktoken encoding");
                Err(ParsingError::model_load(
                    model,
                    format!(
                        "no such tokenizer file, and not a known model id (try '{HEURISTIC_MODEL_ID}' or an OpenAI model name)"
                    ),
                ))
            }
        }
    }
}

/// Arguments with a directory part or a file extension name files, never model ids
///
/// Only an alphabetic suffix counts as an extension, so `gpt-3.5-turbo` stays an id.
fn is_path_like(model: &str) -> bool {
    if model.contains(['/', '\\']) {
        return true;
    }
    Path::new(model)
        .extension()
        .and_then(std::ffi::OsStr::to_str)
        .is_some_and(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphabetic()))
}
