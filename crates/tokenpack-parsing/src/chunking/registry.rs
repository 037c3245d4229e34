//! Token counter registry for model selection

use super::heuristic_counter::HeuristicCounter;
use super::traits::TokenCounterRef;
use std::collections::HashMap;
use std::sync::Arc;

/// Model id that always resolves to the character-class estimate
pub const HEURISTIC_MODEL_ID: &str = "heuristic";

/// Registry for token counters by model ID
///
/// Starts with the heuristic counter registered under [`HEURISTIC_MODEL_ID`];
/// callers add their own counters with [`TokenCounterRegistry::register`].
pub struct TokenCounterRegistry {
    counters: HashMap<String, TokenCounterRef>,
}

impl TokenCounterRegistry {
    pub fn new(max_tokens: usize) -> Self {
        let heuristic: TokenCounterRef =
            Arc::new(HeuristicCounter::new(HEURISTIC_MODEL_ID, max_tokens));

        let mut counters = HashMap::new();
        counters.insert(HEURISTIC_MODEL_ID.to_string(), heuristic);

        Self { counters }
    }

    /// Counter registered under exactly `model_id`
    pub fn get(&self, model_id: &str) -> Option<TokenCounterRef> {
        self.counters.get(model_id).map(Arc::clone)
    }

    /// Register a new counter
    pub fn register(&mut self, model_id: impl Into<String>, counter: TokenCounterRef) {
        self.counters.insert(model_id.into(), counter);
    }
}
