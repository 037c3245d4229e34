//! Token counting backends

pub mod heuristic_counter;
pub mod model;
pub mod model_counter;
pub mod registry;
pub mod tiktoken_counter;
pub mod traits;

pub use heuristic_counter::HeuristicCounter;
pub use model::{LoadOptions, ModelBackend, ModelLoader};
pub use model_counter::ModelTokenCounter;
pub use registry::{HEURISTIC_MODEL_ID, TokenCounterRegistry};
pub use tiktoken_counter::TiktokenCounter;
pub use traits::{TokenCounter, TokenCounterRef};
