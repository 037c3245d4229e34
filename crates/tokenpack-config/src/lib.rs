//! Centralized configuration management for tokenpack
//!
//! Configuration follows a simple hierarchy:
//! 1. Safe defaults (defined as constants)
//! 2. Optional TOML file
//! 3. `TOKENPACK_*` environment variable overrides
//! 4. Runtime validation
//!
//! Command-line flags are applied by the binary after loading.

pub mod error;
pub mod source;
pub mod validation;

pub use error::{ConfigError, ConfigResult};
pub use source::{ConfigurationLoader, ConfigurationSource, EnvironmentSource, TomlFileSource};
pub use validation::Validate;

// =============================================================================
// SAFE DEFAULTS
// =============================================================================

// Model Configuration
const DEFAULT_MODEL_ADD_SPECIAL_TOKENS: bool = true; // Count BOS/EOS like the model sees them
const DEFAULT_MODEL_MAX_TOKENS: usize = 8192;

// Source Configuration
const DEFAULT_SOURCE_EXTENSION: &str = "cpp";
const DEFAULT_SOURCE_FOLLOW_SYMLINKS: bool = false;

// Counting Configuration
const DEFAULT_COUNTING_CONCURRENCY_LIMIT: usize = 4; // Reasonable parallelism

// Telemetry Configuration
const DEFAULT_TRACING_LEVEL: &str = "info";
const DEFAULT_JSON_LOGS: bool = false;

// Validation bounds
const MAX_CONCURRENCY_LIMIT: u64 = 256;
const MAX_MODEL_TOKENS: u64 = 10_000_000;
const MAX_PACKING_CAPACITY: u64 = 1 << 32;

/// Parse an environment variable, keeping `current` when unset or malformed
fn env_or<T: std::str::FromStr>(key: &str, current: T) -> T {
    match std::env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!("Ignoring unparseable value '{raw}' for {key}");
            current
        }),
        Err(_) => current,
    }
}

/// Core configuration for the whole tokenpack run
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ApplicationConfig {
    /// Tokenizer/model behaviour
    pub model: ModelConfig,

    /// Which files the line source picks up
    pub source: SourceConfig,

    /// Token counting worker pool
    pub counting: CountingConfig,

    /// Chunk capacity selection
    pub packing: PackingConfig,

    /// Logging configuration
    pub telemetry: TelemetryConfig,
}

/// Model configuration
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Whether special tokens (BOS/EOS) count toward a unit's size
    pub add_special_tokens: bool,

    /// Context limit reported by counters that cannot read one from the model
    pub max_tokens: usize,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            add_special_tokens: DEFAULT_MODEL_ADD_SPECIAL_TOKENS,
            max_tokens: DEFAULT_MODEL_MAX_TOKENS,
        }
    }
}

impl ModelConfig {
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        Self {
            add_special_tokens: env_or(
                "TOKENPACK_MODEL_ADD_SPECIAL_TOKENS",
                self.add_special_tokens,
            ),
            max_tokens: env_or("TOKENPACK_MODEL_MAX_TOKENS", self.max_tokens),
        }
    }
}

impl Validate for ModelConfig {
    fn validate(&self) -> ConfigResult<()> {
        validation::validate_range(
            self.max_tokens as u64,
            1,
            MAX_MODEL_TOKENS,
            "model.max_tokens",
        )
    }
}

/// Source discovery configuration
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Recognized file extension, matched case-insensitively
    pub extension: String,

    /// Whether directory walks follow symbolic links
    pub follow_symlinks: bool,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            extension: DEFAULT_SOURCE_EXTENSION.to_string(),
            follow_symlinks: DEFAULT_SOURCE_FOLLOW_SYMLINKS,
        }
    }
}

impl SourceConfig {
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        Self {
            extension: env_or("TOKENPACK_SOURCE_EXTENSION", self.extension),
            follow_symlinks: env_or("TOKENPACK_SOURCE_FOLLOW_SYMLINKS", self.follow_symlinks),
        }
    }
}

impl Validate for SourceConfig {
    fn validate(&self) -> ConfigResult<()> {
        validation::validate_extension(&self.extension, "source.extension")
    }
}

/// Token counting configuration
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CountingConfig {
    /// Number of worker threads counting tokens
    pub concurrency_limit: usize,
}

impl Default for CountingConfig {
    fn default() -> Self {
        Self {
            concurrency_limit: DEFAULT_COUNTING_CONCURRENCY_LIMIT,
        }
    }
}

impl CountingConfig {
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        Self {
            concurrency_limit: env_or(
                "TOKENPACK_COUNTING_CONCURRENCY_LIMIT",
                self.concurrency_limit,
            ),
        }
    }
}

impl Validate for CountingConfig {
    fn validate(&self) -> ConfigResult<()> {
        validation::validate_range(
            self.concurrency_limit as u64,
            1,
            MAX_CONCURRENCY_LIMIT,
            "counting.concurrency_limit",
        )
    }
}

/// Packing configuration
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PackingConfig {
    /// Fixed chunk capacity; `None` lets the capacity selector choose
    pub capacity: Option<usize>,
}

impl PackingConfig {
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        let capacity = match std::env::var("TOKENPACK_PACKING_CAPACITY") {
            Ok(raw) => raw.trim().parse().map_or_else(
                |_| {
                    tracing::warn!("Ignoring unparseable value '{raw}' for TOKENPACK_PACKING_CAPACITY");
                    self.capacity
                },
                Some,
            ),
            Err(_) => self.capacity,
        };
        Self { capacity }
    }
}

impl Validate for PackingConfig {
    fn validate(&self) -> ConfigResult<()> {
        if let Some(capacity) = self.capacity {
            validation::validate_range(
                capacity as u64,
                1,
                MAX_PACKING_CAPACITY,
                "packing.capacity",
            )?;
        }
        Ok(())
    }
}

/// Telemetry and logging configuration
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    /// Default tracing level when `RUST_LOG` is unset
    pub tracing_level: String,

    /// Emit logs as JSON lines instead of human-readable text
    pub json_logs: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            tracing_level: DEFAULT_TRACING_LEVEL.to_string(),
            json_logs: DEFAULT_JSON_LOGS,
        }
    }
}

impl TelemetryConfig {
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        Self {
            tracing_level: env_or("TOKENPACK_TELEMETRY_TRACING_LEVEL", self.tracing_level),
            json_logs: env_or("TOKENPACK_TELEMETRY_JSON_LOGS", self.json_logs),
        }
    }
}

impl Validate for TelemetryConfig {
    fn validate(&self) -> ConfigResult<()> {
        validation::validate_one_of(
            &self.tracing_level,
            validation::TRACING_LEVELS,
            "telemetry.tracing_level",
        )
    }
}

impl ApplicationConfig {
    /// Defaults with environment variable overrides applied
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Apply `TOKENPACK_*` overrides to every section
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        Self {
            model: self.model.with_env_overrides(),
            source: self.source.with_env_overrides(),
            counting: self.counting.with_env_overrides(),
            packing: self.packing.with_env_overrides(),
            telemetry: self.telemetry.with_env_overrides(),
        }
    }
}

impl Validate for ApplicationConfig {
    fn validate(&self) -> ConfigResult<()> {
        self.model.validate()?;
        self.source.validate()?;
        self.counting.validate()?;
        self.packing.validate()?;
        self.telemetry.validate()?;
        Ok(())
    }
}
