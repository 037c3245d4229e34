//! Command line arguments and how they override loaded configuration

use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tokenpack_config::ApplicationConfig;
use tokenpack_pipeline::ReportFormat;

/// Report format written to stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable listing and chunk summary
    #[value(name = "text")]
    #[default]
    Text,

    /// Full run outcome as JSON
    #[value(name = "json")]
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}

impl From<OutputFormat> for ReportFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => Self::Text,
            OutputFormat::Json => Self::Json,
        }
    }
}

/// Pack C/C++ functions into power-of-two token chunks
///
/// Every function in TARGET is measured with MODEL's tokenizer, a chunk
/// capacity is chosen to minimize padding, and functions are packed
/// first-fit without being split.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Tokenizer used for counting: a tokenizer.json path, `heuristic`, or an OpenAI model id
    pub model: String,

    /// Embedding model to load and check alongside MODEL
    pub embedding_model: String,

    /// Source file or directory to scan
    pub target: PathBuf,

    /// Use this chunk capacity instead of selecting one
    #[arg(long)]
    pub capacity: Option<usize>,

    /// Report format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Optional configuration file path (TOML format)
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Worker threads used for token counting
    #[arg(long, short = 'j')]
    pub jobs: Option<usize>,

    /// Source file extension to scan for
    #[arg(long)]
    pub extension: Option<String>,

    /// Log level when RUST_LOG is unset (trace, debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,

    /// Also write logs to a daily-rotated file in this directory
    #[arg(long)]
    pub log_dir: Option<PathBuf>,
}

impl Args {
    /// Command-line flags always win over file and environment settings
    pub fn apply_overrides(&self, config: &mut ApplicationConfig) {
        if let Some(capacity) = self.capacity {
            config.packing.capacity = Some(capacity);
        }
        if let Some(jobs) = self.jobs {
            config.counting.concurrency_limit = jobs;
        }
        if let Some(extension) = &self.extension {
            config.source.extension.clone_from(extension);
        }
        if let Some(level) = &self.log_level {
            config.telemetry.tracing_level.clone_from(level);
        }
        if self.json_logs {
            config.telemetry.json_logs = true;
        }
    }
}
