//! Tracing subscriber setup
//!
//! Logs always go to stderr so stdout carries nothing but the report. An
//! optional log directory adds a daily-rotated file next to stderr.

use std::path::Path;
use tokenpack_config::TelemetryConfig;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::fmt::writer::MakeWriterExt;

const LOG_FILE_PREFIX: &str = "tokenpack.log";
const STARTUP_LEVEL: &str = "warn";

/// Guards that flush buffered log lines when dropped; hold until exit
pub struct LogGuards {
    _guards: Vec<WorkerGuard>,
}

/// `RUST_LOG` when set, otherwise the configured level
fn env_filter(telemetry: &TelemetryConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&telemetry.tracing_level))
}

fn install<W>(writer: W, filter: EnvFilter, json: bool, ansi: bool) -> anyhow::Result<()>
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let builder = tracing_subscriber::fmt()
        .with_writer(writer)
        .with_env_filter(filter)
        .with_ansi(ansi);

    let result = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    result.map_err(|e| anyhow::anyhow!("Failed to install tracing subscriber: {e}"))
}

/// Plain stderr subscriber for the work done before [`init`] can run
///
/// Honours `RUST_LOG`, otherwise shows warnings and errors.
pub fn startup_subscriber() -> impl tracing::Subscriber + Send + Sync {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(STARTUP_LEVEL));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .finish()
}

/// Install the global subscriber
///
/// # Errors
/// Fails when the log directory cannot be created or a subscriber is
/// already installed
pub fn init(telemetry: &TelemetryConfig, log_dir: Option<&Path>) -> anyhow::Result<LogGuards> {
    let filter = env_filter(telemetry);
    let (stderr_writer, stderr_guard): (NonBlocking, WorkerGuard) =
        tracing_appender::non_blocking(std::io::stderr());

    let Some(log_dir) = log_dir else {
        install(stderr_writer, filter, telemetry.json_logs, true)?;
        return Ok(LogGuards {
            _guards: vec![stderr_guard],
        });
    };

    std::fs::create_dir_all(log_dir)?;
    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, LOG_FILE_PREFIX);
    let (file_writer, file_guard): (NonBlocking, WorkerGuard) =
        tracing_appender::non_blocking(file_appender);

    // No colour codes in the file
    install(
        file_writer.and(stderr_writer),
        filter,
        telemetry.json_logs,
        false,
    )?;
    Ok(LogGuards {
        _guards: vec![file_guard, stderr_guard],
    })
}
