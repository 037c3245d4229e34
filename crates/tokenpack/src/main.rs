//! Main entry point for the tokenpack command line tool

// Internal modules
mod cli;
mod logging;

// Internal imports (std, crate)
use crate::cli::Args;
use std::process::ExitCode;

// External imports (alphabetized)
use clap::Parser;
use tokenpack_common::initialize_environment;
use tokenpack_config::{ApplicationConfig, ConfigurationLoader, Validate};
use tokenpack_parsing::{LoadOptions, ModelBackend, ModelLoader, TokenCounterRef};
use tokenpack_pipeline::{Pipeline, ReportFormat};

fn main() -> ExitCode {
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Defaults, config file and environment, then command-line flags
fn load_config(args: &Args) -> anyhow::Result<ApplicationConfig> {
    let mut config = ConfigurationLoader::standard(args.config.as_deref()).load()?;
    args.apply_overrides(&mut config);
    config.validate()?;
    Ok(config)
}

fn load_model(loader: &ModelLoader, model: &str, role: &str) -> anyhow::Result<TokenCounterRef> {
    let counter = loader.load(model)?;
    tracing::info!(
        role,
        model,
        counter = counter.name(),
        max_tokens = counter.max_tokens(),
        "Model ready"
    );
    Ok(counter)
}

fn run(args: &Args) -> anyhow::Result<()> {
    initialize_environment();

    // Config layers log while the configured subscriber does not exist yet
    let config = tracing::subscriber::with_default(logging::startup_subscriber(), || {
        load_config(args)
    })?;
    let _log_guards = logging::init(&config.telemetry, args.log_dir.as_deref())?;
    tracing::debug!(?config, "Configuration loaded");

    let backend = ModelBackend::initialize();
    let loader = ModelLoader::new(
        backend,
        LoadOptions {
            add_special_tokens: config.model.add_special_tokens,
            max_tokens: config.model.max_tokens,
        },
    );

    // Both models must load before any source is read
    let counter = load_model(&loader, &args.model, "counting")?;
    load_model(&loader, &args.embedding_model, "embedding")?;

    let pipeline = Pipeline::from_config(&config, counter)?
        .with_embedding_model(args.embedding_model.as_str());
    let outcome = pipeline.run(&args.target)?;

    let report = ReportFormat::from(args.format).render(&outcome)?;
    print!("{report}");
    Ok(())
}
