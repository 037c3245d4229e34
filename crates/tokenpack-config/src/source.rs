//! Configuration layers and the loader that stacks them
//!
//! Layers are applied from the lowest priority up, each one receiving the
//! configuration built so far. The loader validates only the final result,
//! so an intermediate layer may leave a value out of range for a later one
//! to fix.

use crate::validation::Validate;
use crate::{ApplicationConfig, ConfigError, ConfigResult};
use std::path::{Path, PathBuf};

/// Priority of the TOML file layer
const FILE_PRIORITY: u8 = 50;
/// Priority of the environment layer; above files
const ENVIRONMENT_PRIORITY: u8 = 100;

/// One layer of configuration
pub trait ConfigurationSource {
    /// Produce the configuration after this layer
    ///
    /// # Errors
    /// Returns a `ConfigError` when the layer's backing data cannot be read
    fn apply(&self, config: ApplicationConfig) -> ConfigResult<ApplicationConfig>;

    /// Short label used in logs
    fn name(&self) -> &str;

    /// Layers with a higher priority are applied later and win
    fn priority(&self) -> u8;
}

/// `TOKENPACK_*` environment variables
pub struct EnvironmentSource;

impl ConfigurationSource for EnvironmentSource {
    fn apply(&self, config: ApplicationConfig) -> ConfigResult<ApplicationConfig> {
        Ok(config.with_env_overrides())
    }

    fn name(&self) -> &'static str {
        "environment"
    }

    fn priority(&self) -> u8 {
        ENVIRONMENT_PRIORITY
    }
}

/// A TOML file; sections and fields it leaves out keep their defaults
pub struct TomlFileSource {
    path: PathBuf,
}

impl TomlFileSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigurationSource for TomlFileSource {
    fn apply(&self, _config: ApplicationConfig) -> ConfigResult<ApplicationConfig> {
        let content = std::fs::read_to_string(&self.path).map_err(|source| {
            ConfigError::ReadFile {
                path: self.path.clone(),
                source,
            }
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::TomlParsing {
            path: self.path.clone(),
            source,
        })
    }

    fn name(&self) -> &'static str {
        "toml_file"
    }

    fn priority(&self) -> u8 {
        FILE_PRIORITY
    }
}

/// Stacks configuration layers over the built-in defaults
#[derive(Default)]
pub struct ConfigurationLoader {
    sources: Vec<Box<dyn ConfigurationSource>>,
}

impl ConfigurationLoader {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn add_source(mut self, source: Box<dyn ConfigurationSource>) -> Self {
        self.sources.push(source);
        self
    }

    /// Defaults, then `config_file` if given, then the environment
    pub fn standard(config_file: Option<&Path>) -> Self {
        let loader = Self::new().add_source(Box::new(EnvironmentSource));
        match config_file {
            Some(path) => loader.add_source(Box::new(TomlFileSource::new(path))),
            None => loader,
        }
    }

    /// Labels of the registered layers in the order they are applied
    pub fn source_names(&self) -> Vec<&str> {
        self.ordered().into_iter().map(|source| source.name()).collect()
    }

    fn ordered(&self) -> Vec<&dyn ConfigurationSource> {
        let mut ordered: Vec<&dyn ConfigurationSource> =
            self.sources.iter().map(|source| &**source).collect();
        ordered.sort_by_key(|source| source.priority());
        ordered
    }

    /// Apply every layer and validate the result
    ///
    /// A layer that fails to load fails the whole load.
    ///
    /// # Errors
    /// Returns the first layer error, or the first validation error
    pub fn load(&self) -> ConfigResult<ApplicationConfig> {
        let config = self
            .ordered()
            .into_iter()
            .try_fold(ApplicationConfig::default(), |config, source| {
                let config = source.apply(config)?;
                tracing::debug!(source = source.name(), "Applied configuration layer");
                Ok::<_, ConfigError>(config)
            })?;

        config.validate()?;
        Ok(config)
    }
}
