//! End-to-end run: read, extract, count, pack
//!
//! Counting is the only parallel stage. It runs on a dedicated rayon pool
//! sized by `counting.concurrency_limit`, and its ordered `collect` is the
//! join point: the packer only ever sees the complete set of counts.

use crate::error::{PipelineError, PipelineResult};
use rayon::ThreadPool;
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use serde::Serialize;
use std::path::Path;
use tokenpack_config::ApplicationConfig;
use tokenpack_packing::{PackingPlan, Unit};
use tokenpack_parsing::{
    BoundaryProvider, ExtractedUnit, SourceReader, TokenCounterRef, TreeSitterBoundaryProvider,
    UnitExtractor,
};

/// Knobs for one run, usually taken from [`ApplicationConfig`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineSettings {
    pub extension: String,
    pub follow_symlinks: bool,
    pub concurrency_limit: usize,
    pub capacity: Option<usize>,
}

impl PipelineSettings {
    pub fn from_config(config: &ApplicationConfig) -> Self {
        Self {
            extension: config.source.extension.clone(),
            follow_symlinks: config.source.follow_symlinks,
            concurrency_limit: config.counting.concurrency_limit,
            capacity: config.packing.capacity,
        }
    }
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self::from_config(&ApplicationConfig::default())
    }
}

/// Everything a report needs about a finished run
#[derive(Debug, Clone, Serialize)]
pub struct PipelineOutcome {
    /// Counter that produced the token counts
    pub model: String,
    /// Embedding model checked at startup, if any
    pub embedding_model: Option<String>,
    pub files_read: usize,
    /// Every counted unit in extraction order
    pub units: Vec<Unit>,
    pub plan: PackingPlan,
}

/// One configured run over a source tree
pub struct Pipeline<P: BoundaryProvider> {
    reader: SourceReader,
    extractor: UnitExtractor<P>,
    counter: TokenCounterRef,
    settings: PipelineSettings,
    embedding_model: Option<String>,
}

impl Pipeline<TreeSitterBoundaryProvider> {
    /// Pipeline whose grammar is picked from the configured source extension
    ///
    /// # Errors
    /// Returns a parsing error when no grammar handles the extension
    pub fn from_config(
        config: &ApplicationConfig,
        counter: TokenCounterRef,
    ) -> PipelineResult<Self> {
        let provider = TreeSitterBoundaryProvider::for_extension(&config.source.extension)?;
        Ok(Self::new(provider, counter, PipelineSettings::from_config(config)))
    }
}

impl<P: BoundaryProvider> Pipeline<P> {
    pub fn new(provider: P, counter: TokenCounterRef, settings: PipelineSettings) -> Self {
        let reader =
            SourceReader::new(&settings.extension).follow_symlinks(settings.follow_symlinks);
        Self {
            reader,
            extractor: UnitExtractor::new(provider),
            counter,
            settings,
            embedding_model: None,
        }
    }

    /// Record the embedding model name for the report
    #[must_use]
    pub fn with_embedding_model(mut self, name: impl Into<String>) -> Self {
        self.embedding_model = Some(name.into());
        self
    }

    pub const fn settings(&self) -> &PipelineSettings {
        &self.settings
    }

    /// Run every stage over `target`, a file or a directory
    ///
    /// # Errors
    /// - Parsing errors from reading, boundary discovery, or token counting
    /// - `PipelineError::WorkerPool` when the counting pool cannot start
    /// - Packing errors such as an oversized unit under a fixed capacity
    pub fn run(&self, target: &Path) -> PipelineResult<PipelineOutcome> {
        let files = self.reader.read_files(target)?;
        tracing::debug!(files = files.len(), "Stage: read sources");

        let mut extracted = Vec::new();
        for file in &files {
            extracted.extend(self.extractor.extract(file)?);
        }
        tracing::debug!(units = extracted.len(), "Stage: extracted units");

        let counts = self.count_tokens(&extracted)?;
        let units = extracted
            .into_iter()
            .zip(counts)
            .map(|(unit, count)| {
                Unit::new(unit.name, unit.file, unit.start_line, unit.end_line, count)
            })
            .collect::<Result<Vec<_>, _>>()?;
        tracing::debug!(units = units.len(), "Stage: counted tokens");

        let plan = if units.is_empty() {
            tracing::info!(target = %target.display(), "No functions found, nothing to pack");
            PackingPlan::empty()
        } else {
            PackingPlan::build(units.clone(), self.settings.capacity)?
        };

        tracing::info!(
            files = files.len(),
            units = units.len(),
            total_tokens = plan.total_tokens,
            capacity = plan.capacity,
            chunks = plan.chunk_count(),
            padding = plan.padding,
            "Packing complete"
        );

        Ok(PipelineOutcome {
            model: self.counter.name().to_string(),
            embedding_model: self.embedding_model.clone(),
            files_read: files.len(),
            units,
            plan,
        })
    }

    fn worker_pool(&self) -> PipelineResult<ThreadPool> {
        rayon::ThreadPoolBuilder::new()
            .num_threads(self.settings.concurrency_limit)
            .thread_name(|i| format!("tokenpack-count-{i}"))
            .build()
            .map_err(|e| PipelineError::WorkerPool(e.to_string()))
    }

    /// Count every unit; results line up with `units` and any failure aborts
    fn count_tokens(&self, units: &[ExtractedUnit]) -> PipelineResult<Vec<usize>> {
        if units.is_empty() {
            return Ok(Vec::new());
        }

        let pool = self.worker_pool()?;
        let counter = &self.counter;
        let counts = pool.install(|| {
            units
                .par_iter()
                .map(|unit| counter.try_count(&unit.text))
                .collect::<Result<Vec<usize>, _>>()
        })?;
        Ok(counts)
    }
}
