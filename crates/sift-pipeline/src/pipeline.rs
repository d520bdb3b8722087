//! End-to-end document processing.

use crate::error::PipelineResult;
use crate::store::ChunkStore;
use sift_config::Config;
use sift_core::Chunk;
use sift_convert::ConversionPipeline;
use sift_extract::{describer_from_config, Extractor};
use sift_split::SplitEngine;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Result of processing one document.
#[derive(Debug)]
pub struct ProcessOutcome {
    pub source: PathBuf,
    pub chunks: Vec<Chunk>,
    pub saved_files: Vec<PathBuf>,
}

/// Runs documents through conversion, extraction and splitting, persisting
/// the chunks through a [`ChunkStore`].
///
/// All stage configuration is validated here, at construction.
pub struct Pipeline {
    converter: ConversionPipeline,
    extractor: Extractor,
    engine: SplitEngine,
    store: ChunkStore,
}

impl Pipeline {
    pub fn from_config(config: &Config) -> PipelineResult<Self> {
        let converter = ConversionPipeline::new(config.conversion.to_map())?;
        let describer = describer_from_config(&config.describe)?;
        let extractor = Extractor::with_describer(config.extraction.to_map(), describer)?;
        let engine = SplitEngine::from_settings(&config.splitter)?;
        let store = ChunkStore::new(&config.files.output_dir);

        Ok(Self {
            converter,
            extractor,
            engine,
            store,
        })
    }

    /// Process a single document: convert into a fresh scoped working
    /// directory, extract text, split it, persist the chunks.
    ///
    /// The working directory is removed on every exit path when the
    /// [`TempDir`] guard drops.
    pub fn process_file(&self, source: &Path) -> PipelineResult<ProcessOutcome> {
        info!("Processing file: {:?}", source);
        let work_dir = TempDir::new()?;

        let canonical = self.converter.convert(source, work_dir.path())?;
        let text = self.extractor.extract(&canonical)?;
        let chunks = self.engine.split(&text)?;
        debug!("Generated {} chunk(s) from {:?}", chunks.len(), source);

        let base_name = source
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("document");
        let original_ext = source
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("");

        let saved_files =
            self.store
                .save(base_name, original_ext, self.engine.method_name(), &chunks)?;

        Ok(ProcessOutcome {
            source: source.to_path_buf(),
            chunks,
            saved_files,
        })
    }

    /// Process every regular file in a directory. Hidden files are skipped;
    /// a failing document is logged and skipped so one bad file cannot sink
    /// the batch.
    pub fn process_dir(&self, dir: &Path, recursive: bool) -> PipelineResult<Vec<ProcessOutcome>> {
        let max_depth = if recursive { usize::MAX } else { 1 };
        let mut outcomes = Vec::new();

        for entry in WalkDir::new(dir)
            .max_depth(max_depth)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if path.is_dir() {
                continue;
            }
            if path
                .file_name()
                .and_then(|n| n.to_str())
                .map(|n| n.starts_with('.'))
                .unwrap_or(false)
            {
                continue;
            }

            match self.process_file(path) {
                Ok(outcome) => outcomes.push(outcome),
                Err(e) => warn!("Failed to process {:?}: {}", path, e),
            }
        }

        Ok(outcomes)
    }
}
