//! Chunk persistence.

use crate::error::PipelineResult;
use chrono::Local;
use sift_core::Chunk;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Names and stores chunk files on disk.
///
/// Each document's chunks land in their own folder named
/// `{base}_{ext}_{date}_{time}_{method}`; files inside follow
/// `{base}_chunk_{i}.md` with `i` running 1..N without gaps.
pub struct ChunkStore {
    output_dir: PathBuf,
}

impl ChunkStore {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Persist `chunks`, returning the written paths in chunk order.
    pub fn save(
        &self,
        base_name: &str,
        original_ext: &str,
        method: &str,
        chunks: &[Chunk],
    ) -> PipelineResult<Vec<PathBuf>> {
        let now = Local::now();
        let folder_name = format!(
            "{base_name}_{}_{}_{}_{method}",
            original_ext.trim_start_matches('.'),
            now.format("%Y%m%d"),
            now.format("%H%M%S"),
        );
        let folder = self.output_dir.join(folder_name);
        std::fs::create_dir_all(&folder)?;

        let mut saved = Vec::with_capacity(chunks.len());
        for chunk in chunks {
            let file_name = format!("{base_name}_chunk_{}.md", chunk.index);
            let path = folder.join(file_name);
            std::fs::write(&path, &chunk.content)?;
            debug!("Chunk {} saved to {:?}", chunk.index, path);
            saved.push(path);
        }

        info!("Saved {} chunk(s) under {:?}", saved.len(), folder);
        Ok(saved)
    }
}
