//! Sift Pipeline - Runs documents through convert, extract and split, then
//! persists the resulting chunks.

mod error;
mod pipeline;
mod store;

pub use error::{PipelineError, PipelineResult};
pub use pipeline::{Pipeline, ProcessOutcome};
pub use store::ChunkStore;
