//! Sift Convert - Normalizes source files into canonical formats.
//!
//! A [`ConversionPipeline`] resolves a strategy for the source extension,
//! copies the file through untouched when the no-op sentinel applies, and
//! otherwise runs the selected [`Converter`] inside a caller-owned working
//! directory. Formats with several viable techniques run them as a
//! [`run_chain`] of fallbacks that records every failed attempt.

mod chain;
mod converters;
mod error;
mod pipeline;
mod registry;
mod tool;

pub use chain::{run_chain, Technique};
pub use converters::Converter;
pub use error::{Attempt, ConvertError, ConvertResult};
pub use pipeline::ConversionPipeline;
pub use registry::{ConverterKind, ConverterRegistry, Resolution};
