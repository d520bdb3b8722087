//! Sift Extract - Turns canonical files into ordered, normalized text.
//!
//! The [`Extractor`] picks a [`Reader`] for the file's extension through the
//! same override/default table the conversion stage uses. Page-structured
//! sources are rebuilt in reading order by collecting
//! [`PositionedObject`]s and sorting them by vertical position before
//! rendering.

mod describe;
mod error;
mod extractor;
mod layout;
mod readers;

pub use describe::{describer_from_config, Describe, NoopDescriber, OllamaDescriber};
pub use error::{ExtractError, ExtractResult};
pub use extractor::Extractor;
pub use layout::{render_page, PositionedObject};
pub use readers::{Reader, ReaderKind, ReaderRegistry};
