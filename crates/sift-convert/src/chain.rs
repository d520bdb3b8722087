//! Ordered fallback chains of conversion techniques.

use crate::error::{Attempt, ConvertError, ConvertResult};
use std::path::Path;
use tracing::{debug, warn};

/// One named technique in a fallback chain.
pub struct Technique<'a> {
    pub name: &'static str,
    pub run: Box<dyn Fn() -> ConvertResult<()> + 'a>,
}

impl<'a> Technique<'a> {
    pub fn new(name: &'static str, run: impl Fn() -> ConvertResult<()> + 'a) -> Self {
        Self {
            name,
            run: Box::new(run),
        }
    }
}

/// Run techniques in order until one produces `output`.
///
/// A failing technique's partial output is removed before the next attempt.
/// When the chain is exhausted the error carries every attempted technique
/// and its failure, in order.
pub fn run_chain(techniques: Vec<Technique>, output: &Path) -> ConvertResult<()> {
    let mut attempts = Vec::new();

    for technique in techniques {
        match (technique.run)() {
            Ok(()) if output.exists() => {
                if !attempts.is_empty() {
                    debug!(
                        "Technique '{}' succeeded after {} failed attempt(s)",
                        technique.name,
                        attempts.len()
                    );
                }
                return Ok(());
            }
            Ok(()) => {
                attempts.push(Attempt {
                    technique: technique.name.to_string(),
                    error: "produced no output file".to_string(),
                });
            }
            Err(e) => {
                if output.exists() {
                    let _ = std::fs::remove_file(output);
                }
                warn!("Technique '{}' failed: {}", technique.name, e);
                attempts.push(Attempt {
                    technique: technique.name.to_string(),
                    error: e.to_string(),
                });
            }
        }
    }

    Err(ConvertError::Failed { attempts })
}
