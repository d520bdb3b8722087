//! Extension-keyed strategy selection.
//!
//! Both the conversion and extraction stages pick their strategy the same
//! way: an exact match in the override table wins, otherwise the configured
//! default applies. The table is built once at startup and never mutated.

use crate::types::normalize_ext;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Sentinel strategy name meaning "pass the file through unchanged".
pub const NO_OP_STRATEGY: &str = "none";

/// Immutable mapping from normalized extension keys to strategy names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyMap {
    default: String,
    overrides: HashMap<String, String>,
}

impl StrategyMap {
    /// Build a map, normalizing every override key so lookups are case- and
    /// dot-insensitive.
    pub fn new(default: impl Into<String>, overrides: HashMap<String, String>) -> Self {
        let overrides = overrides
            .into_iter()
            .map(|(ext, name)| (normalize_ext(&ext), name))
            .collect();
        Self {
            default: default.into(),
            overrides,
        }
    }

    /// Resolve the strategy name for an extension.
    pub fn resolve(&self, ext: &str) -> &str {
        let key = normalize_ext(ext);
        self.overrides
            .get(&key)
            .map(String::as_str)
            .unwrap_or(&self.default)
    }

    pub fn default_strategy(&self) -> &str {
        &self.default
    }

    /// Every strategy name the map can produce. Registries use this to
    /// validate the whole table eagerly at startup.
    pub fn strategy_names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.default.as_str()).chain(self.overrides.values().map(String::as_str))
    }

    /// Whether resolution for this extension ends at the no-op sentinel.
    pub fn is_no_op(&self, ext: &str) -> bool {
        self.resolve(ext) == NO_OP_STRATEGY
    }
}

impl Default for StrategyMap {
    fn default() -> Self {
        Self {
            default: NO_OP_STRATEGY.to_string(),
            overrides: HashMap::new(),
        }
    }
}
