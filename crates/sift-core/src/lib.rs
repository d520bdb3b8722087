//! Sift Core - Shared domain types for the sift document pipeline.

mod strategy;
mod types;

pub use strategy::{StrategyMap, NO_OP_STRATEGY};
pub use types::*;
