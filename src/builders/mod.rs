//! Builders module - single-card transform and the batch pipeline driving it

pub mod card_builder;
pub mod pipeline;

// Re-export main types and functions for easier access
pub use card_builder::{build_search_text, CardTransformer};
pub use pipeline::{CardPipeline, RunSummary, TransformError};
