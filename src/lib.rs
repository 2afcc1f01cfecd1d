//! Card transformation and classification pipeline.
//!
//! Raw Scryfall card records go in; enriched cards come out with resolved
//! types, commander legality, a normalized price, composed faces, a search
//! blob, functional groups ("Ramp", "Draw", ...) and EDHREC synergy scores.

pub mod builders;
pub mod card_groups;
pub mod classes;
pub mod config;
pub mod providers;
pub mod utils;

#[cfg(feature = "python")]
pub mod python;

pub use builders::{build_search_text, CardPipeline, CardTransformer, RunSummary, TransformError};
pub use card_groups::{CardGroup, ClassificationEngine, ClassificationRule, CuratedLists};
pub use classes::{
    CardType, EnrichedCard, PriceTable, PriceTableSource, SourceCardRecord, SynergyIndex,
    SynergyRecord,
};
pub use config::TransformConfig;
pub use providers::{
    CardPage, CardSink, ProviderError, ProviderResult, SourceCardProvider, SynergyProvider,
};
