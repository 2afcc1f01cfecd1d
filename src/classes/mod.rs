//! Card data model: source records, enriched cards and the per-batch lookup tables

pub mod base;
pub mod card;
pub mod card_types;
pub mod legalities;
pub mod prices;
pub mod source_card;
pub mod synergy;

pub use base::JsonObject;
pub use card::{EnrichedCard, COLORLESS};
pub use card_types::{resolve_card_types, CardType};
pub use legalities::{is_legal_in, COMMANDER_FORMAT};
pub use prices::{resolve_price, Currency, PriceField, PriceTable, PriceTableSource};
pub use source_card::{SourceCardRecord, SourcePrices};
pub use synergy::{CardSynergies, SynergyIndex, SynergyRecord};
