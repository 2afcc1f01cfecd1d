use crate::card_groups::CardGroup;
use crate::classes::base::{skip_if_empty_string, skip_if_empty_vec, JsonObject};
use crate::classes::card_types::CardType;
use crate::classes::synergy::CardSynergies;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Sentinel written to `colors` when the source lists no color
pub const COLORLESS: &str = "Colorless";

/// Enriched, classified card as handed to the sink.
///
/// Built fresh on every run. Faces are owned by their parent and never
/// stored on their own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct EnrichedCard {
    pub id: String,
    pub name: String,
    pub lang: String,

    #[serde(skip_serializing_if = "skip_if_empty_string")]
    pub layout: String,

    /// Only the `large` and `normal` sizes are kept
    pub image_urls: BTreeMap<String, String>,

    pub mana_cost: String,
    pub cmc: f64,
    pub type_line: String,
    pub card_types: Vec<CardType>,
    pub oracle_text: String,

    /// Never empty, see [`COLORLESS`]
    pub colors: Vec<String>,
    pub color_identity: Vec<String>,
    pub keywords: Vec<String>,

    /// Legality in the pipeline's target format
    #[serde(rename = "legalInCommander")]
    pub legal_in_format: bool,
    pub set_name: String,

    #[serde(skip_serializing_if = "skip_if_empty_string")]
    pub rulings_url: String,

    pub rarity: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub edhrec_rank: Option<u32>,

    /// Display price in the reference currency, 0 when unknown
    pub price: f64,

    #[serde(skip_serializing_if = "skip_if_empty_vec")]
    pub card_faces: Vec<EnrichedCard>,

    pub is_commander: bool,

    /// Land-ness coming from a face while the card itself is not a Land
    pub is_land: bool,

    pub search_text: String,
    pub card_groups: Vec<CardGroup>,
    pub synergies: CardSynergies,
}

impl EnrichedCard {
    pub fn has_type(&self, card_type: CardType) -> bool {
        self.card_types.contains(&card_type)
    }

    pub fn has_any_type(&self, card_types: &[CardType]) -> bool {
        card_types.iter().any(|card_type| self.has_type(*card_type))
    }

    pub fn has_group(&self, group: CardGroup) -> bool {
        self.card_groups.contains(&group)
    }

    /// Append a tag and its search word
    pub fn add_group(&mut self, group: CardGroup) {
        self.card_groups.push(group);
        self.search_text.push_str(", ");
        self.search_text.push_str(group.search_word());
    }
}

impl JsonObject for EnrichedCard {}
