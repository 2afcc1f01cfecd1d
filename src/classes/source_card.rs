use crate::classes::base::{null_as_default, JsonObject};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Per-currency price strings as delivered by Scryfall.
///
/// Any field may be missing or `null`; amounts may carry thousands separators.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct SourcePrices {
    pub usd: Option<String>,
    pub usd_foil: Option<String>,
    pub usd_etched: Option<String>,
    pub eur: Option<String>,
    pub eur_foil: Option<String>,
    pub tix: Option<String>,
}

/// Raw card record from the upstream card database (Scryfall card object).
///
/// Faces of multi-faced cards are records of the same shape, usually with
/// most top-level fields (id, prices, legalities, set) left empty.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct SourceCardRecord {
    pub id: String,
    pub name: String,
    pub lang: String,
    pub layout: String,
    pub type_line: String,
    pub oracle_text: String,
    pub mana_cost: String,
    pub cmc: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub colors: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub color_identity: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub keywords: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub legalities: HashMap<String, String>,
    pub set_name: String,
    pub rarity: String,
    pub edhrec_rank: Option<u32>,
    #[serde(deserialize_with = "null_as_default")]
    pub prices: SourcePrices,
    #[serde(deserialize_with = "null_as_default")]
    pub card_faces: Vec<SourceCardRecord>,
    #[serde(deserialize_with = "null_as_default")]
    pub image_uris: HashMap<String, String>,
    pub rulings_uri: String,
}

impl SourceCardRecord {
    /// True when the record carries sub-faces
    pub fn is_multi_faced(&self) -> bool {
        !self.card_faces.is_empty()
    }

    /// Type line of the front face for multi-faced records (`"A // B"` → `"A"`)
    pub fn front_type_line(&self) -> &str {
        match self.type_line.split_once(" // ") {
            Some((front, _)) if self.is_multi_faced() => front,
            _ => &self.type_line,
        }
    }
}

impl JsonObject for SourceCardRecord {}
