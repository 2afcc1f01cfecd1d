use crate::card_groups::{is_commander_eligible, ClassificationEngine};
use crate::classes::card::{EnrichedCard, COLORLESS};
use crate::classes::card_types::{resolve_card_types, CardType};
use crate::classes::legalities::{is_legal_in, COMMANDER_FORMAT};
use crate::classes::prices::{resolve_price, PriceTable};
use crate::classes::source_card::SourceCardRecord;
use crate::classes::synergy::SynergyIndex;
use crate::config::TransformConfig;
use rustc_hash::FxHashSet;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

/// Image sizes carried onto enriched cards
pub const KEPT_IMAGE_SIZES: [&str; 2] = ["large", "normal"];

/// Layouts of non-playable objects, discarded before any other phase
pub const DEFAULT_EXCLUDED_LAYOUTS: [&str; 7] = [
    "art_series",
    "token",
    "double_faced_token",
    "emblem",
    "scheme",
    "planar",
    "vanguard",
];

const FACE_SEPARATOR: &str = " // ";

/// Single-card transform bound to one batch context.
///
/// Holds the batch-wide price table, synergy index and classification engine
/// behind `Arc`s, so cloning a transformer for a worker is cheap and every
/// worker sees the same read-only view.
#[derive(Debug, Clone)]
pub struct CardTransformer {
    price_table: Arc<PriceTable>,
    synergies: Arc<SynergyIndex>,
    engine: Arc<ClassificationEngine>,
    target_format: String,
    excluded_layouts: FxHashSet<String>,
}

impl CardTransformer {
    pub fn new(
        price_table: Arc<PriceTable>,
        synergies: Arc<SynergyIndex>,
        engine: Arc<ClassificationEngine>,
    ) -> Self {
        Self {
            price_table,
            synergies,
            engine,
            target_format: COMMANDER_FORMAT.to_string(),
            excluded_layouts: DEFAULT_EXCLUDED_LAYOUTS
                .iter()
                .map(|layout| layout.to_string())
                .collect(),
        }
    }

    /// Transformer using the target format and excluded layouts of `config`
    pub fn from_config(
        config: &TransformConfig,
        price_table: Arc<PriceTable>,
        synergies: Arc<SynergyIndex>,
        engine: Arc<ClassificationEngine>,
    ) -> Self {
        Self::new(price_table, synergies, engine)
            .with_target_format(&config.target_format)
            .with_excluded_layouts(config.excluded_layouts.iter().cloned())
    }

    pub fn with_target_format(mut self, target_format: &str) -> Self {
        self.target_format = target_format.to_string();
        self
    }

    pub fn with_excluded_layouts<I>(mut self, layouts: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        self.excluded_layouts = layouts.into_iter().collect();
        self
    }

    pub fn price_table(&self) -> &PriceTable {
        &self.price_table
    }

    pub fn target_format(&self) -> &str {
        &self.target_format
    }

    /// Transform one record, or a face when `parent` is given.
    ///
    /// Returns `None` when the record is discarded: excluded layout, no
    /// recognized type, or (top level only) not legal in the target format.
    /// Phases run in a fixed order: layout, types, legality, price, faces,
    /// colors, commander, search text, synergies, classification.
    pub fn transform(
        &self,
        record: &SourceCardRecord,
        parent: Option<&SourceCardRecord>,
    ) -> Option<EnrichedCard> {
        let layout = inherit(&record.layout, parent.map(|p| p.layout.as_str()));
        if self.excluded_layouts.contains(layout) {
            return None;
        }

        let type_source = match parent {
            None => record.front_type_line(),
            Some(_) => record.type_line.as_str(),
        };
        let card_types = resolve_card_types(type_source);
        if card_types.is_empty() {
            return None;
        }

        let legalities = match parent {
            Some(parent) if record.legalities.is_empty() => &parent.legalities,
            _ => &record.legalities,
        };
        let legal_in_format = is_legal_in(legalities, &self.target_format);
        if parent.is_none() && !legal_in_format {
            return None;
        }

        let price = match parent {
            None => resolve_price(&record.prices, &self.price_table),
            Some(_) => 0.0,
        };

        let card_faces: Vec<EnrichedCard> = record
            .card_faces
            .iter()
            .filter_map(|face| self.transform(face, Some(record)))
            .collect();
        let is_land = !card_types.contains(&CardType::Land)
            && card_faces.iter().any(|face| face.has_type(CardType::Land));

        let oracle_text = compose_from_faces(&record.oracle_text, &record.card_faces, |face| {
            &face.oracle_text
        });
        let mana_cost = compose_from_faces(&record.mana_cost, &record.card_faces, |face| {
            &face.mana_cost
        });

        let colors = resolve_colors(record);
        let color_identity = if record.color_identity.is_empty() {
            parent
                .map(|parent| parent.color_identity.clone())
                .unwrap_or_default()
        } else {
            record.color_identity.clone()
        };

        let is_commander = is_commander_eligible(&record.type_line, &oracle_text);

        let mut card = EnrichedCard {
            id: inherit(&record.id, parent.map(|p| p.id.as_str())).to_string(),
            name: record.name.clone(),
            lang: inherit(&record.lang, parent.map(|p| p.lang.as_str())).to_string(),
            layout: layout.to_string(),
            image_urls: kept_image_urls(&record.image_uris),
            mana_cost,
            cmc: record.cmc,
            type_line: record.type_line.clone(),
            card_types,
            oracle_text,
            colors,
            color_identity,
            keywords: record.keywords.clone(),
            legal_in_format,
            set_name: inherit(&record.set_name, parent.map(|p| p.set_name.as_str())).to_string(),
            rulings_url: inherit(&record.rulings_uri, parent.map(|p| p.rulings_uri.as_str()))
                .to_string(),
            rarity: inherit(&record.rarity, parent.map(|p| p.rarity.as_str())).to_string(),
            edhrec_rank: record.edhrec_rank,
            price,
            card_faces,
            is_commander,
            is_land,
            search_text: String::new(),
            card_groups: Vec::new(),
            synergies: self.synergies.synergies_for(&record.name),
        };
        card.search_text = build_search_text(&card);

        self.engine.classify(&mut card);

        Some(card)
    }
}

/// Lower-cased search blob of a card, before any group word is appended.
///
/// Layout: `name, mana cost, type line, oracle text, [keywords], rarity,
/// commander`, where the source rarity `mythic` reads `mythic rare` and the
/// last slot is empty for cards that are not commander eligible.
pub fn build_search_text(card: &EnrichedCard) -> String {
    let rarity = match card.rarity.as_str() {
        "mythic" => "mythic rare",
        other => other,
    };
    let commander = if card.is_commander { "commander" } else { "" };

    format!(
        "{}, {}, {}, {}, [{}], {}, {}",
        card.name,
        card.mana_cost,
        card.type_line,
        card.oracle_text,
        card.keywords.join(" "),
        rarity,
        commander
    )
    .to_lowercase()
}

fn inherit<'a>(own: &'a str, parent: Option<&'a str>) -> &'a str {
    match parent {
        Some(parent) if own.is_empty() => parent,
        _ => own,
    }
}

/// Own value, or the non-empty face values joined when the record leaves it empty
fn compose_from_faces<F>(own: &str, faces: &[SourceCardRecord], field: F) -> String
where
    F: Fn(&SourceCardRecord) -> &String,
{
    if !own.is_empty() || faces.is_empty() {
        return own.to_string();
    }
    faces
        .iter()
        .map(|face| field(face).as_str())
        .filter(|value| !value.is_empty())
        .collect::<Vec<_>>()
        .join(FACE_SEPARATOR)
}

/// Record colors, else the union of its faces' colors, else [`COLORLESS`]
fn resolve_colors(record: &SourceCardRecord) -> Vec<String> {
    let mut colors: Vec<String> = record.colors.clone();
    if colors.is_empty() {
        for color in record.card_faces.iter().flat_map(|face| face.colors.iter()) {
            if !colors.contains(color) {
                colors.push(color.clone());
            }
        }
    }
    if colors.is_empty() {
        colors.push(COLORLESS.to_string());
    }
    colors
}

fn kept_image_urls(image_uris: &HashMap<String, String>) -> BTreeMap<String, String> {
    image_uris
        .iter()
        .filter(|(size, _)| KEPT_IMAGE_SIZES.contains(&size.as_str()))
        .map(|(size, url)| (size.clone(), url.clone()))
        .collect()
}
