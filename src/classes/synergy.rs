use crate::classes::base::JsonObject;
use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Synergy scores of one card, keyed by main card (commander) name
pub type CardSynergies = IndexMap<String, f64>;

/// One row of the EDHREC synergy dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SynergyRecord {
    /// Card the score is attached to
    pub card_with_synergy: String,
    /// Main card (commander) the score is measured against
    pub main_card: String,
    pub synergy: f64,
}

/// Name-keyed synergy lookup, built once per batch and read-only afterwards
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SynergyIndex {
    by_card: FxHashMap<String, CardSynergies>,
}

impl SynergyIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the index from dataset rows.
    ///
    /// Scores are clamped to [0, 1] and NaN rows are skipped. A later row for
    /// the same (card, main card) pair replaces the earlier one. Every inner
    /// map is ordered by descending score, then by main card name.
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = SynergyRecord>,
    {
        let mut index = Self::new();
        for record in records {
            index.insert(&record.card_with_synergy, &record.main_card, record.synergy);
        }
        index.finalize();
        index
    }

    /// Build the index from a nested `card → main card → score` map
    pub fn from_nested<I, J>(nested: I) -> Self
    where
        I: IntoIterator<Item = (String, J)>,
        J: IntoIterator<Item = (String, f64)>,
    {
        let mut index = Self::new();
        for (card_with_synergy, scores) in nested {
            for (main_card, score) in scores {
                index.insert(&card_with_synergy, &main_card, score);
            }
        }
        index.finalize();
        index
    }

    fn insert(&mut self, card_with_synergy: &str, main_card: &str, score: f64) {
        if score.is_nan() {
            return;
        }
        self.by_card
            .entry(card_with_synergy.to_string())
            .or_default()
            .insert(main_card.to_string(), score.clamp(0.0, 1.0));
    }

    fn finalize(&mut self) {
        for synergies in self.by_card.values_mut() {
            synergies.sort_by(|name_a, score_a, name_b, score_b| {
                score_b
                    .partial_cmp(score_a)
                    .unwrap_or(Ordering::Equal)
                    .then_with(|| name_a.cmp(name_b))
            });
        }
    }

    /// Synergies attached to `card_name`; unknown cards get an empty map
    pub fn synergies_for(&self, card_name: &str) -> CardSynergies {
        self.by_card.get(card_name).cloned().unwrap_or_default()
    }

    /// Number of cards with at least one synergy entry
    pub fn len(&self) -> usize {
        self.by_card.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_card.is_empty()
    }
}

impl JsonObject for SynergyRecord {}
