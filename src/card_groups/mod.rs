//! Functional card groups ("Ramp", "Draw", ...) and the engine assigning them

pub mod curated;
pub mod engine;
pub mod rule;

pub use curated::CuratedLists;
pub use engine::ClassificationEngine;
pub use rule::{ClassificationRule, RulePredicate};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Functional tag attached to an enriched card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardGroup {
    Ramp,
    Draw,
    Removal,
    #[serde(rename = "Board Wipe")]
    BoardWipe,
    Land,
    Creature,
    Enhancer,
    Enabler,
    Standalone,
    Commander,
}

impl CardGroup {
    /// Display label, as stored in `card_groups`
    pub fn label(&self) -> &'static str {
        match self {
            CardGroup::Ramp => "Ramp",
            CardGroup::Draw => "Draw",
            CardGroup::Removal => "Removal",
            CardGroup::BoardWipe => "Board Wipe",
            CardGroup::Land => "Land",
            CardGroup::Creature => "Creature",
            CardGroup::Enhancer => "Enhancer",
            CardGroup::Enabler => "Enabler",
            CardGroup::Standalone => "Standalone",
            CardGroup::Commander => "Commander",
        }
    }

    /// Word appended to the search text when the group matches
    pub fn search_word(&self) -> &'static str {
        match self {
            CardGroup::Ramp => "ramp",
            CardGroup::Draw => "draw",
            CardGroup::Removal => "removal",
            CardGroup::BoardWipe => "board wipe",
            CardGroup::Land => "land",
            CardGroup::Creature => "creature",
            CardGroup::Enhancer => "enhancer",
            CardGroup::Enabler => "enabler",
            CardGroup::Standalone => "standalone",
            CardGroup::Commander => "commander",
        }
    }
}

impl fmt::Display for CardGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Commander eligibility of a single face or card.
///
/// Legendary (Snow) Creatures qualify, as does anything whose rules text
/// says it can be your commander.
pub fn is_commander_eligible(type_line: &str, oracle_text: &str) -> bool {
    type_line.contains("Legendary Creature")
        || type_line.contains("Legendary Snow Creature")
        || oracle_text.contains("can be your commander")
}
