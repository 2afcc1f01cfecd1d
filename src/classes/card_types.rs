use serde::{Deserialize, Serialize};
use std::fmt;

/// Structural card types recognized on a type line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardType {
    Creature,
    Artifact,
    Enchantment,
    Instant,
    Land,
    Planeswalker,
    Sorcery,
    Battle,
}

impl CardType {
    /// Recognized keywords, in resolution order.
    ///
    /// Resolved type sets always follow this order, never the order of the
    /// words on the type line.
    pub const ALL: [CardType; 8] = [
        CardType::Creature,
        CardType::Artifact,
        CardType::Enchantment,
        CardType::Instant,
        CardType::Land,
        CardType::Planeswalker,
        CardType::Sorcery,
        CardType::Battle,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CardType::Creature => "Creature",
            CardType::Artifact => "Artifact",
            CardType::Enchantment => "Enchantment",
            CardType::Instant => "Instant",
            CardType::Land => "Land",
            CardType::Planeswalker => "Planeswalker",
            CardType::Sorcery => "Sorcery",
            CardType::Battle => "Battle",
        }
    }
}

impl fmt::Display for CardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolve the structural types of a type line.
///
/// Returns every keyword of [`CardType::ALL`] that occurs as a substring of
/// `type_line`. An empty result marks a non-game object (token, scheme,
/// plane...) that the transform discards.
pub fn resolve_card_types(type_line: &str) -> Vec<CardType> {
    CardType::ALL
        .iter()
        .copied()
        .filter(|card_type| type_line.contains(card_type.as_str()))
        .collect()
}
