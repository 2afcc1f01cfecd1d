use serde::{Deserialize, Serialize};

/// Hand-maintained name lists backing the classification rules.
///
/// These cover cards whose effect the text patterns get wrong in either
/// direction. Every list can be replaced from configuration; omitted lists
/// keep their built-in contents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CuratedLists {
    /// Ramp cards no text pattern detects
    pub ramp: Vec<String>,
    /// Cards whose text looks like ramp but is not
    pub non_ramp: Vec<String>,
    /// Cards that draw information rather than cards
    pub non_card_draw: Vec<String>,
    pub removal: Vec<String>,
    pub board_wipes: Vec<String>,
    pub non_board_wipes: Vec<String>,
    /// Anthem and payoff effects
    pub enhancers: Vec<String>,
    /// Protection effects
    pub enablers: Vec<String>,
    /// Engine pieces valuable on their own
    pub standalone: Vec<String>,
}

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|name| name.to_string()).collect()
}

impl Default for CuratedLists {
    fn default() -> Self {
        Self {
            ramp: names(&["Jeweled Lotus", "Explorer's Scope", "Horizon Stone"]),
            non_ramp: names(&[
                "Path to Exile",
                "Assassin's Trophy",
                "Settle the Wreckage",
                "Dark Ritual",
                "Cabal Ritual",
            ]),
            non_card_draw: names(&[
                "Hullbreacher",
                "Veil of Summer",
                "The Locust God",
                "Chasm Skulker",
            ]),
            removal: names(&[
                "Chaos Warp",
                "Imprisoned in the Moon",
                "Darksteel Mutation",
                "Oko, Thief of Crowns",
            ]),
            board_wipes: names(&[
                "Cyclonic Rift",
                "Duneblast",
                "Toxic Deluge",
                "Time Wipe",
                "Blasphemous Act",
            ]),
            non_board_wipes: names(&["Time Stop", "Discontinuity"]),
            enhancers: names(&[
                "Ajani's Welcome",
                "Crusade",
                "Honor of the Pure",
                "Intangible Virtue",
                "Glorious Anthem",
                "Heliod, Sun-Crowned",
                "Anointed Procession",
                "Cathars' Crusade",
                "Divine Visitation",
                "Skullclamp",
                "Hall of Triumph",
                "Heraldic Banner",
                "Coat of Arms",
                "Nyx Lotus",
                "Well of Lost Dreams",
                "Gauntlet of Power",
                "Caged Sun",
            ]),
            enablers: names(&[
                "Brave the Elements",
                "Flawless Maneuver",
                "Teferi's Protection",
                "Unbreakable Formation",
                "Lightning Greaves",
                "Swiftfoot Boots",
            ]),
            standalone: names(&[
                "Authority of the Consuls",
                "Land Tax",
                "Ashes of the Abhorrent",
                "Dawn of Hope",
                "Smothering Tithe",
                "Cosmos Elixir",
                "The Immortal Sun",
            ]),
        }
    }
}
