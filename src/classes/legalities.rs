//! Format legality lookups

use std::collections::HashMap;

/// Legality literal marking a card as playable in a format
pub const LEGAL: &str = "legal";

/// Format the pipeline targets unless configured otherwise
pub const COMMANDER_FORMAT: &str = "commander";

/// Check whether a card is legal in `format`.
///
/// Only an exact `"legal"` entry counts; `not_legal`, `banned`, `restricted`
/// and absent entries all resolve to false.
pub fn is_legal_in(legalities: &HashMap<String, String>, format: &str) -> bool {
    legalities
        .get(format)
        .map(|legal_text| legal_text == LEGAL)
        .unwrap_or(false)
}
