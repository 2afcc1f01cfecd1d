use crate::card_groups::{CardGroup, ClassificationRule, CuratedLists};
use crate::classes::card::EnrichedCard;
use crate::classes::card_types::CardType;
use regex::Regex;

/// Ordered classification table.
///
/// Built once before a run and shared read-only between workers. Every rule
/// is evaluated for every card; matches are not mutually exclusive.
#[derive(Debug, Clone)]
pub struct ClassificationEngine {
    rules: Vec<ClassificationRule>,
}

impl ClassificationEngine {
    /// Build the standard rule table from curated lists.
    ///
    /// Fails only when a hand-written pattern does not compile.
    pub fn new(curated: &CuratedLists) -> Result<Self, regex::Error> {
        Ok(Self {
            rules: vec![
                ramp_rule(curated)?,
                draw_rule(curated)?,
                removal_rule(curated)?,
                board_wipe_rule(curated)?,
                land_rule(),
                creature_rule(),
                ClassificationRule::names_only(CardGroup::Enhancer, curated.enhancers.clone()),
                ClassificationRule::names_only(CardGroup::Enabler, curated.enablers.clone()),
                ClassificationRule::names_only(CardGroup::Standalone, curated.standalone.clone()),
                commander_rule(),
            ],
        })
    }

    /// Standard rule table with the built-in curated lists
    pub fn with_default_lists() -> Result<Self, regex::Error> {
        Self::new(&CuratedLists::default())
    }

    /// Engine over a custom rule table, evaluated in the given order
    pub fn with_rules(rules: Vec<ClassificationRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[ClassificationRule] {
        &self.rules
    }

    /// Tag a freshly built card.
    ///
    /// Appends every matching group to `card_groups` and its search word to
    /// `search_text`. Running it twice on the same card duplicates tags.
    pub fn classify(&self, card: &mut EnrichedCard) {
        for rule in &self.rules {
            if rule.matches(card) {
                card.add_group(rule.group());
            }
        }
    }
}

fn ramp_rule(curated: &CuratedLists) -> Result<ClassificationRule, regex::Error> {
    let patterns = vec![
        Regex::new(r"(?i)adds? (\{[CBUGRW]\}|[a-zA-Z ]+mana)")?,
        Regex::new(
            r"(?i)(search(es)? (your|their) library for [^.]*(land|plains|island|swamp|mountain|forest|wastes) cards?|land card)[^.]*put[^.]* onto the battlefield",
        )?,
        Regex::new(r"(?i)you may play [a-z]+ additional lands?")?,
        Regex::new(r"(?i)you may put a land card from your hand onto the battlefield")?,
    ];

    Ok(ClassificationRule::new(CardGroup::Ramp, move |card| {
        card.has_type(CardType::Land)
            || patterns.iter().any(|pattern| pattern.is_match(&card.oracle_text))
    })
    .including(curated.ramp.clone())
    .excluding(curated.non_ramp.clone()))
}

/// Oracle text with the clauses that look like card draw but are not
fn strip_non_draw_text(card: &EnrichedCard) -> String {
    card.oracle_text
        .replace("Discard this card: Draw a card.", "")
        .replace("Discard a card, then draw a card.", "")
        .replace(&format!("Sacrifice {}: Draw a card.", card.name), "")
}

fn draw_rule(curated: &CuratedLists) -> Result<ClassificationRule, regex::Error> {
    let draw = Regex::new(r"(?i)draw( [a-zA-Z]+| that many)? cards?")?;

    Ok(ClassificationRule::new(CardGroup::Draw, move |card| {
        draw.is_match(&strip_non_draw_text(card))
    })
    .excluding(curated.non_card_draw.clone()))
}

fn removal_rule(curated: &CuratedLists) -> Result<ClassificationRule, regex::Error> {
    let destroy_target = Regex::new(r"(?i)destroy target")?;
    let exile_clause = Regex::new(r"(?i)exile(?: another)? target[^.]*")?;
    let loses_abilities = Regex::new(r"(?i)loses all abilities")?;

    Ok(ClassificationRule::new(CardGroup::Removal, move |card| {
        let text = &card.oracle_text;
        destroy_target.is_match(text)
            || exile_clause
                .find_iter(text)
                .any(|clause| !clause.as_str().to_lowercase().contains("graveyard"))
            || loses_abilities.is_match(text)
    })
    .including(curated.removal.clone()))
}

fn board_wipe_rule(curated: &CuratedLists) -> Result<ClassificationRule, regex::Error> {
    let mass_removal = Regex::new(r"(?i)(destroy|exile) all")?;

    Ok(ClassificationRule::new(CardGroup::BoardWipe, move |card| {
        mass_removal.is_match(&card.oracle_text)
    })
    .gated_by(&[CardType::Instant, CardType::Sorcery])
    .including(curated.board_wipes.clone())
    .excluding(curated.non_board_wipes.clone()))
}

fn land_rule() -> ClassificationRule {
    ClassificationRule::new(CardGroup::Land, |card| card.is_land)
}

fn creature_rule() -> ClassificationRule {
    ClassificationRule::new(CardGroup::Creature, |card| card.has_type(CardType::Creature))
}

fn commander_rule() -> ClassificationRule {
    ClassificationRule::new(CardGroup::Commander, |card| card.is_commander)
}
