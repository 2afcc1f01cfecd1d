use crate::card_groups::CardGroup;
use crate::classes::card::EnrichedCard;
use crate::classes::card_types::CardType;
use crate::utils::CardUtils;
use rustc_hash::FxHashSet;
use std::fmt;
use std::sync::Arc;

/// Pure test over a card under construction
pub type RulePredicate = Arc<dyn Fn(&EnrichedCard) -> bool + Send + Sync>;

/// One entry of the classification table.
///
/// Evaluation order is fixed: excluded names return false, included names
/// return true, cards outside the type gate return false, and only then the
/// predicate runs.
#[derive(Clone)]
pub struct ClassificationRule {
    group: CardGroup,
    include_names: FxHashSet<String>,
    exclude_names: FxHashSet<String>,
    type_gate: Vec<CardType>,
    predicate: RulePredicate,
}

impl ClassificationRule {
    pub fn new<F>(group: CardGroup, predicate: F) -> Self
    where
        F: Fn(&EnrichedCard) -> bool + Send + Sync + 'static,
    {
        Self {
            group,
            include_names: FxHashSet::default(),
            exclude_names: FxHashSet::default(),
            type_gate: Vec::new(),
            predicate: Arc::new(predicate),
        }
    }

    /// Rule matching by name only
    pub fn names_only<I, S>(group: CardGroup, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(group, |_| false).including(names)
    }

    /// Names always tagged, whatever their text says
    pub fn including<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.include_names.extend(CardUtils::name_set(names));
        self
    }

    /// Names never tagged, checked before anything else
    pub fn excluding<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_names.extend(CardUtils::name_set(names));
        self
    }

    /// Restrict the predicate to cards having one of `card_types`
    pub fn gated_by(mut self, card_types: &[CardType]) -> Self {
        self.type_gate = card_types.to_vec();
        self
    }

    pub fn group(&self) -> CardGroup {
        self.group
    }

    pub fn matches(&self, card: &EnrichedCard) -> bool {
        if self.exclude_names.contains(&card.name) {
            return false;
        }
        if self.include_names.contains(&card.name) {
            return true;
        }
        if !self.type_gate.is_empty() && !card.has_any_type(&self.type_gate) {
            return false;
        }
        (self.predicate)(card)
    }
}

impl fmt::Debug for ClassificationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassificationRule")
            .field("group", &self.group)
            .field("include_names", &self.include_names.len())
            .field("exclude_names", &self.exclude_names.len())
            .field("type_gate", &self.type_gate)
            .finish()
    }
}
