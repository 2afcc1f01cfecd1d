use mtg_cards_rust::card_groups::{is_commander_eligible, RulePredicate};
use mtg_cards_rust::*;

mod comprehensive_classification_tests {
    use super::*;

    fn engine() -> ClassificationEngine {
        ClassificationEngine::with_default_lists().unwrap()
    }

    fn classify(name: &str, card_types: Vec<CardType>, oracle_text: &str) -> EnrichedCard {
        let mut card = EnrichedCard {
            name: name.to_string(),
            card_types,
            oracle_text: oracle_text.to_string(),
            search_text: name.to_lowercase(),
            ..EnrichedCard::default()
        };
        engine().classify(&mut card);
        card
    }

    /// Every land is ramp unless curated otherwise
    #[test]
    fn test_lands_are_ramp() {
        for (name, text) in [
            ("Forest", "({T}: Add {G}.)"),
            ("Maze of Ith", "{T}: Untap target attacking creature."),
            ("Dryad Arbor", ""),
        ] {
            let card = classify(name, vec![CardType::Land], text);
            assert!(card.has_group(CardGroup::Ramp), "{} should be ramp", name);
        }
    }

    #[test]
    fn test_excluded_land_is_not_ramp() {
        let curated = CuratedLists {
            non_ramp: vec!["Maze of Ith".to_string()],
            ..CuratedLists::default()
        };
        let engine = ClassificationEngine::new(&curated).unwrap();
        let mut card = EnrichedCard {
            name: "Maze of Ith".to_string(),
            card_types: vec![CardType::Land],
            ..EnrichedCard::default()
        };
        engine.classify(&mut card);
        assert!(!card.has_group(CardGroup::Ramp));
    }

    #[test]
    fn test_looting_is_draw() {
        let card = classify(
            "Faithless Looting",
            vec![CardType::Sorcery],
            "Draw two cards, then discard two cards.",
        );
        assert!(card.has_group(CardGroup::Draw));

        let card = classify(
            "Merfolk Looter",
            vec![CardType::Creature],
            "Draw a card, then discard a card.",
        );
        assert!(card.has_group(CardGroup::Draw));
    }

    #[test]
    fn test_self_sacrifice_draw_is_not_draw() {
        let card = classify(
            "Mind Stone",
            vec![CardType::Artifact],
            "Sacrifice Mind Stone: Draw a card.",
        );
        assert!(!card.has_group(CardGroup::Draw));
        assert!(card.oracle_text.contains("Draw a card."));
    }

    #[test]
    fn test_information_draw_exclusions() {
        for name in ["Hullbreacher", "The Locust God", "Chasm Skulker"] {
            let card = classify(name, vec![CardType::Creature], "Whenever you draw a card, ...");
            assert!(!card.has_group(CardGroup::Draw), "{} should not be draw", name);
        }
    }

    #[test]
    fn test_cyclonic_rift_is_board_wipe_whatever_the_text() {
        for text in ["", "Return target nonland permanent you don't control to its owner's hand."] {
            let card = classify("Cyclonic Rift", vec![CardType::Instant], text);
            assert!(card.has_group(CardGroup::BoardWipe));
        }
        let card = classify("Cyclonic Rift", vec![CardType::Creature], "");
        assert!(card.has_group(CardGroup::BoardWipe));
    }

    #[test]
    fn test_time_stop_is_never_board_wipe() {
        let card = classify(
            "Time Stop",
            vec![CardType::Instant],
            "Destroy all creatures. Exile all spells.",
        );
        assert!(!card.has_group(CardGroup::BoardWipe));
    }

    #[test]
    fn test_board_wipe_type_gate() {
        let sorcery = classify("Damnation", vec![CardType::Sorcery], "Destroy all creatures.");
        assert!(sorcery.has_group(CardGroup::BoardWipe));

        let enchantment = classify(
            "Pernicious Deed",
            vec![CardType::Enchantment],
            "Destroy all artifacts, creatures, and enchantments with mana value X or less.",
        );
        assert!(!enchantment.has_group(CardGroup::BoardWipe));
    }

    #[test]
    fn test_graveyard_exile_is_not_removal() {
        let card = classify(
            "Graveyard Sweeper",
            vec![CardType::Instant],
            "Exile target creature card in a graveyard.",
        );
        assert!(!card.has_group(CardGroup::Removal));

        let card = classify("Swords to Plowshares", vec![CardType::Instant], "Exile target creature.");
        assert!(card.has_group(CardGroup::Removal));
    }

    #[test]
    fn test_commander_eligibility() {
        assert!(is_commander_eligible(
            "Legendary Creature — Human Wizard",
            ""
        ));
        assert!(is_commander_eligible(
            "Artifact Creature — Golem",
            "This card can be your commander."
        ));
        assert!(!is_commander_eligible("Creature — Human Wizard", "Flying"));
    }

    #[test]
    fn test_tags_are_not_exclusive() {
        let card = classify(
            "Austere Command",
            vec![CardType::Sorcery],
            "Choose two — • Destroy all artifacts. • Destroy target creature. • Draw two cards.",
        );
        assert_eq!(
            card.card_groups,
            vec![CardGroup::Draw, CardGroup::Removal, CardGroup::BoardWipe]
        );
        assert_eq!(card.search_text, "austere command, draw, removal, board wipe");
    }

    #[test]
    fn test_rerunning_classification_duplicates_tags() {
        let mut card = classify("Divination", vec![CardType::Sorcery], "Draw two cards.");
        engine().classify(&mut card);
        assert_eq!(card.card_groups, vec![CardGroup::Draw, CardGroup::Draw]);
    }

    #[test]
    fn test_custom_rule_table() {
        let predicate: RulePredicate =
            std::sync::Arc::new(|card: &EnrichedCard| card.oracle_text.contains("Treasure"));
        let rule = ClassificationRule::new(CardGroup::Ramp, move |card| predicate(card))
            .excluding(["Goldspan Dragon"]);
        let engine = ClassificationEngine::with_rules(vec![rule]);

        let mut smothering = EnrichedCard {
            name: "Smothering Tithe".to_string(),
            oracle_text: "create a Treasure token".to_string(),
            ..EnrichedCard::default()
        };
        engine.classify(&mut smothering);
        assert_eq!(smothering.card_groups, vec![CardGroup::Ramp]);

        let mut goldspan = EnrichedCard {
            name: "Goldspan Dragon".to_string(),
            oracle_text: "create a Treasure token".to_string(),
            ..EnrichedCard::default()
        };
        engine.classify(&mut goldspan);
        assert!(goldspan.card_groups.is_empty());
    }
}
