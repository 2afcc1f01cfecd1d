use async_trait::async_trait;
use mtg_cards_rust::providers::{
    CardPage, CardSink, MemorySink, ProviderError, ProviderResult, SourceCardProvider,
    StaticCardProvider, StaticSynergyProvider, SynergyProvider,
};
use mtg_cards_rust::*;
use std::collections::{BTreeSet, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

mod comprehensive_pipeline_tests {
    use super::*;
    use mtg_cards_rust::classes::SourcePrices;

    fn legal() -> HashMap<String, String> {
        let mut legalities = HashMap::new();
        legalities.insert("commander".to_string(), "legal".to_string());
        legalities
    }

    fn record(name: &str, type_line: &str, oracle_text: &str) -> SourceCardRecord {
        SourceCardRecord {
            id: format!("{}-id", name.to_lowercase()),
            name: name.to_string(),
            lang: "en".to_string(),
            layout: "normal".to_string(),
            type_line: type_line.to_string(),
            oracle_text: oracle_text.to_string(),
            legalities: legal(),
            ..SourceCardRecord::default()
        }
    }

    fn prices(usd: &str, eur: &str, tix: &str) -> SourcePrices {
        SourcePrices {
            usd: Some(usd.to_string()),
            eur: Some(eur.to_string()),
            tix: Some(tix.to_string()),
            ..SourcePrices::default()
        }
    }

    fn corpus() -> Vec<SourceCardRecord> {
        let mut sol_ring = record("Sol Ring", "Artifact", "{T}: Add {C}{C}.");
        sol_ring.prices = prices("1.50", "1.20", "0.50");

        let mut mana_crypt = record("Mana Crypt", "Artifact", "{T}: Add {C}{C}.");
        mana_crypt.prices = prices("150.00", "120.00", "30.00");

        let mut opt = record("Opt", "Instant", "Scry 1.\nDraw a card.");
        opt.prices = SourcePrices {
            eur: Some("0.10".to_string()),
            ..SourcePrices::default()
        };

        let mut token = record("Goblin", "Token Creature — Goblin", "");
        token.layout = "token".to_string();

        let mut banned = record("Primeval Titan", "Creature — Giant", "Trample");
        banned
            .legalities
            .insert("commander".to_string(), "banned".to_string());

        let mut mdfc = record("Elf Front // Elf Back", "Creature — Elf // Land", "");
        mdfc.card_faces = vec![
            SourceCardRecord {
                name: "Elf Front".to_string(),
                type_line: "Creature — Elf".to_string(),
                ..SourceCardRecord::default()
            },
            SourceCardRecord {
                name: "Elf Back".to_string(),
                type_line: "Land".to_string(),
                ..SourceCardRecord::default()
            },
        ];

        let krenko = record(
            "Krenko, Mob Boss",
            "Legendary Creature — Goblin Warrior",
            "{T}: Create X 1/1 red Goblin creature tokens.",
        );

        let ghost = record("Ghost", "Hero", "");

        vec![sol_ring, opt, token, banned, mdfc, krenko, ghost, mana_crypt]
    }

    fn config(page_size: usize) -> TransformConfig {
        TransformConfig {
            page_size,
            worker_count: 3,
            ..TransformConfig::default()
        }
    }

    fn synergies() -> SynergyIndex {
        SynergyIndex::from_records(vec![SynergyRecord {
            card_with_synergy: "Sol Ring".to_string(),
            main_card: "Krenko, Mob Boss".to_string(),
            synergy: 0.12,
        }])
    }

    fn pipeline_with(
        cards: Arc<dyn SourceCardProvider>,
        synergies: Arc<dyn SynergyProvider>,
        sink: Arc<dyn CardSink>,
        page_size: usize,
    ) -> CardPipeline {
        CardPipeline::new(cards, synergies, sink, config(page_size)).unwrap()
    }

    fn names(cards: &[EnrichedCard]) -> BTreeSet<String> {
        cards.iter().map(|card| card.name.clone()).collect()
    }

    struct FailingPageProvider {
        inner: StaticCardProvider,
        fail_on_call: usize,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl SourceCardProvider for FailingPageProvider {
        async fn fetch_page(
            &self,
            page_size: usize,
            cursor: Option<String>,
        ) -> ProviderResult<CardPage> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if call == self.fail_on_call {
                return Err(ProviderError::NetworkError("connection reset".to_string()));
            }
            self.inner.fetch_page(page_size, cursor).await
        }
    }

    struct FailingSynergyProvider;

    #[async_trait]
    impl SynergyProvider for FailingSynergyProvider {
        async fn fetch_synergy_index(&self) -> ProviderResult<SynergyIndex> {
            Err(ProviderError::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "synergies.json",
            )))
        }
    }

    #[derive(Default)]
    struct FailingSink {
        fail_clear: bool,
        clears: AtomicUsize,
        writes: AtomicUsize,
    }

    #[async_trait]
    impl CardSink for FailingSink {
        async fn clear(&self) -> ProviderResult<()> {
            self.clears.fetch_add(1, Ordering::SeqCst);
            if self.fail_clear {
                return Err(ProviderError::ProcessingError("read-only".to_string()));
            }
            Ok(())
        }

        async fn write_batch(&self, _cards: Vec<EnrichedCard>) -> ProviderResult<()> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            Err(ProviderError::ProcessingError("disk full".to_string()))
        }
    }

    #[tokio::test]
    async fn test_full_run_writes_every_kept_card() {
        let sink = Arc::new(MemorySink::new());
        let pipeline = pipeline_with(
            Arc::new(StaticCardProvider::new(corpus())),
            Arc::new(StaticSynergyProvider::new(synergies())),
            sink.clone(),
            2,
        );

        let summary = pipeline.run_full_transform().await.unwrap();

        assert_eq!(summary.pages, 4);
        assert_eq!(summary.records_seen, 8);
        assert_eq!(summary.cards_written, 5);
        assert!(summary.finished_at >= summary.started_at);
        assert_eq!(
            summary.price_table_source,
            PriceTableSource::Anchor {
                card_id: "mana crypt-id".to_string(),
                card_name: "Mana Crypt".to_string(),
            }
        );

        assert_eq!(sink.clear_count(), 1);
        let cards = sink.cards();
        let expected: BTreeSet<String> = [
            "Sol Ring",
            "Opt",
            "Elf Front // Elf Back",
            "Krenko, Mob Boss",
            "Mana Crypt",
        ]
        .iter()
        .map(|name| name.to_string())
        .collect();
        assert_eq!(names(&cards), expected);
        assert!(sink.batches().iter().all(|batch| batch.len() <= 2));
        assert_eq!(summary.batches_written, sink.batches().len());
    }

    #[tokio::test]
    async fn test_full_run_enriches_cards() {
        let sink = Arc::new(MemorySink::new());
        let pipeline = pipeline_with(
            Arc::new(StaticCardProvider::new(corpus())),
            Arc::new(StaticSynergyProvider::new(synergies())),
            sink.clone(),
            175,
        );
        pipeline.run_full_transform().await.unwrap();

        let cards: HashMap<String, EnrichedCard> = sink
            .cards()
            .into_iter()
            .map(|card| (card.name.clone(), card))
            .collect();

        for card in cards.values() {
            assert!(!card.colors.is_empty());
            assert!(!card.card_types.is_empty());
            assert!(card.price >= 0.0);
        }

        let sol_ring = &cards["Sol Ring"];
        assert_eq!(sol_ring.price, 1.5);
        assert_eq!(sol_ring.synergies.get("Krenko, Mob Boss"), Some(&0.12));
        assert!(sol_ring.has_group(CardGroup::Ramp));

        // EUR price converted with the Mana Crypt anchor (150 / 120)
        let opt = &cards["Opt"];
        assert!((opt.price - 0.125).abs() < 1e-9);
        assert!(opt.has_group(CardGroup::Draw));
        assert!(opt.synergies.is_empty());

        let mdfc = &cards["Elf Front // Elf Back"];
        assert_eq!(mdfc.card_types, vec![CardType::Creature]);
        assert!(mdfc.is_land);
        assert_eq!(mdfc.card_faces.len(), 2);

        let krenko = &cards["Krenko, Mob Boss"];
        assert!(krenko.is_commander);
        assert!(krenko.has_group(CardGroup::Commander));
    }

    #[tokio::test]
    async fn test_rerun_replaces_sink_content() {
        let sink = Arc::new(MemorySink::new());
        let pipeline = pipeline_with(
            Arc::new(StaticCardProvider::new(corpus())),
            Arc::new(StaticSynergyProvider::new(synergies())),
            sink.clone(),
            3,
        );

        let first = pipeline.run_full_transform().await.unwrap();
        let second = pipeline.run_full_transform().await.unwrap();

        assert_ne!(first.run_id, second.run_id);
        assert_eq!(sink.clear_count(), 2);
        assert_eq!(sink.cards().len(), 5);
    }

    #[tokio::test]
    async fn test_empty_corpus() {
        let sink = Arc::new(MemorySink::new());
        let pipeline = pipeline_with(
            Arc::new(StaticCardProvider::new(Vec::new())),
            Arc::new(StaticSynergyProvider::default()),
            sink.clone(),
            10,
        );

        let summary = pipeline.run_full_transform().await.unwrap();
        assert_eq!(summary.pages, 1);
        assert_eq!(summary.cards_written, 0);
        assert_eq!(summary.batches_written, 0);
        assert!(matches!(
            summary.price_table_source,
            PriceTableSource::Fallback { .. }
        ));
        assert_eq!(sink.clear_count(), 1);
    }

    #[tokio::test]
    async fn test_fetch_error_carries_page_and_leaves_sink_untouched() {
        let sink = Arc::new(MemorySink::new());
        let provider = FailingPageProvider {
            inner: StaticCardProvider::new(corpus()),
            fail_on_call: 2,
            calls: AtomicUsize::new(0),
        };
        let pipeline = pipeline_with(
            Arc::new(provider),
            Arc::new(StaticSynergyProvider::default()),
            sink.clone(),
            2,
        );

        let err = pipeline.run_full_transform().await.unwrap_err();
        assert!(matches!(err, TransformError::Fetch { page: 2, .. }));
        assert!(err.to_string().contains("page 2"));
        assert_eq!(sink.clear_count(), 0);
    }

    #[tokio::test]
    async fn test_synergy_error_aborts_before_clear() {
        let sink = Arc::new(MemorySink::new());
        let pipeline = pipeline_with(
            Arc::new(StaticCardProvider::new(corpus())),
            Arc::new(FailingSynergyProvider),
            sink.clone(),
            2,
        );

        let err = pipeline.run_full_transform().await.unwrap_err();
        assert!(matches!(err, TransformError::SynergyIndex(_)));
        assert_eq!(sink.clear_count(), 0);
    }

    #[tokio::test]
    async fn test_clear_error() {
        let sink = Arc::new(FailingSink {
            fail_clear: true,
            ..FailingSink::default()
        });
        let pipeline = pipeline_with(
            Arc::new(StaticCardProvider::new(corpus())),
            Arc::new(StaticSynergyProvider::default()),
            sink.clone(),
            2,
        );

        let err = pipeline.run_full_transform().await.unwrap_err();
        assert!(matches!(err, TransformError::Clear(_)));
        assert_eq!(sink.writes.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_write_error_carries_batch() {
        let sink = Arc::new(FailingSink::default());
        let pipeline = pipeline_with(
            Arc::new(StaticCardProvider::new(corpus())),
            Arc::new(StaticSynergyProvider::default()),
            sink.clone(),
            2,
        );

        let err = pipeline.run_full_transform().await.unwrap_err();
        assert!(matches!(err, TransformError::Write { batch: 1, .. }));
        assert_eq!(sink.clears.load(Ordering::SeqCst), 1);
        assert_eq!(sink.writes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_custom_curated_lists_from_config() {
        let sink = Arc::new(MemorySink::new());
        let mut config = config(10);
        config.curated.standalone = vec!["Opt".to_string()];
        let pipeline = CardPipeline::new(
            Arc::new(StaticCardProvider::new(corpus())),
            Arc::new(StaticSynergyProvider::default()),
            sink.clone(),
            config,
        )
        .unwrap();

        pipeline.run_full_transform().await.unwrap();
        let opt = sink
            .cards()
            .into_iter()
            .find(|card| card.name == "Opt")
            .unwrap();
        assert!(opt.has_group(CardGroup::Standalone));
    }

    #[tokio::test]
    async fn test_target_format_from_config() {
        let sink = Arc::new(MemorySink::new());
        let mut config = config(10);
        config.target_format = "vintage".to_string();
        let mut records = corpus();
        records[0]
            .legalities
            .insert("vintage".to_string(), "legal".to_string());

        let pipeline = CardPipeline::new(
            Arc::new(StaticCardProvider::new(records)),
            Arc::new(StaticSynergyProvider::default()),
            sink.clone(),
            config,
        )
        .unwrap();

        let summary = pipeline.run_full_transform().await.unwrap();
        assert_eq!(summary.cards_written, 1);
        assert_eq!(sink.cards()[0].name, "Sol Ring");
    }
}
