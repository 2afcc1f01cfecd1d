use crate::builders::card_builder::CardTransformer;
use crate::card_groups::ClassificationEngine;
use crate::classes::card::EnrichedCard;
use crate::classes::prices::{PriceTable, PriceTableSource};
use crate::classes::source_card::SourceCardRecord;
use crate::config::TransformConfig;
use crate::providers::{CardSink, ProviderError, SourceCardProvider, SynergyProvider};
use chrono::{DateTime, Utc};
use log::{debug, info};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{mpsc, Semaphore};
use tokio::task::JoinSet;
use uuid::Uuid;

/// Failure of a transform run
#[derive(Error, Debug)]
pub enum TransformError {
    #[error("Failed to fetch page {page}: {source}")]
    Fetch {
        page: usize,
        #[source]
        source: ProviderError,
    },
    #[error("Failed to load synergy index: {0}")]
    SynergyIndex(#[source] ProviderError),
    #[error("Failed to clear sink: {0}")]
    Clear(#[source] ProviderError),
    #[error("Failed to write batch {batch}: {source}")]
    Write {
        batch: usize,
        #[source]
        source: ProviderError,
    },
    #[error("Worker failure: {0}")]
    Worker(String),
    #[error("Invalid classification rule: {0}")]
    Rules(#[from] regex::Error),
}

/// Outcome of a completed run
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    /// Pages fetched from the card provider
    pub pages: usize,
    pub records_seen: usize,
    pub cards_written: usize,
    pub batches_written: usize,
    pub price_table_source: PriceTableSource,
}

impl RunSummary {
    pub fn duration(&self) -> chrono::Duration {
        self.finished_at - self.started_at
    }
}

/// Full-replace transform of the card corpus into a sink.
///
/// A run clears the sink exactly once, after every page was fetched and the
/// batch tables were built. A failure past that point leaves the sink
/// cleared and partially written; callers needing atomicity should write
/// into a staging sink and swap.
pub struct CardPipeline {
    cards: Arc<dyn SourceCardProvider>,
    synergies: Arc<dyn SynergyProvider>,
    sink: Arc<dyn CardSink>,
    engine: Arc<ClassificationEngine>,
    config: TransformConfig,
}

impl CardPipeline {
    /// Build a pipeline, compiling the classification rules from `config.curated`
    pub fn new(
        cards: Arc<dyn SourceCardProvider>,
        synergies: Arc<dyn SynergyProvider>,
        sink: Arc<dyn CardSink>,
        config: TransformConfig,
    ) -> Result<Self, TransformError> {
        let engine = Arc::new(ClassificationEngine::new(&config.curated)?);
        Ok(Self {
            cards,
            synergies,
            sink,
            engine,
            config,
        })
    }

    /// Replace the classification engine
    pub fn with_engine(mut self, engine: Arc<ClassificationEngine>) -> Self {
        self.engine = engine;
        self
    }

    pub fn config(&self) -> &TransformConfig {
        &self.config
    }

    pub async fn run_full_transform(&self) -> Result<RunSummary, TransformError> {
        let run_id = Uuid::new_v4();
        let started_at = Utc::now();
        info!("Starting card transform run {}", run_id);

        let pages = self.fetch_all_pages().await?;
        let page_count = pages.len();
        let records_seen: usize = pages.iter().map(Vec::len).sum();
        info!("Fetched {} records in {} pages", records_seen, page_count);

        let price_table = Arc::new(PriceTable::from_records(pages.iter().flatten()));
        let synergies = Arc::new(
            self.synergies
                .fetch_synergy_index()
                .await
                .map_err(TransformError::SynergyIndex)?,
        );
        info!("Loaded synergy index for {} cards", synergies.len());

        let transformer = CardTransformer::from_config(
            &self.config,
            Arc::clone(&price_table),
            synergies,
            Arc::clone(&self.engine),
        );

        self.sink.clear().await.map_err(TransformError::Clear)?;

        let (cards_written, batches_written) = self.transform_and_write(&transformer, pages).await?;

        let summary = RunSummary {
            run_id,
            started_at,
            finished_at: Utc::now(),
            pages: page_count,
            records_seen,
            cards_written,
            batches_written,
            price_table_source: price_table.source().clone(),
        };
        info!(
            "Run {} wrote {} cards in {} batches ({} ms)",
            run_id,
            cards_written,
            batches_written,
            summary.duration().num_milliseconds()
        );
        Ok(summary)
    }

    async fn fetch_all_pages(&self) -> Result<Vec<Vec<SourceCardRecord>>, TransformError> {
        let page_size = self.config.effective_page_size();
        let mut pages = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let page_number = pages.len() + 1;
            let page = self
                .cards
                .fetch_page(page_size, cursor)
                .await
                .map_err(|source| TransformError::Fetch {
                    page: page_number,
                    source,
                })?;
            debug!("Page {}: {} records", page_number, page.records.len());

            pages.push(page.records);
            cursor = page.next_cursor;
            if cursor.is_none() {
                break;
            }
        }

        Ok(pages)
    }

    /// Transform page by page while a writer task drains finished batches.
    ///
    /// Returns the number of cards and batches written.
    async fn transform_and_write(
        &self,
        transformer: &CardTransformer,
        pages: Vec<Vec<SourceCardRecord>>,
    ) -> Result<(usize, usize), TransformError> {
        let page_size = self.config.effective_page_size();
        let workers = self.config.effective_worker_count();
        let semaphore = Arc::new(Semaphore::new(workers));

        let (sender, mut receiver) = mpsc::channel::<(usize, Vec<EnrichedCard>)>(1);
        let sink = Arc::clone(&self.sink);
        let writer = tokio::spawn(async move {
            let mut cards_written = 0;
            let mut batches_written = 0;
            while let Some((batch, cards)) = receiver.recv().await {
                let count = cards.len();
                sink.write_batch(cards)
                    .await
                    .map_err(|source| TransformError::Write { batch, source })?;
                cards_written += count;
                batches_written += 1;
                debug!("Wrote batch {} ({} cards)", batch, count);
            }
            Ok::<(usize, usize), TransformError>((cards_written, batches_written))
        });

        let mut batch = 0;
        let mut transform_result: Result<(), TransformError> = Ok(());
        'pages: for page in pages {
            let cards = match transform_page(transformer, page, &semaphore).await {
                Ok(cards) => cards,
                Err(err) => {
                    transform_result = Err(err);
                    break;
                }
            };

            let mut cards = cards.into_iter().peekable();
            while cards.peek().is_some() {
                batch += 1;
                let chunk: Vec<EnrichedCard> = cards.by_ref().take(page_size).collect();
                if sender.send((batch, chunk)).await.is_err() {
                    // Writer stopped early; its own error is reported below
                    break 'pages;
                }
            }
        }
        drop(sender);

        let written = writer
            .await
            .map_err(|e| TransformError::Worker(format!("Writer task failed: {}", e)))?;
        transform_result?;
        written
    }
}

/// Transform one page on the blocking pool, one task per record.
///
/// The semaphore bounds how many records are in flight at once.
async fn transform_page(
    transformer: &CardTransformer,
    page: Vec<SourceCardRecord>,
    semaphore: &Arc<Semaphore>,
) -> Result<Vec<EnrichedCard>, TransformError> {
    let mut cards = Vec::with_capacity(page.len());
    let mut join_set = JoinSet::new();

    for record in page {
        let transformer = transformer.clone();
        let permit = Arc::clone(semaphore)
            .acquire_owned()
            .await
            .map_err(|e| TransformError::Worker(format!("Semaphore error: {}", e)))?;

        join_set.spawn_blocking(move || {
            let _permit = permit;
            transformer.transform(&record, None)
        });
    }

    while let Some(result) = join_set.join_next().await {
        let transformed =
            result.map_err(|e| TransformError::Worker(format!("Transform task failed: {}", e)))?;
        cards.extend(transformed);
    }
    Ok(cards)
}
