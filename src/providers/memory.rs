//! In-memory collaborators, for embedding and tests

use crate::classes::card::EnrichedCard;
use crate::classes::source_card::SourceCardRecord;
use crate::classes::synergy::SynergyIndex;
use crate::providers::local::bulk_file::page_at;
use crate::providers::{
    CardPage, CardSink, ProviderResult, SourceCardProvider, SynergyProvider,
};
use async_trait::async_trait;
use std::sync::Mutex;

/// Pages over a fixed record list; the cursor is the next offset
#[derive(Debug, Clone, Default)]
pub struct StaticCardProvider {
    records: Vec<SourceCardRecord>,
}

impl StaticCardProvider {
    pub fn new(records: Vec<SourceCardRecord>) -> Self {
        Self { records }
    }
}

#[async_trait]
impl SourceCardProvider for StaticCardProvider {
    async fn fetch_page(
        &self,
        page_size: usize,
        cursor: Option<String>,
    ) -> ProviderResult<CardPage> {
        page_at(&self.records, page_size, cursor)
    }
}

/// Hands out clones of a prebuilt index
#[derive(Debug, Clone, Default)]
pub struct StaticSynergyProvider {
    index: SynergyIndex,
}

impl StaticSynergyProvider {
    pub fn new(index: SynergyIndex) -> Self {
        Self { index }
    }
}

#[async_trait]
impl SynergyProvider for StaticSynergyProvider {
    async fn fetch_synergy_index(&self) -> ProviderResult<SynergyIndex> {
        Ok(self.index.clone())
    }
}

/// Sink collecting cards in memory, recording every batch it received
#[derive(Debug, Default)]
pub struct MemorySink {
    batches: Mutex<Vec<Vec<EnrichedCard>>>,
    clear_count: Mutex<usize>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every card written since the last clear
    pub fn cards(&self) -> Vec<EnrichedCard> {
        self.batches().into_iter().flatten().collect()
    }

    pub fn batches(&self) -> Vec<Vec<EnrichedCard>> {
        self.batches.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn clear_count(&self) -> usize {
        *self.clear_count.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl CardSink for MemorySink {
    async fn clear(&self) -> ProviderResult<()> {
        let mut batches = self.batches.lock().unwrap_or_else(|e| e.into_inner());
        batches.clear();
        let mut count = self.clear_count.lock().unwrap_or_else(|e| e.into_inner());
        *count += 1;
        Ok(())
    }

    async fn write_batch(&self, cards: Vec<EnrichedCard>) -> ProviderResult<()> {
        let mut batches = self.batches.lock().unwrap_or_else(|e| e.into_inner());
        batches.push(cards);
        Ok(())
    }
}
