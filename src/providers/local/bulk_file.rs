use crate::classes::source_card::SourceCardRecord;
use crate::providers::{CardPage, ProviderError, ProviderResult, SourceCardProvider};
use async_trait::async_trait;
use log::info;
use std::path::Path;

/// Card corpus read from a Scryfall bulk-data file (a JSON array of cards).
///
/// The file is parsed once; pages are slices of it and the cursor is the
/// offset of the next record.
#[derive(Debug, Clone, Default)]
pub struct BulkFileCardProvider {
    records: Vec<SourceCardRecord>,
}

impl BulkFileCardProvider {
    pub async fn open<P: AsRef<Path>>(path: P) -> ProviderResult<Self> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await?;
        let provider = Self::from_json_str(&content)?;
        info!(
            "Loaded {} card records from {}",
            provider.len(),
            path.display()
        );
        Ok(provider)
    }

    pub fn from_json_str(content: &str) -> ProviderResult<Self> {
        let records: Vec<SourceCardRecord> = serde_json::from_str(content)?;
        Ok(Self { records })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Slice `records` into the page at offset `cursor`
pub(crate) fn page_at(
    records: &[SourceCardRecord],
    page_size: usize,
    cursor: Option<String>,
) -> ProviderResult<CardPage> {
    let offset = match cursor {
        Some(cursor) => cursor
            .parse::<usize>()
            .map_err(|e| ProviderError::ParseError(format!("Invalid cursor {}: {}", cursor, e)))?,
        None => 0,
    };
    let start = offset.min(records.len());
    let end = start.saturating_add(page_size.max(1)).min(records.len());

    Ok(CardPage {
        records: records[start..end].to_vec(),
        next_cursor: (end < records.len()).then(|| end.to_string()),
    })
}

#[async_trait]
impl SourceCardProvider for BulkFileCardProvider {
    async fn fetch_page(
        &self,
        page_size: usize,
        cursor: Option<String>,
    ) -> ProviderResult<CardPage> {
        page_at(&self.records, page_size, cursor)
    }
}
