use crate::classes::base::JsonObject;
use crate::classes::card::EnrichedCard;
use crate::providers::{CardSink, ProviderResult};
use async_trait::async_trait;
use log::debug;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;

/// Sink writing one JSON document per card and line.
///
/// `clear` truncates (or creates) the file; batches are appended.
#[derive(Debug, Clone)]
pub struct JsonLinesSink {
    path: PathBuf,
}

impl JsonLinesSink {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl CardSink for JsonLinesSink {
    async fn clear(&self) -> ProviderResult<()> {
        tokio::fs::write(&self.path, b"").await?;
        Ok(())
    }

    async fn write_batch(&self, cards: Vec<EnrichedCard>) -> ProviderResult<()> {
        let mut buffer = String::new();
        for card in &cards {
            buffer.push_str(&card.to_json_string()?);
            buffer.push('\n');
        }

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(buffer.as_bytes()).await?;
        file.flush().await?;

        debug!("Appended {} cards to {}", cards.len(), self.path.display());
        Ok(())
    }
}
