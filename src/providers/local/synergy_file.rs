use crate::classes::synergy::{SynergyIndex, SynergyRecord};
use crate::providers::{ProviderResult, SynergyProvider};
use async_trait::async_trait;
use log::info;
use std::path::PathBuf;

/// EDHREC synergy rows (`cardWithSynergy`, `mainCard`, `synergy`) stored as a JSON array
#[derive(Debug, Clone)]
pub struct JsonFileSynergyProvider {
    path: PathBuf,
}

impl JsonFileSynergyProvider {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn parse(content: &str) -> ProviderResult<SynergyIndex> {
        let records: Vec<SynergyRecord> = serde_json::from_str(content)?;
        Ok(SynergyIndex::from_records(records))
    }
}

#[async_trait]
impl SynergyProvider for JsonFileSynergyProvider {
    async fn fetch_synergy_index(&self) -> ProviderResult<SynergyIndex> {
        let content = tokio::fs::read_to_string(&self.path).await?;
        let index = Self::parse(&content)?;
        info!(
            "Loaded synergies for {} cards from {}",
            index.len(),
            self.path.display()
        );
        Ok(index)
    }
}
