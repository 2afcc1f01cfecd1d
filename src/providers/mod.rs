use crate::classes::card::EnrichedCard;
use crate::classes::source_card::SourceCardRecord;
use crate::classes::synergy::SynergyIndex;
use async_trait::async_trait;
use thiserror::Error;

/// Provider error types
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Network error: {0}")]
    NetworkError(String),
    #[error("Parse error: {0}")]
    ParseError(String),
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
    #[error("Processing error: {0}")]
    ProcessingError(String),
}

impl From<serde_json::Error> for ProviderError {
    fn from(err: serde_json::Error) -> Self {
        ProviderError::ParseError(err.to_string())
    }
}

/// Result type for provider operations
pub type ProviderResult<T> = Result<T, ProviderError>;

pub mod local;
pub mod memory;
pub mod provider_base;
pub mod scryfall;

pub use local::{BulkFileCardProvider, JsonFileSynergyProvider, JsonLinesSink};
pub use memory::{MemorySink, StaticCardProvider, StaticSynergyProvider};
pub use provider_base::{BaseProvider, RateLimiter};
pub use scryfall::ScryfallProvider;

/// One page of the upstream card corpus
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CardPage {
    pub records: Vec<SourceCardRecord>,
    /// Cursor of the following page, `None` on the last page
    pub next_cursor: Option<String>,
}

/// Paginated read access to the upstream card corpus
#[async_trait]
pub trait SourceCardProvider: Send + Sync {
    /// Fetch the page at `cursor`, or the first page when `cursor` is `None`.
    ///
    /// `page_size` is a hint; providers with a server-side page size ignore it.
    async fn fetch_page(&self, page_size: usize, cursor: Option<String>)
        -> ProviderResult<CardPage>;
}

/// Access to the secondary synergy dataset
#[async_trait]
pub trait SynergyProvider: Send + Sync {
    async fn fetch_synergy_index(&self) -> ProviderResult<SynergyIndex>;
}

/// Replace-semantics destination of enriched cards
#[async_trait]
pub trait CardSink: Send + Sync {
    /// Drop everything previously written
    async fn clear(&self) -> ProviderResult<()>;

    async fn write_batch(&self, cards: Vec<EnrichedCard>) -> ProviderResult<()>;
}

#[cfg(feature = "python")]
impl From<ProviderError> for pyo3::PyErr {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::NetworkError(msg) => pyo3::exceptions::PyConnectionError::new_err(msg),
            ProviderError::ParseError(msg) => pyo3::exceptions::PyValueError::new_err(msg),
            ProviderError::IoError(err) => pyo3::exceptions::PyIOError::new_err(err.to_string()),
            ProviderError::ConfigurationError(msg) => {
                pyo3::exceptions::PyRuntimeError::new_err(msg)
            }
            ProviderError::ProcessingError(msg) => pyo3::exceptions::PyRuntimeError::new_err(msg),
        }
    }
}
