use crate::builders::card_builder::DEFAULT_EXCLUDED_LAYOUTS;
use crate::card_groups::CuratedLists;
use crate::classes::legalities::COMMANDER_FORMAT;
use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

/// Default configuration file, looked up in the working directory
pub const CONFIG_FILE: &str = "mtg_cards.toml";

/// Prefix of configuration environment variables (`MTG_CARDS_PAGE_SIZE`, ...)
pub const ENV_PREFIX: &str = "MTG_CARDS";

pub const DEFAULT_PAGE_SIZE: usize = 175;
pub const DEFAULT_SCRYFALL_QUERY: &str = "game:paper";

/// Scryfall credentials
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScryfallConfig {
    pub client_secret: Option<String>,
}

/// Settings of a transform run.
///
/// Every key is optional. Nested keys are reachable from the environment with
/// a double underscore, e.g. `MTG_CARDS_SCRYFALL__CLIENT_SECRET`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformConfig {
    /// Records per fetched page and cards per written batch
    pub page_size: usize,
    /// Upper bound of concurrently transformed records
    pub worker_count: usize,
    pub target_format: String,
    pub excluded_layouts: Vec<String>,
    pub scryfall_query: String,
    pub scryfall: ScryfallConfig,
    pub curated: CuratedLists,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            worker_count: std::thread::available_parallelism()
                .map(|count| count.get())
                .unwrap_or(4),
            target_format: COMMANDER_FORMAT.to_string(),
            excluded_layouts: DEFAULT_EXCLUDED_LAYOUTS
                .iter()
                .map(|layout| layout.to_string())
                .collect(),
            scryfall_query: DEFAULT_SCRYFALL_QUERY.to_string(),
            scryfall: ScryfallConfig::default(),
            curated: CuratedLists::default(),
        }
    }
}

impl TransformConfig {
    /// Load from [`CONFIG_FILE`] (if present) and the environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(CONFIG_FILE)
    }

    /// Load from an optional TOML file, overridden by the environment
    pub fn load_from(path: &str) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(File::new(path, FileFormat::Toml).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("excluded_layouts"),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Page size, never below one
    pub fn effective_page_size(&self) -> usize {
        self.page_size.max(1)
    }

    /// Worker count, never below one
    pub fn effective_worker_count(&self) -> usize {
        self.worker_count.max(1)
    }
}
