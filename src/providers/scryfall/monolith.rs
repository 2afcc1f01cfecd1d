use super::sf_utils;
use crate::classes::source_card::SourceCardRecord;
use crate::config::TransformConfig;
use crate::providers::{
    BaseProvider, CardPage, ProviderError, ProviderResult, RateLimiter, SourceCardProvider,
};
use async_trait::async_trait;
use log::{debug, warn};
use serde::Deserialize;
use serde_json::Value;
use url::Url;

/// Scryfall list object returned by `cards/search`
#[derive(Debug, Deserialize)]
struct ScryfallList {
    #[serde(default)]
    data: Vec<SourceCardRecord>,
    #[serde(default)]
    has_more: bool,
    next_page: Option<String>,
}

/// Card corpus read from the Scryfall search API, one server page per fetch
pub struct ScryfallProvider {
    base: BaseProvider,
    rate_limiter: RateLimiter,
    query: String,
}

impl ScryfallProvider {
    const CARDS_SEARCH_URL: &'static str = "https://api.scryfall.com/cards/search";
    /// Scryfall asks clients to stay at or below 10 requests per second
    const CALLS_PER_SECOND: f64 = 10.0;

    pub fn new(config: &TransformConfig) -> Self {
        let headers = sf_utils::build_http_header(&config.scryfall);
        Self {
            base: BaseProvider::new("sf".to_string(), headers),
            rate_limiter: RateLimiter::new(Self::CALLS_PER_SECOND),
            query: config.scryfall_query.clone(),
        }
    }

    /// First page URL of the configured search
    pub fn search_url(&self) -> ProviderResult<Url> {
        Url::parse_with_params(
            Self::CARDS_SEARCH_URL,
            &[
                ("q", self.query.as_str()),
                ("order", "name"),
                ("unique", "cards"),
            ],
        )
        .map_err(|e| ProviderError::ConfigurationError(format!("Invalid search URL: {}", e)))
    }

    /// Turn a search response into a page.
    ///
    /// A `not_found` error object means the query matched nothing and yields
    /// an empty last page; any other error object fails.
    pub fn parse_search_page(response: Value) -> ProviderResult<CardPage> {
        if response.get("object").and_then(|v| v.as_str()) == Some("error") {
            let code = response.get("code").and_then(|v| v.as_str()).unwrap_or("");
            if code == "not_found" {
                warn!("Scryfall search matched no cards");
                return Ok(CardPage::default());
            }
            let details = response
                .get("details")
                .and_then(|v| v.as_str())
                .unwrap_or("no details");
            return Err(ProviderError::NetworkError(format!(
                "Scryfall error {}: {}",
                code, details
            )));
        }

        let list: ScryfallList = serde_json::from_value(response)?;
        let next_cursor = match (list.has_more, list.next_page) {
            (true, Some(next_page)) => {
                Url::parse(&next_page).map_err(|e| {
                    ProviderError::ParseError(format!("Invalid next_page {}: {}", next_page, e))
                })?;
                Some(next_page)
            }
            _ => None,
        };

        Ok(CardPage {
            records: list.data,
            next_cursor,
        })
    }
}

#[async_trait]
impl SourceCardProvider for ScryfallProvider {
    async fn fetch_page(
        &self,
        page_size: usize,
        cursor: Option<String>,
    ) -> ProviderResult<CardPage> {
        let url = match cursor {
            Some(cursor) => cursor,
            None => self.search_url()?.to_string(),
        };
        debug!("Fetching Scryfall page {} (page size hint {})", url, page_size);

        self.rate_limiter.wait_if_needed().await;
        let response = self.base.download_json(&url).await?;
        Self::parse_search_page(response)
    }
}
