use super::{ProviderError, ProviderResult};
use chrono::{DateTime, Utc};
use log::debug;
use reqwest::{Client, Response};
use serde_json::Value;
use std::collections::HashMap;

/// Shared HTTP plumbing of the remote providers
pub struct BaseProvider {
    pub class_id: String,
    pub client: Client,
    pub headers: HashMap<String, String>,
}

impl BaseProvider {
    /// Create a new base provider sending `headers` on every request
    pub fn new(class_id: String, headers: HashMap<String, String>) -> Self {
        let mut default_headers = reqwest::header::HeaderMap::new();
        for (key, value) in &headers {
            if let (Ok(name), Ok(val)) = (
                reqwest::header::HeaderName::from_bytes(key.as_bytes()),
                reqwest::header::HeaderValue::from_str(value),
            ) {
                default_headers.insert(name, val);
            }
        }

        let client = Client::builder()
            .default_headers(default_headers)
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            class_id,
            client,
            headers,
        }
    }

    pub async fn get_request(&self, url: &str) -> ProviderResult<Response> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ProviderError::NetworkError(format!("Request failed: {}", e)))?;
        debug!("[{}] GET {} -> {}", self.class_id, url, response.status());
        Ok(response)
    }

    /// Download and parse a JSON document.
    ///
    /// Error statuses still return their body when it is JSON, since some
    /// APIs describe failures in a JSON error object.
    pub async fn download_json(&self, url: &str) -> ProviderResult<Value> {
        let response = self.get_request(url).await?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::NetworkError(format!("Body download error: {}", e)))?;

        match serde_json::from_str::<Value>(&body) {
            Ok(value) => Ok(value),
            Err(_) if !status.is_success() => Err(ProviderError::NetworkError(format!(
                "HTTP error {}: {}",
                status, body
            ))),
            Err(e) => Err(ProviderError::ParseError(format!("JSON parse error: {}", e))),
        }
    }
}

/// Rate limiter for API calls
pub struct RateLimiter {
    last_call: tokio::sync::Mutex<DateTime<Utc>>,
    min_interval: chrono::Duration,
}

impl RateLimiter {
    pub fn new(calls_per_second: f64) -> Self {
        let min_interval = chrono::Duration::milliseconds((1000.0 / calls_per_second) as i64);
        Self {
            last_call: tokio::sync::Mutex::new(DateTime::UNIX_EPOCH),
            min_interval,
        }
    }

    pub fn min_interval(&self) -> chrono::Duration {
        self.min_interval
    }

    /// Sleep until at least `min_interval` passed since the previous call
    pub async fn wait_if_needed(&self) {
        let mut last_call = self.last_call.lock().await;

        let elapsed = Utc::now() - *last_call;
        if elapsed < self.min_interval {
            let wait_time = self.min_interval - elapsed;
            tokio::time::sleep(
                wait_time
                    .to_std()
                    .unwrap_or(std::time::Duration::from_millis(100)),
            )
            .await;
        }

        *last_call = Utc::now();
    }
}
