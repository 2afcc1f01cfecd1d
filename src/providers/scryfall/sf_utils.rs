use crate::config::ScryfallConfig;
use log::warn;
use std::collections::HashMap;

/// Construct the Authorization header for Scryfall.
///
/// Without a client secret the provider runs unauthenticated.
pub fn build_http_header(config: &ScryfallConfig) -> HashMap<String, String> {
    let mut headers = HashMap::new();
    headers.insert("Accept".to_string(), "application/json".to_string());

    match config.client_secret.as_deref() {
        Some(client_secret) if !client_secret.trim().is_empty() => {
            headers.insert(
                "Authorization".to_string(),
                format!("Bearer {}", client_secret.trim()),
            );
            headers.insert("Connection".to_string(), "Keep-Alive".to_string());
        }
        Some(_) => {
            warn!("Scryfall client_secret is empty. Defaulting to non-authorized mode");
        }
        None => {
            warn!("Scryfall keys values missing. Defaulting to non-authorized mode");
        }
    }

    headers
}
