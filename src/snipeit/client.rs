//! Snipe-IT Client
//!
//! Main client for interacting with the Snipe-IT API, combining the base
//! URL, the API key and the HTTP transport.

use super::error::{SnipeError, SnipeResult};
use super::http::SnipeHttpClient;
use serde_json::Value;
use std::fmt;
use std::time::Duration;
use url::Url;

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Main Snipe-IT client
#[derive(Clone)]
pub struct SnipeClient {
    pub http: SnipeHttpClient,
    base_url: String,
    api_key: String,
}

impl fmt::Debug for SnipeClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnipeClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl SnipeClient {
    /// Create a new Snipe-IT client
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> SnipeResult<Self> {
        let base_url = normalize_base_url(base_url)?;
        let http = SnipeHttpClient::new(timeout)?;

        Ok(Self {
            http,
            base_url,
            api_key: api_key.to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build an API v1 URL
    pub fn api_url(&self, path: &str) -> String {
        format!("{}/api/v1/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Build an item URL (`{collection}/{id}`)
    pub fn item_url(&self, collection: &str, id: u64) -> String {
        self.api_url(&format!("{}/{}", collection, id))
    }

    pub async fn get(&self, url: &str, query: &[(&str, &str)]) -> SnipeResult<Value> {
        self.http.get(url, &self.api_key, query).await
    }

    pub async fn post(&self, url: &str, body: &Value) -> SnipeResult<Value> {
        self.http.post(url, &self.api_key, body).await
    }

    pub async fn patch(&self, url: &str, body: &Value) -> SnipeResult<Value> {
        self.http.patch(url, &self.api_key, body).await
    }

    pub async fn delete(&self, url: &str) -> SnipeResult<Value> {
        self.http.delete(url, &self.api_key).await
    }
}

/// Validate a base URL and strip trailing slashes
pub fn normalize_base_url(raw: &str) -> SnipeResult<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    let parsed = Url::parse(trimmed).map_err(|e| SnipeError::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(SnipeError::InvalidUrl {
            url: raw.to_string(),
            reason: format!("unsupported scheme '{}'", parsed.scheme()),
        });
    }

    Ok(trimmed.to_string())
}
