//! HTTP utilities for Snipe-IT REST API calls

use super::error::{SnipeError, SnipeResult};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Client, RequestBuilder};
use serde_json::Value;
use std::time::Duration;

/// Maximum length of response body to log (to avoid logging sensitive data)
pub const MAX_LOG_BODY_LENGTH: usize = 200;

/// Sanitize response body for logging
/// Truncates to at most `MAX_LOG_BODY_LENGTH` bytes and strips control characters
pub fn sanitize_for_log(body: &str) -> String {
    let truncated = if body.len() > MAX_LOG_BODY_LENGTH {
        let mut cut = MAX_LOG_BODY_LENGTH;
        while !body.is_char_boundary(cut) {
            cut -= 1;
        }
        format!("{}... [truncated, {} bytes total]", &body[..cut], body.len())
    } else {
        body.to_string()
    };

    truncated.replace(|c: char| c.is_control(), "")
}

/// HTTP client wrapper for Snipe-IT API calls
#[derive(Clone)]
pub struct SnipeHttpClient {
    client: Client,
}

impl SnipeHttpClient {
    /// Create a new HTTP client
    pub fn new(timeout: Duration) -> SnipeResult<Self> {
        let mut headers = HeaderMap::new();
        // Without this Snipe-IT answers auth failures with an HTML redirect
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .user_agent(concat!("snipeit-inventory/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self { client })
    }

    /// Make a GET request with query parameters
    pub async fn get(&self, url: &str, token: &str, query: &[(&str, &str)]) -> SnipeResult<Value> {
        tracing::debug!("GET {} {:?}", url, query);
        let request = self.client.get(url).bearer_auth(token).query(query);
        self.send(request).await
    }

    /// Make a POST request with a JSON body
    pub async fn post(&self, url: &str, token: &str, body: &Value) -> SnipeResult<Value> {
        tracing::debug!("POST {}", url);
        let request = self.client.post(url).bearer_auth(token).json(body);
        self.send(request).await
    }

    /// Make a PATCH request with a JSON body
    pub async fn patch(&self, url: &str, token: &str, body: &Value) -> SnipeResult<Value> {
        tracing::debug!("PATCH {}", url);
        let request = self.client.patch(url).bearer_auth(token).json(body);
        self.send(request).await
    }

    /// Make a DELETE request
    pub async fn delete(&self, url: &str, token: &str) -> SnipeResult<Value> {
        tracing::debug!("DELETE {}", url);
        let request = self.client.delete(url).bearer_auth(token);
        self.send(request).await
    }

    /// Send a request and hand back the JSON body.
    ///
    /// Snipe-IT reports failures inside the `{status, messages}` envelope,
    /// with either 200 or a 4xx status, so an envelope is returned as-is
    /// whatever the status. Callers decide what an error envelope means.
    async fn send(&self, request: RequestBuilder) -> SnipeResult<Value> {
        let response = request.send().await?;

        let status = response.status();
        let body = response.text().await?;

        if body.trim().is_empty() {
            if status.is_success() {
                return Ok(Value::Null);
            }
            tracing::error!("API error: {} with empty body", status);
            return Err(SnipeError::Http {
                status,
                body: String::new(),
            });
        }

        match serde_json::from_str::<Value>(&body) {
            Ok(value) if status.is_success() || value.get("status").is_some() => Ok(value),
            Ok(_) | Err(_) if !status.is_success() => {
                // Security: Only log sanitized/truncated error body to avoid leaking sensitive data
                tracing::error!("API error: {} - {}", status, sanitize_for_log(&body));
                Err(SnipeError::Http {
                    status,
                    body: sanitize_for_log(&body),
                })
            }
            _ => Err(SnipeError::InvalidResponse(sanitize_for_log(&body))),
        }
    }
}
