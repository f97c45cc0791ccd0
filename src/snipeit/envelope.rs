//! Snipe-IT wire types
//!
//! Every mutating endpoint answers with `{status, messages, payload}`, list
//! endpoints with `{total, rows}`. Record names come back HTML-escaped.

use super::error::{SnipeError, SnipeResult};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `{total, rows}` list envelope
#[derive(Debug, Clone, Deserialize)]
pub struct ListEnvelope<T> {
    pub total: u64,
    #[serde(default = "Vec::new")]
    pub rows: Vec<T>,
}

/// `{status, messages, payload}` envelope returned by mutations and errors
#[derive(Debug, Clone, Deserialize)]
pub struct StatusEnvelope {
    pub status: String,
    #[serde(default)]
    pub messages: Value,
    #[serde(default)]
    pub payload: Value,
}

impl StatusEnvelope {
    pub fn is_error(&self) -> bool {
        self.status == "error"
    }

    /// Messages as text: strings verbatim, validation maps as compact JSON
    pub fn message_text(&self) -> String {
        render_messages(&self.messages)
    }

    /// Internal id of the record a mutation touched, when the service echoes it
    pub fn payload_id(&self) -> Option<u64> {
        self.payload.get("id").and_then(|v| v.as_u64())
    }
}

/// `{id, name}` reference embedded in records
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NamedRef {
    pub id: u64,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Category {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub category_type: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Model {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub category: Option<NamedRef>,
    #[serde(default)]
    pub manufacturer: Option<NamedRef>,
}

impl Model {
    pub fn category_id(&self) -> Option<u64> {
        self.category.as_ref().map(|c| c.id)
    }

    pub fn manufacturer_id(&self) -> Option<u64> {
        self.manufacturer.as_ref().map(|m| m.id)
    }
}

/// A hardware entry
#[derive(Debug, Clone, Deserialize)]
pub struct Asset {
    pub id: u64,
    pub asset_tag: String,
    #[serde(default)]
    pub model: Option<NamedRef>,
    #[serde(default)]
    pub status_label: Option<NamedRef>,
}

impl Asset {
    pub fn model_id(&self) -> Option<u64> {
        self.model.as_ref().map(|m| m.id)
    }

    pub fn status_id(&self) -> Option<u64> {
        self.status_label.as_ref().map(|s| s.id)
    }
}

pub fn render_messages(messages: &Value) -> String {
    match messages {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Fail with the service's own message when `value` is an error envelope
pub fn check_status(action: &str, value: Value) -> SnipeResult<Value> {
    if value.get("status").and_then(|s| s.as_str()) == Some("error") {
        let message = render_messages(value.get("messages").unwrap_or(&Value::Null));
        return Err(SnipeError::api(action, message));
    }
    Ok(value)
}

/// Deserialize a response body, reporting shape mismatches as `InvalidResponse`
pub fn parse<T: DeserializeOwned>(what: &str, value: Value) -> SnipeResult<T> {
    serde_json::from_value(value)
        .map_err(|e| SnipeError::InvalidResponse(format!("{}: {}", what, e)))
}

/// Serialize a request body
pub fn to_body<T: Serialize>(what: &str, payload: &T) -> SnipeResult<Value> {
    serde_json::to_value(payload)
        .map_err(|e| SnipeError::InvalidArgument(format!("{}: {}", what, e)))
}

/// Names are unique case-insensitively on the service side
pub fn names_match(returned: &str, wanted: &str) -> bool {
    decode_entities(returned).to_lowercase() == wanted.to_lowercase()
}

/// Undo the HTML escaping Snipe-IT applies to names
pub fn decode_entities(s: &str) -> String {
    if !s.contains('&') {
        return s.to_string();
    }
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#039;", "'")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}
