//! Snipe-IT error kinds
//!
//! Absence of a record is never an error here: lookups return `Option`.
//! Everything in this enum aborts the reconciliation that hit it.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors raised while talking to the Snipe-IT API
#[derive(Debug, Error)]
pub enum SnipeError {
    /// The service answered with `status: error`; `message` is its own text
    #[error("Error {action}: {message}")]
    Api { action: String, message: String },

    /// Non-success status with a body that is not the JSON envelope
    #[error("Snipe-IT returned HTTP {status}: {body}")]
    Http { status: StatusCode, body: String },

    #[error("Failed to reach Snipe-IT: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Unknown response from Snipe-IT: {0}")]
    InvalidResponse(String),

    #[error("Invalid Snipe-IT URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// A record the desired state refers to does not exist
    #[error("{0}")]
    MissingDependency(String),

    #[error("{0}")]
    InvalidArgument(String),
}

impl SnipeError {
    pub fn api(action: &str, message: impl Into<String>) -> Self {
        Self::Api {
            action: action.to_string(),
            message: message.into(),
        }
    }

    /// True when the service itself rejected the request
    pub fn is_api_error(&self) -> bool {
        matches!(self, Self::Api { .. })
    }
}

pub type SnipeResult<T> = Result<T, SnipeError>;
