//! Error types for the work-order API client.
//!
//! # Design
//! Every non-2xx response lands in a single `Request` variant carrying the
//! status code and reason phrase. Not-found is not a separate variant;
//! `ApiError::is_not_found` inspects the carried status instead. The raw
//! response body is kept for debugging but never parsed.

use thiserror::Error;

/// Errors returned by `WorkOrderClient` parse methods and `ApiClient` calls.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with a status outside 200..=299.
    #[error("API request failed: {status} {status_text}")]
    Request {
        status: u16,
        status_text: String,
        body: String,
    },

    /// The request never produced a response (connection refused, DNS, ...).
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(#[source] serde_json::Error),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(#[source] serde_json::Error),
}

impl ApiError {
    /// Build a `Request` error, deriving the status text from the code.
    pub fn request(status: u16, body: impl Into<String>) -> Self {
        let status_text = ::http::StatusCode::from_u16(status)
            .ok()
            .and_then(|code| code.canonical_reason())
            .unwrap_or("")
            .to_string();
        ApiError::Request {
            status,
            status_text,
            body: body.into(),
        }
    }

    /// HTTP status carried by a `Request` error.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Request { status, .. } => Some(*status),
            ApiError::Transport(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
