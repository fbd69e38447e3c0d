#![allow(dead_code)]
use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Shown when a failure carries no server-provided message.
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong. Please try again.";

/// Client-level error type.
/// Every hook returns `Result<T, ClientError>`; the view layer turns it into a toast.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Unauthorized")]
    Unauthorized,

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to decode response from {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Storage error: {0}")]
    Storage(#[from] crate::session::storage::StorageError),

    #[error("Invalid base URL: {0}")]
    Url(String),
}

/// The three failure classes the UI distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Handled globally by the gateway (logout + redirect).
    Unauthorized,
    /// The server rejected the request and said why.
    Rejected,
    /// Transport, decoding or anything else.
    Unknown,
}

impl ClientError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClientError::Unauthorized => ErrorKind::Unauthorized,
            ClientError::Api { .. } => ErrorKind::Rejected,
            _ => ErrorKind::Unknown,
        }
    }

    /// The user-visible toast text for this failure.
    /// `None` for authorization failures, which never produce a local toast.
    pub fn notice_message(&self) -> Option<String> {
        match self {
            ClientError::Unauthorized => None,
            ClientError::Api { message, .. } => Some(message.clone()),
            ClientError::Http(e) => {
                tracing::error!("Network error: {e}");
                Some(GENERIC_FAILURE_MESSAGE.to_string())
            }
            ClientError::Decode { path, source } => {
                tracing::error!("Unexpected response shape from {path}: {source}");
                Some(GENERIC_FAILURE_MESSAGE.to_string())
            }
            ClientError::Storage(e) => {
                tracing::error!("Storage error: {e}");
                Some(GENERIC_FAILURE_MESSAGE.to_string())
            }
            ClientError::Url(e) => {
                tracing::error!("Invalid URL: {e}");
                Some(GENERIC_FAILURE_MESSAGE.to_string())
            }
        }
    }
}

/// Error payload returned by the API: `{ "message": "..." }` or `{ "message": ["...", "..."] }`.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: ApiMessage,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ApiMessage {
    One(String),
    Many(Vec<String>),
}

/// Extracts the server message from an error response body.
/// Falls back to the raw body, then to the status reason phrase.
pub fn api_error_message(status: StatusCode, body: &str) -> String {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(ApiErrorBody {
            message: ApiMessage::One(message),
        }) => message,
        Ok(ApiErrorBody {
            message: ApiMessage::Many(messages),
        }) => messages.join("; "),
        Err(_) if !body.trim().is_empty() => body.trim().to_string(),
        Err(_) => status
            .canonical_reason()
            .unwrap_or("Request failed")
            .to_string(),
    }
}
