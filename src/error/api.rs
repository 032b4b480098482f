//! Errors returned by the tutor API client.

use thiserror::Error;

use super::ErrorCategory;
use crate::traits::HttpError;

/// Failure of an `/ask/` or `/feedback/` call.
///
/// Cloneable so it can travel through the app message channel.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// The request never produced a response.
    #[error(transparent)]
    Transport(#[from] HttpError),

    /// The backend responded with a non-2xx status.
    #[error(
        "Request failed with status code {status}{}",
        .detail.as_deref().map(|d| format!(": {}", d)).unwrap_or_default()
    )]
    Server { status: u16, detail: Option<String> },

    /// The backend responded 2xx but the body did not match the expected shape.
    #[error("Invalid response from server: {0}")]
    InvalidResponse(String),
}

impl ApiError {
    /// Build a server error from a raw response body, pulling out FastAPI's
    /// `{"detail": "..."}` when it is a string.
    pub fn from_status(status: u16, body: &[u8]) -> Self {
        let detail = serde_json::from_slice::<serde_json::Value>(body)
            .ok()
            .and_then(|value| {
                value
                    .get("detail")
                    .and_then(|d| d.as_str())
                    .map(str::to_string)
            });
        ApiError::Server { status, detail }
    }

    /// Human-readable detail supplied by the server, if any.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Server { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            ApiError::Transport(_) => ErrorCategory::Network,
            ApiError::Server { .. } => ErrorCategory::Server,
            ApiError::InvalidResponse(_) => ErrorCategory::Protocol,
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::InvalidResponse(e.to_string())
    }
}
