//! API Response types
//!
//! The server answers mutations with a small `{"message": ...}` body and
//! reports failures with either `message` or `error`.

use serde::{Deserialize, Serialize};

/// Message used when an error body carries no usable text.
pub const GENERIC_ERROR_MESSAGE: &str = "Request failed";

/// Acknowledgement body returned by most mutating endpoints
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}

/// Error body of a non-2xx response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ApiErrorBody {
    /// Human-readable text, preferring `message` over `error`.
    pub fn text(&self) -> Option<&str> {
        self.message
            .as_deref()
            .filter(|m| !m.is_empty())
            .or_else(|| self.error.as_deref().filter(|e| !e.is_empty()))
    }

    /// Readable text of a raw body, if it is a JSON error body with one.
    pub fn text_from(raw: &str) -> Option<String> {
        serde_json::from_str::<ApiErrorBody>(raw)
            .ok()
            .and_then(|body| body.text().map(str::to_string))
    }

    /// Readable text of a raw body, or the generic fallback.
    pub fn message_from(raw: &str) -> String {
        Self::text_from(raw).unwrap_or_else(|| GENERIC_ERROR_MESSAGE.to_string())
    }
}
