//! Client error types

use shared::ValidationError;
use thiserror::Error;

/// Client error type
///
/// Every failure that crosses a component boundary ends up here and is
/// surfaced to the user through [`ClientError::user_message`].
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP 401 on an authenticated call; the session has been torn down
    #[error("Unauthorized")]
    Unauthorized,

    /// Login rejected by the server
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    /// Non-2xx response carrying a (possibly generic) message
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Transport-level failure, no response received
    #[error("Network error: {0}")]
    Network(String),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// No session; log in first
    #[error("Not authenticated")]
    NotAuthenticated,

    /// The cached role does not allow this action
    #[error("Action not permitted: {0}")]
    NotPermitted(String),

    /// The same action is already running
    #[error("Action already in progress: {0}")]
    ActionInFlight(String),

    /// Payload rejected before sending
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The checkout widget reported a failed charge
    #[error("Payment failed: {0}")]
    PaymentFailed(String),

    /// The server rejected the signed payment confirmation
    #[error("Payment verification failed: {0}")]
    PaymentVerificationFailed(String),

    /// Persistent key-value storage failed
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::InvalidResponse(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        Self::Storage(err.to_string())
    }
}

impl ClientError {
    /// Whether this error ended the session
    pub fn is_auth_expired(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }

    /// The single message shown to the user for this failure.
    pub fn user_message(&self) -> String {
        match self {
            Self::Unauthorized => "Session expired. Please login again.".to_string(),
            Self::InvalidCredentials(msg) => msg.clone(),
            Self::Api { message, .. } => message.clone(),
            Self::Network(_) => "Request failed. Please check your connection.".to_string(),
            Self::InvalidResponse(_) | Self::Serialization(_) => {
                "Unexpected response from server".to_string()
            }
            Self::NotAuthenticated => "Please login first".to_string(),
            Self::NotPermitted(msg) => msg.clone(),
            Self::ActionInFlight(_) => "Please wait for the current request to finish".to_string(),
            Self::Validation(err) => err.to_string(),
            Self::PaymentFailed(reason) => format!("Payment failed: {reason}"),
            Self::PaymentVerificationFailed(msg) => msg.clone(),
            Self::Storage(_) => "Could not save session data".to_string(),
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
