//! Client-side validation errors for outgoing payloads

use thiserror::Error;

/// Rejection of a payload before it is sent
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(&'static str),

    #[error("A paid club must have a price greater than zero")]
    NonPositivePrice,
}
