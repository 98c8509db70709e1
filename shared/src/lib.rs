//! Shared types for the TribeNet client
//!
//! Wire DTOs and domain models for the club-membership REST contract.
//! The server owns every entity here; the client only mirrors them.

pub mod client;
pub mod error;
pub mod models;
pub mod response;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use client::{LoginRequest, LoginResponse, RegisterRequest, UserInfo, UserRole};
pub use error::ValidationError;
pub use models::{
    Club, ClubDraft, ClubPayload, ClubRole, DEFAULT_CURRENCY, Fee, Member, Membership,
    OrderRequest, OrderResponse, PaymentConfirmation, PaymentRecord, PaymentVerification,
};
pub use response::{ApiErrorBody, MessageResponse};
