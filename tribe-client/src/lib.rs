//! Tribe Client - club membership client for the TribeNet API
//!
//! Session handling, role-aware club actions, paid-join checkout and a
//! cached view of clubs and memberships over the REST API.

pub mod actions;
pub mod api;
pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod gateway;
pub mod http;
pub mod payment;
pub mod session;
pub mod storage;
pub mod view;

pub use actions::{ActionOutcome, AutoConfirm, ClubAction, Confirm, MemberAction};
pub use cache::ClubCache;
pub use client::{ClubDetails, DirectoryEntry, TribeClient};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use gateway::ApiGateway;
pub use http::{ApiRequest, HttpTransport, NetworkTransport, RawResponse};
pub use payment::{Checkout, CheckoutOutcome, CheckoutRequest};
pub use session::Session;
pub use storage::{FileStore, KeyValueStore, MemoryStore};

// Re-export shared types for convenience
pub use shared::{
    Club, ClubDraft, ClubRole, Fee, Member, Membership, PaymentConfirmation, PaymentRecord,
    RegisterRequest, UserInfo, UserRole,
};
