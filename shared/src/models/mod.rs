//! Data models
//!
//! Server-owned entities as the client sees them.
//! All IDs are `i64` (server-side `BIGINT` identity columns).

pub mod club;
pub mod member;
pub mod payment;

// Re-exports
pub use club::*;
pub use member::*;
pub use payment::*;
