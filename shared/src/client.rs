//! Auth and user types shared between server and client
//!
//! Request/response bodies of the `/auth` endpoints and the user
//! identity returned by the user directory.

use serde::{Deserialize, Serialize};

// =============================================================================
// Auth API DTOs
// =============================================================================

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login response data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserInfo,
}

/// Registration request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub name: String,
    pub password: String,
    #[serde(default)]
    pub role: UserRole,
}

// =============================================================================
// Users
// =============================================================================

/// Platform-wide role of a user.
///
/// The server may send either the bare role or its Spring authority form
/// (`ROLE_ADMIN`); both map to the same variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    #[default]
    #[serde(alias = "ROLE_USER")]
    User,
    #[serde(alias = "ROLE_ADMIN")]
    Admin,
}

impl UserRole {
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "USER",
            Self::Admin => "ADMIN",
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "USER" | "ROLE_USER" => Ok(Self::User),
            "ADMIN" | "ROLE_ADMIN" => Ok(Self::Admin),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

/// User information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub role: UserRole,
}

impl UserInfo {
    /// Name shown in headers and rosters; falls back to the username.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(&self.username)
    }
}
