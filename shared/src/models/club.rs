//! Club Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A user's role inside one specific club
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClubRole {
    #[default]
    Member,
    Admin,
}

impl ClubRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Member => "MEMBER",
            Self::Admin => "ADMIN",
        }
    }
}

impl std::fmt::Display for ClubRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fee policy of a club
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fee {
    Free,
    Paid(Decimal),
}

/// Club entity
///
/// `club_role` is only present on entries of a user's club list
/// (`GET /users/{id}/clubs`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Club {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub free: bool,
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub member_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub club_role: Option<ClubRole>,
}

impl Club {
    /// Fee policy derived from the price; a missing or zero price is free.
    pub fn fee(&self) -> Fee {
        match self.price {
            Some(price) if price > Decimal::ZERO => Fee::Paid(price),
            _ => Fee::Free,
        }
    }

    /// Case-insensitive match on name, description or category.
    pub fn matches(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.name.to_lowercase().contains(&term)
            || self.description.to_lowercase().contains(&term)
            || self
                .category
                .as_deref()
                .is_some_and(|c| c.to_lowercase().contains(&term))
    }
}

/// Create/update club input, validated before it becomes a payload
#[derive(Debug, Clone, PartialEq)]
pub struct ClubDraft {
    pub name: String,
    pub description: String,
    pub category: String,
    pub fee: Fee,
}

/// Wire body of `POST /clubs` and `PUT /clubs/{id}`
#[derive(Debug, Clone, Serialize)]
pub struct ClubPayload {
    pub name: String,
    pub description: String,
    pub category: String,
    pub free: bool,
    pub price: Decimal,
}

impl ClubDraft {
    /// Prefill a draft from an existing club (edit form).
    pub fn from_club(club: &Club) -> Self {
        Self {
            name: club.name.clone(),
            description: club.description.clone(),
            category: club.category.clone().unwrap_or_default(),
            fee: club.fee(),
        }
    }

    /// Validate and convert into the wire payload.
    ///
    /// `free` and `price` always agree: free clubs send price 0, paid
    /// clubs send a positive price.
    pub fn payload(&self) -> Result<ClubPayload, ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::Required("Club name"));
        }
        if self.description.trim().is_empty() {
            return Err(ValidationError::Required("Description"));
        }
        if self.category.trim().is_empty() {
            return Err(ValidationError::Required("Category"));
        }
        let (free, price) = match self.fee {
            Fee::Free => (true, Decimal::ZERO),
            Fee::Paid(price) if price > Decimal::ZERO => (false, price),
            Fee::Paid(_) => return Err(ValidationError::NonPositivePrice),
        };
        Ok(ClubPayload {
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            category: self.category.trim().to_string(),
            free,
            price,
        })
    }
}

/// A cached "my clubs" entry: the club plus the current user's role in it
#[derive(Debug, Clone, PartialEq)]
pub struct Membership {
    pub club_id: i64,
    pub club_role: ClubRole,
    pub club: Club,
}

impl Membership {
    pub fn is_admin(&self) -> bool {
        self.club_role == ClubRole::Admin
    }
}

impl From<Club> for Membership {
    fn from(club: Club) -> Self {
        Self {
            club_id: club.id,
            club_role: club.club_role.unwrap_or_default(),
            club,
        }
    }
}
