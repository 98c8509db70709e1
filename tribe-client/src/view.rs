//! View projections
//!
//! Pure functions from cache state to display fragments. Nothing here
//! talks to the network or mutates state.

use shared::{Club, ClubRole, Fee, Member, UserInfo};

use crate::ClientError;
use crate::actions::{ActionOutcome, MemberAction};
use crate::cache::ClubCache;
use crate::client::{ClubDetails, DirectoryEntry};

/// Clubs shown on the dashboard
pub const RECENT_CLUBS: usize = 6;

/// "Free" or the rupee amount
pub fn fee_label(fee: Fee) -> String {
    match fee {
        Fee::Free => "Free".to_string(),
        Fee::Paid(price) => format!("₹{}", price.normalize()),
    }
}

/// Label of the join button
pub fn join_label(fee: Fee) -> String {
    format!("Join Club ({})", fee_label(fee))
}

/// Uppercase first letter of a name, `U` when empty
pub fn initial(name: &str) -> char {
    name.chars()
        .next()
        .map(|c| c.to_uppercase().next().unwrap_or(c))
        .unwrap_or('U')
}

// ============================================================================
// Club cards
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ClubCard {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub fee_label: String,
    pub member_count: u32,
    /// Role badge, only on "my clubs" lists
    pub badge: Option<ClubRole>,
}

impl ClubCard {
    pub fn new(club: &Club, show_role: bool) -> Self {
        Self {
            id: club.id,
            name: club.name.clone(),
            description: club.description.clone(),
            fee_label: fee_label(club.fee()),
            member_count: club.member_count,
            badge: if show_role { club.club_role } else { None },
        }
    }
}

pub fn club_cards<'a>(clubs: impl IntoIterator<Item = &'a Club>, show_role: bool) -> Vec<ClubCard> {
    clubs
        .into_iter()
        .map(|club| ClubCard::new(club, show_role))
        .collect()
}

/// Clubs matching `term` by name, description or category
pub fn filter_clubs<'a>(clubs: &'a [Club], term: &str) -> Vec<&'a Club> {
    let term = term.trim();
    clubs
        .iter()
        .filter(|club| term.is_empty() || club.matches(term))
        .collect()
}

/// Users matching `term` by name, username or email
pub fn filter_users<'a>(users: &'a [UserInfo], term: &str) -> Vec<&'a UserInfo> {
    let term = term.trim().to_lowercase();
    users
        .iter()
        .filter(|user| {
            term.is_empty()
                || user.username.to_lowercase().contains(&term)
                || user
                    .name
                    .as_deref()
                    .is_some_and(|n| n.to_lowercase().contains(&term))
                || user
                    .email
                    .as_deref()
                    .is_some_and(|e| e.to_lowercase().contains(&term))
        })
        .collect()
}

// ============================================================================
// Dashboard
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardStats {
    pub total_clubs: usize,
    pub my_clubs: usize,
    pub admin_clubs: usize,
    pub recent: Vec<ClubCard>,
}

impl DashboardStats {
    pub fn from_cache(cache: &ClubCache) -> Self {
        Self {
            total_clubs: cache.all_clubs().len(),
            my_clubs: cache.my_clubs().len(),
            admin_clubs: cache.admin_club_count(),
            recent: club_cards(cache.all_clubs().iter().take(RECENT_CLUBS), false),
        }
    }
}

// ============================================================================
// Rosters and directory
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct MemberRow {
    pub user_id: i64,
    pub name: String,
    pub initial: char,
    pub role: ClubRole,
    pub actions: Vec<MemberAction>,
}

impl MemberRow {
    pub fn new(member: &Member, actions: Vec<MemberAction>) -> Self {
        let name = member.display_name().to_string();
        Self {
            user_id: member.user_id,
            initial: initial(&name),
            name,
            role: member.club_role,
            actions,
        }
    }
}

/// Roster rows of a details view, with the viewer's permitted actions
pub fn member_rows(details: &ClubDetails) -> Vec<MemberRow> {
    details
        .members
        .iter()
        .map(|member| MemberRow::new(member, details.member_actions(member)))
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserRow {
    pub user_id: i64,
    pub name: String,
    pub username: String,
    pub initial: char,
    /// (club name, role) pairs
    pub clubs: Vec<(String, ClubRole)>,
}

pub fn user_rows(entries: &[DirectoryEntry]) -> Vec<UserRow> {
    entries
        .iter()
        .map(|entry| UserRow {
            user_id: entry.user.id,
            name: entry.user.display_name().to_string(),
            username: entry.user.username.clone(),
            initial: initial(&entry.user.username),
            clubs: entry
                .clubs
                .iter()
                .map(|m| (m.club.name.clone(), m.club_role))
                .collect(),
        })
        .collect()
}

// ============================================================================
// Notices
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Info,
    Error,
}

/// Transient user notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    pub fn from_error(err: &ClientError) -> Self {
        Self::error(err.user_message())
    }

    /// Notice for an action outcome; `success` is shown on completion.
    pub fn from_outcome<T>(outcome: &ActionOutcome<T>, success: &str) -> Option<Self> {
        match outcome {
            ActionOutcome::Completed(_) => Some(Self::success(success)),
            ActionOutcome::PaymentCancelled => Some(Self::info("Payment cancelled")),
            ActionOutcome::Declined => None,
        }
    }
}
