//! Role-gated action resolution
//!
//! Maps (club, cached membership) to the actions the current user may
//! take, plus the per-action in-flight guard and confirmation seam used
//! by the mutation pipeline.

use async_trait::async_trait;
use dashmap::DashSet;
use shared::{Club, ClubRole, Fee, Member, Membership, UserInfo};

use crate::{ClientError, ClientResult};

// ============================================================================
// Resolution
// ============================================================================

/// Action on a club
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClubAction {
    /// Join, paying `Fee::Paid` through checkout first
    Join(Fee),
    Edit,
    Delete,
    Leave,
}

/// Action a club admin may take on a roster entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberAction {
    Promote,
    Remove,
}

/// Visible actions for `club` given the cached membership.
///
/// - no membership: join
/// - club admin: edit and delete
/// - member: leave
pub fn resolve_club_actions(club: &Club, membership: Option<&Membership>) -> Vec<ClubAction> {
    match membership.map(|m| m.club_role) {
        None => vec![ClubAction::Join(club.fee())],
        Some(ClubRole::Admin) => vec![ClubAction::Edit, ClubAction::Delete],
        Some(ClubRole::Member) => vec![ClubAction::Leave],
    }
}

/// Whether a viewer may act on another roster entry at all: only club
/// admins, and never on their own entry.
pub fn can_manage_member(
    viewer_id: i64,
    viewer_membership: Option<&Membership>,
    target_id: i64,
) -> bool {
    viewer_membership.is_some_and(Membership::is_admin) && target_id != viewer_id
}

/// Roster actions for `member` as seen by `viewer_id`.
///
/// Admins can be removed but not promoted again.
pub fn resolve_member_actions(
    viewer_id: i64,
    viewer_membership: Option<&Membership>,
    member: &Member,
) -> Vec<MemberAction> {
    if !can_manage_member(viewer_id, viewer_membership, member.user_id) {
        return Vec::new();
    }
    if member.is_admin() {
        vec![MemberAction::Remove]
    } else {
        vec![MemberAction::Promote, MemberAction::Remove]
    }
}

/// Whether a platform admin may delete `target` (never themselves)
pub fn can_delete_user(viewer: &UserInfo, target_id: i64) -> bool {
    viewer.role.is_admin() && viewer.id != target_id
}

// ============================================================================
// Outcomes
// ============================================================================

/// Terminal state of a user-triggered action that did not fail
#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutcome<T = ()> {
    Completed(T),
    /// The user declined the confirmation; nothing was sent
    Declined,
    /// The user closed the checkout; no membership was created
    PaymentCancelled,
}

impl<T> ActionOutcome<T> {
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed(_))
    }

    pub fn completed(self) -> Option<T> {
        match self {
            Self::Completed(value) => Some(value),
            _ => None,
        }
    }
}

/// Confirmation step in front of destructive actions
#[async_trait]
pub trait Confirm: Send + Sync {
    async fn confirm(&self, prompt: &str) -> bool;
}

/// Fixed answer, for scripted use and tests
#[derive(Debug, Clone, Copy)]
pub struct AutoConfirm(pub bool);

#[async_trait]
impl Confirm for AutoConfirm {
    async fn confirm(&self, _prompt: &str) -> bool {
        self.0
    }
}

// ============================================================================
// In-flight guard
// ============================================================================

/// Mutating action kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    CreateClub,
    EditClub,
    DeleteClub,
    Join,
    Leave,
    Promote,
    Remove,
    AdminDeleteUser,
    AdminDeleteClub,
}

impl ActionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CreateClub => "create club",
            Self::EditClub => "edit club",
            Self::DeleteClub => "delete club",
            Self::Join => "join club",
            Self::Leave => "leave club",
            Self::Promote => "promote member",
            Self::Remove => "remove member",
            Self::AdminDeleteUser => "delete user",
            Self::AdminDeleteClub => "delete club (admin)",
        }
    }
}

/// Identity of one in-flight action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActionKey {
    pub kind: ActionKind,
    pub club_id: Option<i64>,
    pub user_id: Option<i64>,
}

impl ActionKey {
    pub fn new(kind: ActionKind) -> Self {
        Self {
            kind,
            club_id: None,
            user_id: None,
        }
    }

    pub fn club(kind: ActionKind, club_id: i64) -> Self {
        Self {
            club_id: Some(club_id),
            ..Self::new(kind)
        }
    }

    pub fn member(kind: ActionKind, club_id: i64, user_id: i64) -> Self {
        Self {
            club_id: Some(club_id),
            user_id: Some(user_id),
            ..Self::new(kind)
        }
    }

    pub fn user(kind: ActionKind, user_id: i64) -> Self {
        Self {
            user_id: Some(user_id),
            ..Self::new(kind)
        }
    }
}

/// Set of actions currently running
#[derive(Debug, Default)]
pub struct InFlight {
    keys: DashSet<ActionKey>,
}

impl InFlight {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `key` as running until the returned guard drops.
    pub fn begin(&self, key: ActionKey) -> ClientResult<InFlightGuard<'_>> {
        if !self.keys.insert(key) {
            tracing::debug!(action = key.kind.as_str(), club_id = ?key.club_id, "Action already in flight");
            return Err(ClientError::ActionInFlight(key.kind.as_str().to_string()));
        }
        Ok(InFlightGuard { set: self, key })
    }

    pub fn is_running(&self, key: &ActionKey) -> bool {
        self.keys.contains(key)
    }
}

/// Releases its key on drop
#[derive(Debug)]
pub struct InFlightGuard<'a> {
    set: &'a InFlight,
    key: ActionKey,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.set.keys.remove(&self.key);
    }
}
