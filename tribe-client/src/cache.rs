//! Club/membership cache
//!
//! In-memory mirror of "all clubs", "my clubs" and the user directory.
//! Every refresh replaces a whole collection; there is no incremental
//! merge. Lookups read the last refreshed snapshot.

use std::sync::Arc;

use shared::{Club, Membership, UserInfo};
use tokio::sync::RwLock;

use crate::ClientResult;
use crate::gateway::ApiGateway;

/// Snapshot of the cached collections
#[derive(Debug, Clone, Default)]
pub struct ClubCache {
    all_clubs: Vec<Club>,
    my_clubs: Vec<Membership>,
    users: Vec<UserInfo>,
}

impl ClubCache {
    pub fn all_clubs(&self) -> &[Club] {
        &self.all_clubs
    }

    pub fn my_clubs(&self) -> &[Membership] {
        &self.my_clubs
    }

    pub fn users(&self) -> &[UserInfo] {
        &self.users
    }

    /// Club by id, from the all-clubs list or, failing that, my clubs.
    pub fn find_club(&self, club_id: i64) -> Option<&Club> {
        self.all_clubs
            .iter()
            .find(|c| c.id == club_id)
            .or_else(|| self.find_membership(club_id).map(|m| &m.club))
    }

    /// The current user's membership of a club
    pub fn find_membership(&self, club_id: i64) -> Option<&Membership> {
        self.my_clubs.iter().find(|m| m.club_id == club_id)
    }

    /// Number of clubs the current user administers
    pub fn admin_club_count(&self) -> usize {
        self.my_clubs.iter().filter(|m| m.is_admin()).count()
    }

    pub fn replace_all_clubs(&mut self, clubs: Vec<Club>) {
        self.all_clubs = clubs;
    }

    pub fn replace_my_clubs(&mut self, clubs: Vec<Club>) {
        self.my_clubs = clubs.into_iter().map(Membership::from).collect();
    }

    pub fn replace_users(&mut self, users: Vec<UserInfo>) {
        self.users = users;
    }

    pub fn clear(&mut self) {
        self.all_clubs.clear();
        self.my_clubs.clear();
        self.users.clear();
    }
}

/// Cache owner with the refresh operations
pub struct ClubStore {
    gateway: Arc<ApiGateway>,
    snapshot: RwLock<ClubCache>,
}

impl ClubStore {
    pub fn new(gateway: Arc<ApiGateway>) -> Self {
        Self {
            gateway,
            snapshot: RwLock::new(ClubCache::default()),
        }
    }

    /// Replace the all-clubs collection from `GET /clubs`.
    pub async fn refresh_all_clubs(&self) -> ClientResult<Vec<Club>> {
        let clubs = self.gateway.list_clubs().await?;
        self.snapshot.write().await.replace_all_clubs(clubs.clone());
        tracing::debug!(count = clubs.len(), "All clubs refreshed");
        Ok(clubs)
    }

    /// Replace the my-clubs collection from `GET /users/{id}/clubs`.
    pub async fn refresh_my_clubs(&self, user_id: i64) -> ClientResult<Vec<Membership>> {
        let clubs = self.gateway.user_clubs(user_id).await?;
        let mut snapshot = self.snapshot.write().await;
        snapshot.replace_my_clubs(clubs);
        tracing::debug!(user_id, count = snapshot.my_clubs().len(), "My clubs refreshed");
        Ok(snapshot.my_clubs().to_vec())
    }

    /// Cascading refresh run after every mutation: all clubs, then my clubs.
    pub async fn refresh_all(&self, user_id: i64) -> ClientResult<()> {
        self.refresh_all_clubs().await?;
        self.refresh_my_clubs(user_id).await?;
        Ok(())
    }

    pub async fn replace_users(&self, users: Vec<UserInfo>) {
        self.snapshot.write().await.replace_users(users);
    }

    pub async fn find_club(&self, club_id: i64) -> Option<Club> {
        self.snapshot.read().await.find_club(club_id).cloned()
    }

    pub async fn find_membership(&self, club_id: i64) -> Option<Membership> {
        self.snapshot.read().await.find_membership(club_id).cloned()
    }

    /// Copy of the current snapshot
    pub async fn snapshot(&self) -> ClubCache {
        self.snapshot.read().await.clone()
    }

    pub async fn clear(&self) {
        self.snapshot.write().await.clear();
    }
}
