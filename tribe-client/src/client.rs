//! TribeClient - session, cache and mutation pipeline
//!
//! One object owns the session store, the gateway and the club cache.
//! Every mutating action follows the same pipeline:
//!
//! 1. check the cached role with the action resolver
//! 2. claim the per-action in-flight key
//! 3. ask for confirmation if the action is destructive
//! 4. commit through the gateway
//! 5. run the cascading refresh (all clubs, then my clubs)
//!
//! The client never flips a role locally; it re-fetches. A failed commit
//! leaves the cache untouched. Any `Unauthorized` also empties the cache.

use std::sync::Arc;

use futures::future::join_all;
use rust_decimal::Decimal;
use shared::response::GENERIC_ERROR_MESSAGE;
use shared::{
    Club, ClubDraft, Fee, Member, Membership, OrderRequest, PaymentRecord, PaymentVerification,
    RegisterRequest, UserInfo,
};

use crate::actions::{
    ActionKey, ActionKind, ActionOutcome, ClubAction, Confirm, InFlight, MemberAction,
    can_delete_user, can_manage_member, resolve_club_actions, resolve_member_actions,
};
use crate::cache::{ClubCache, ClubStore};
use crate::gateway::ApiGateway;
use crate::http::{HttpTransport, NetworkTransport};
use crate::payment::{Checkout, CheckoutOutcome, CheckoutRequest};
use crate::session::{Session, SessionStore};
use crate::storage::KeyValueStore;
use crate::view::DashboardStats;
use crate::{ClientConfig, ClientError, ClientResult};

/// A club with its roster, as shown in the details view
#[derive(Debug, Clone, PartialEq)]
pub struct ClubDetails {
    pub club: Club,
    pub members: Vec<Member>,
    /// The viewer's cached membership
    pub membership: Option<Membership>,
    pub viewer_id: i64,
}

impl ClubDetails {
    pub fn actions(&self) -> Vec<ClubAction> {
        resolve_club_actions(&self.club, self.membership.as_ref())
    }

    pub fn member_actions(&self, member: &Member) -> Vec<MemberAction> {
        resolve_member_actions(self.viewer_id, self.membership.as_ref(), member)
    }

    pub fn member(&self, user_id: i64) -> Option<&Member> {
        self.members.iter().find(|m| m.user_id == user_id)
    }
}

/// A user with their clubs, for the directory view
#[derive(Debug, Clone, PartialEq)]
pub struct DirectoryEntry {
    pub user: UserInfo,
    pub clubs: Vec<Membership>,
}

/// The club-membership client
pub struct TribeClient {
    config: ClientConfig,
    session: Arc<SessionStore>,
    gateway: Arc<ApiGateway>,
    clubs: ClubStore,
    in_flight: InFlight,
}

impl TribeClient {
    /// Create a client talking to the network
    pub fn new(config: ClientConfig, storage: Arc<dyn KeyValueStore>) -> ClientResult<Self> {
        let transport = Arc::new(NetworkTransport::new(&config)?);
        Ok(Self::with_transport(config, transport, storage))
    }

    /// Create a client over any transport
    pub fn with_transport(
        config: ClientConfig,
        transport: Arc<dyn HttpTransport>,
        storage: Arc<dyn KeyValueStore>,
    ) -> Self {
        let session = Arc::new(SessionStore::new(storage));
        let gateway = Arc::new(ApiGateway::new(transport, session.clone()));
        let clubs = ClubStore::new(gateway.clone());
        Self {
            config,
            session,
            gateway,
            clubs,
            in_flight: InFlight::new(),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn gateway(&self) -> &ApiGateway {
        &self.gateway
    }

    /// Copy of the cached collections
    pub async fn cache(&self) -> ClubCache {
        self.clubs.snapshot().await
    }

    /// Empty the cache when the session has been torn down
    async fn settle<T>(&self, result: ClientResult<T>) -> ClientResult<T> {
        if let Err(ClientError::Unauthorized) = &result {
            self.clubs.clear().await;
        }
        result
    }

    // ========== Session ==========

    /// Restore the persisted session at startup
    pub async fn restore_session(&self) -> Option<Session> {
        self.session.restore().await
    }

    pub async fn session(&self) -> Option<Session> {
        self.session.current().await
    }

    /// Log in and persist the session
    pub async fn login(&self, username: &str, password: &str) -> ClientResult<Session> {
        tracing::info!(username = %username, "Logging in");
        let response = self.gateway.login(username, password).await?;
        self.clubs.clear().await;
        self.session.establish(Session::from(response)).await
    }

    /// Register an account. Does not log in.
    pub async fn register(&self, request: &RegisterRequest) -> ClientResult<String> {
        tracing::info!(username = %request.username, role = %request.role, "Registering");
        let response = self.gateway.register(request).await?;
        Ok(response
            .message
            .unwrap_or_else(|| "Registration successful! Please login.".to_string()))
    }

    /// Clear session and cache. Idempotent.
    pub async fn logout(&self) -> ClientResult<()> {
        self.clubs.clear().await;
        self.session.logout().await
    }

    // ========== Reads ==========

    /// Cascading refresh of both club collections
    pub async fn refresh(&self) -> ClientResult<()> {
        let result = async {
            let session = self.session.require().await?;
            self.clubs.refresh_all(session.user_id()).await
        }
        .await;
        self.settle(result).await
    }

    /// Refresh both collections and project the dashboard counters
    pub async fn dashboard(&self) -> ClientResult<DashboardStats> {
        self.refresh().await?;
        Ok(DashboardStats::from_cache(&self.clubs.snapshot().await))
    }

    /// Refresh and return all clubs
    pub async fn load_clubs(&self) -> ClientResult<Vec<Club>> {
        let result = self.clubs.refresh_all_clubs().await;
        self.settle(result).await
    }

    /// Refresh and return the current user's memberships
    pub async fn load_my_clubs(&self) -> ClientResult<Vec<Membership>> {
        let result = async {
            let session = self.session.require().await?;
            self.clubs.refresh_my_clubs(session.user_id()).await
        }
        .await;
        self.settle(result).await
    }

    /// Clubs in the last snapshot matching `term`
    pub async fn search_clubs(&self, term: &str) -> Vec<Club> {
        let snapshot = self.clubs.snapshot().await;
        crate::view::filter_clubs(snapshot.all_clubs(), term)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Actions the cached membership allows on a club
    pub async fn club_actions(&self, club_id: i64) -> ClientResult<Vec<ClubAction>> {
        let club = self.club(club_id).await?;
        let membership = self.clubs.find_membership(club_id).await;
        Ok(resolve_club_actions(&club, membership.as_ref()))
    }

    /// Fetch a club and its roster (not cached)
    pub async fn club_details(&self, club_id: i64) -> ClientResult<ClubDetails> {
        let result = async {
            let session = self.session.require().await?;
            self.load_details(club_id, &session).await
        }
        .await;
        self.settle(result).await
    }

    async fn load_details(&self, club_id: i64, session: &Session) -> ClientResult<ClubDetails> {
        let club = self.gateway.get_club(club_id).await?;
        let members = self.gateway.club_members(club_id).await?;
        Ok(ClubDetails {
            club,
            members,
            membership: self.clubs.find_membership(club_id).await,
            viewer_id: session.user_id(),
        })
    }

    /// Cached club, else `GET /clubs/{id}`
    pub async fn club(&self, club_id: i64) -> ClientResult<Club> {
        match self.clubs.find_club(club_id).await {
            Some(club) => Ok(club),
            None => {
                let result = self.gateway.get_club(club_id).await;
                self.settle(result).await
            }
        }
    }

    /// All other users with their clubs.
    ///
    /// Per-user club lists are fetched concurrently; a failed fetch
    /// degrades that user to an empty list.
    pub async fn user_directory(&self) -> ClientResult<Vec<DirectoryEntry>> {
        let result = async {
            self.session.require().await?;
            let users = self.gateway.list_users().await?;
            self.clubs.replace_users(users.clone()).await;

            let fetches = users.into_iter().map(|user| async move {
                let clubs = match self.gateway.user_clubs(user.id).await {
                    Ok(clubs) => clubs.into_iter().map(Membership::from).collect(),
                    Err(e) => {
                        tracing::warn!(user_id = user.id, error = %e, "Club list unavailable, showing none");
                        Vec::new()
                    }
                };
                DirectoryEntry { user, clubs }
            });
            let entries = join_all(fetches).await;

            // a 401 inside the batch has already ended the session
            if !self.session.is_authenticated().await {
                return Err(ClientError::Unauthorized);
            }
            Ok::<_, ClientError>(entries)
        }
        .await;
        self.settle(result).await
    }

    /// Users in the last directory snapshot matching `term`
    pub async fn search_users(&self, term: &str) -> Vec<UserInfo> {
        let snapshot = self.clubs.snapshot().await;
        crate::view::filter_users(snapshot.users(), term)
            .into_iter()
            .cloned()
            .collect()
    }

    pub async fn payments_for_user(&self, user_id: i64) -> ClientResult<Vec<PaymentRecord>> {
        let result = self.gateway.payments_for_user(user_id).await;
        self.settle(result).await
    }

    pub async fn payment(&self, payment_id: i64) -> ClientResult<PaymentRecord> {
        let result = self.gateway.payment(payment_id).await;
        self.settle(result).await
    }

    // ========== Club mutations ==========

    /// Create a club; the creator becomes its admin server-side
    pub async fn create_club(&self, draft: &ClubDraft) -> ClientResult<Club> {
        let result = async {
            let session = self.session.require().await?;
            let payload = draft.payload()?;
            let _guard = self.in_flight.begin(ActionKey::new(ActionKind::CreateClub))?;

            let club = self.gateway.create_club(&payload).await?;
            tracing::info!(club_id = club.id, name = %club.name, "Club created");

            self.clubs.refresh_all(session.user_id()).await?;
            Ok::<_, ClientError>(club)
        }
        .await;
        self.settle(result).await
    }

    /// Update a club the current user administers
    pub async fn edit_club(&self, club_id: i64, draft: &ClubDraft) -> ClientResult<Club> {
        let result = async {
            let session = self.session.require().await?;
            self.ensure_permitted(club_id, ClubAction::Edit, "Only club admins can edit a club")
                .await?;
            let payload = draft.payload()?;
            let _guard = self
                .in_flight
                .begin(ActionKey::club(ActionKind::EditClub, club_id))?;

            let club = self.gateway.update_club(club_id, &payload).await?;
            tracing::info!(club_id, "Club updated");

            self.clubs.refresh_all(session.user_id()).await?;
            Ok::<_, ClientError>(club)
        }
        .await;
        self.settle(result).await
    }

    /// Delete a club the current user administers
    pub async fn delete_club(
        &self,
        club_id: i64,
        confirm: &dyn Confirm,
    ) -> ClientResult<ActionOutcome> {
        let result = async {
            let session = self.session.require().await?;
            self.ensure_permitted(club_id, ClubAction::Delete, "Only club admins can delete a club")
                .await?;
            let _guard = self
                .in_flight
                .begin(ActionKey::club(ActionKind::DeleteClub, club_id))?;
            if !confirm
                .confirm("Are you sure you want to delete this club? This action cannot be undone.")
                .await
            {
                return Ok(ActionOutcome::Declined);
            }

            self.gateway.delete_club(club_id).await?;
            tracing::info!(club_id, "Club deleted");

            self.clubs.refresh_all(session.user_id()).await?;
            Ok::<_, ClientError>(ActionOutcome::Completed(()))
        }
        .await;
        self.settle(result).await
    }

    /// Join a club. Paid clubs go through order, checkout and verify first;
    /// a cancelled checkout ends with `PaymentCancelled` and no membership.
    pub async fn join_club(
        &self,
        club_id: i64,
        checkout: &dyn Checkout,
    ) -> ClientResult<ActionOutcome> {
        let result = async {
            let session = self.session.require().await?;
            let club = self.club(club_id).await?;
            let membership = self.clubs.find_membership(club_id).await;
            let fee = match resolve_club_actions(&club, membership.as_ref()).as_slice() {
                [ClubAction::Join(fee)] => *fee,
                _ => {
                    return Err(ClientError::NotPermitted(
                        "You are already a member of this club".into(),
                    ));
                }
            };
            let _guard = self
                .in_flight
                .begin(ActionKey::club(ActionKind::Join, club_id))?;

            if let Fee::Paid(price) = fee
                && !self.pay_for(&session, &club, price, checkout).await?
            {
                return Ok(ActionOutcome::PaymentCancelled);
            }

            self.gateway.join_club(club_id).await?;
            tracing::info!(club_id, user_id = session.user_id(), "Joined club");

            self.clubs.refresh_all(session.user_id()).await?;
            Ok::<_, ClientError>(ActionOutcome::Completed(()))
        }
        .await;
        self.settle(result).await
    }

    /// Order, checkout and verify. `Ok(false)` means the user cancelled.
    async fn pay_for(
        &self,
        session: &Session,
        club: &Club,
        price: Decimal,
        checkout: &dyn Checkout,
    ) -> ClientResult<bool> {
        let order = self
            .gateway
            .create_order(
                session.user_id(),
                &OrderRequest {
                    amount: price,
                    currency: self.config.currency.clone(),
                    club_id: club.id,
                },
            )
            .await?;
        tracing::info!(club_id = club.id, order_id = %order.order_id, "Payment order created");

        let request = CheckoutRequest::new(&self.config, &order, club, &session.user);
        let confirmation = match checkout.open(request).await {
            CheckoutOutcome::Confirmed(confirmation) => confirmation,
            CheckoutOutcome::Cancelled => {
                tracing::info!(club_id = club.id, order_id = %order.order_id, "Checkout cancelled");
                return Ok(false);
            }
            CheckoutOutcome::Failed(reason) => {
                tracing::warn!(club_id = club.id, order_id = %order.order_id, reason = %reason, "Checkout failed");
                return Err(ClientError::PaymentFailed(reason));
            }
        };

        let verification = PaymentVerification::new(confirmation, session.user_id(), club.id);
        match self.gateway.verify_payment(&verification).await {
            Ok(()) => {
                tracing::info!(club_id = club.id, order_id = %order.order_id, "Payment verified");
                Ok(true)
            }
            Err(ClientError::Unauthorized) => Err(ClientError::Unauthorized),
            Err(e) => {
                tracing::warn!(club_id = club.id, order_id = %order.order_id, error = %e, "Payment verification failed");
                let message = match e {
                    ClientError::Api { message, .. } if message != GENERIC_ERROR_MESSAGE => message,
                    _ => "Payment verification failed".to_string(),
                };
                Err(ClientError::PaymentVerificationFailed(message))
            }
        }
    }

    /// Leave a club the current user is a plain member of
    pub async fn leave_club(
        &self,
        club_id: i64,
        confirm: &dyn Confirm,
    ) -> ClientResult<ActionOutcome> {
        let result = async {
            let session = self.session.require().await?;
            self.ensure_permitted(club_id, ClubAction::Leave, "You are not a member of this club")
                .await?;
            let _guard = self
                .in_flight
                .begin(ActionKey::club(ActionKind::Leave, club_id))?;
            if !confirm
                .confirm("Are you sure you want to leave this club?")
                .await
            {
                return Ok(ActionOutcome::Declined);
            }

            self.gateway.leave_club(club_id).await?;
            tracing::info!(club_id, user_id = session.user_id(), "Left club");

            self.clubs.refresh_all(session.user_id()).await?;
            Ok::<_, ClientError>(ActionOutcome::Completed(()))
        }
        .await;
        self.settle(result).await
    }

    async fn ensure_permitted(
        &self,
        club_id: i64,
        action: ClubAction,
        denial: &str,
    ) -> ClientResult<()> {
        if self.club_actions(club_id).await?.contains(&action) {
            Ok(())
        } else {
            Err(ClientError::NotPermitted(denial.to_string()))
        }
    }

    // ========== Roster mutations ==========

    /// Promote a member to club admin; returns the re-fetched details
    pub async fn promote_member(
        &self,
        club_id: i64,
        user_id: i64,
        confirm: &dyn Confirm,
    ) -> ClientResult<ActionOutcome<ClubDetails>> {
        self.roster_action(
            club_id,
            user_id,
            MemberAction::Promote,
            "Promote this member to admin?",
            confirm,
        )
        .await
    }

    /// Remove a member from a club; returns the re-fetched details
    pub async fn remove_member(
        &self,
        club_id: i64,
        user_id: i64,
        confirm: &dyn Confirm,
    ) -> ClientResult<ActionOutcome<ClubDetails>> {
        self.roster_action(
            club_id,
            user_id,
            MemberAction::Remove,
            "Remove this member from the club?",
            confirm,
        )
        .await
    }

    async fn roster_action(
        &self,
        club_id: i64,
        user_id: i64,
        action: MemberAction,
        prompt: &str,
        confirm: &dyn Confirm,
    ) -> ClientResult<ActionOutcome<ClubDetails>> {
        let result = async {
            let session = self.session.require().await?;
            let membership = self.clubs.find_membership(club_id).await;
            if !can_manage_member(session.user_id(), membership.as_ref(), user_id) {
                return Err(ClientError::NotPermitted(
                    "Only club admins can manage other members".into(),
                ));
            }

            let kind = match action {
                MemberAction::Promote => ActionKind::Promote,
                MemberAction::Remove => ActionKind::Remove,
            };
            let _guard = self
                .in_flight
                .begin(ActionKey::member(kind, club_id, user_id))?;

            let roster = self.gateway.club_members(club_id).await?;
            let Some(target) = roster.iter().find(|m| m.user_id == user_id) else {
                return Err(ClientError::NotPermitted(
                    "This user is not a member of the club".into(),
                ));
            };
            let allowed = resolve_member_actions(session.user_id(), membership.as_ref(), target);
            if !allowed.contains(&action) {
                let reason = match action {
                    MemberAction::Promote => "This member is already an admin",
                    MemberAction::Remove => "This member cannot be removed",
                };
                return Err(ClientError::NotPermitted(reason.into()));
            }

            if !confirm.confirm(prompt).await {
                return Ok(ActionOutcome::Declined);
            }

            match action {
                MemberAction::Promote => self.gateway.promote_member(club_id, user_id).await?,
                MemberAction::Remove => self.gateway.remove_member(club_id, user_id).await?,
            }
            tracing::info!(club_id, user_id, action = kind.as_str(), "Roster updated");

            self.clubs.refresh_all(session.user_id()).await?;
            let details = self.load_details(club_id, &session).await?;
            Ok::<_, ClientError>(ActionOutcome::Completed(details))
        }
        .await;
        self.settle(result).await
    }

    // ========== Platform administration ==========

    async fn require_admin(&self) -> ClientResult<Session> {
        let session = self.session.require().await?;
        if !session.is_admin() {
            return Err(ClientError::NotPermitted("Admin access required".into()));
        }
        Ok(session)
    }

    /// All users (platform admins only)
    pub async fn admin_users(&self) -> ClientResult<Vec<UserInfo>> {
        let result = async {
            self.require_admin().await?;
            self.gateway.admin_users().await
        }
        .await;
        self.settle(result).await
    }

    /// Delete another user; returns the refreshed admin user list
    pub async fn admin_delete_user(
        &self,
        user_id: i64,
        confirm: &dyn Confirm,
    ) -> ClientResult<ActionOutcome<Vec<UserInfo>>> {
        let result = async {
            let session = self.require_admin().await?;
            if !can_delete_user(&session.user, user_id) {
                return Err(ClientError::NotPermitted(
                    "You cannot delete your own account".into(),
                ));
            }
            let _guard = self
                .in_flight
                .begin(ActionKey::user(ActionKind::AdminDeleteUser, user_id))?;
            if !confirm
                .confirm("Are you sure you want to delete this user?")
                .await
            {
                return Ok(ActionOutcome::Declined);
            }

            self.gateway.admin_delete_user(user_id).await?;
            tracing::info!(user_id, "User deleted");

            let users = self.gateway.admin_users().await?;
            Ok::<_, ClientError>(ActionOutcome::Completed(users))
        }
        .await;
        self.settle(result).await
    }

    /// Delete any club (platform admins only)
    pub async fn admin_delete_club(
        &self,
        club_id: i64,
        confirm: &dyn Confirm,
    ) -> ClientResult<ActionOutcome> {
        let result = async {
            let session = self.require_admin().await?;
            let _guard = self
                .in_flight
                .begin(ActionKey::club(ActionKind::AdminDeleteClub, club_id))?;
            if !confirm
                .confirm("Are you sure you want to delete this club?")
                .await
            {
                return Ok(ActionOutcome::Declined);
            }

            self.gateway.admin_delete_club(club_id).await?;
            tracing::info!(club_id, "Club deleted by platform admin");

            self.clubs.refresh_all(session.user_id()).await?;
            Ok::<_, ClientError>(ActionOutcome::Completed(()))
        }
        .await;
        self.settle(result).await
    }
}
