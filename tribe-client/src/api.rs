//! Typed endpoints of the TribeNet REST API

use http::Method;
use shared::{
    Club, ClubPayload, LoginRequest, LoginResponse, Member, MessageResponse, OrderRequest,
    OrderResponse, PaymentRecord, PaymentVerification, RegisterRequest, UserInfo,
};

use crate::ClientResult;
use crate::gateway::ApiGateway;
use crate::http::ApiRequest;

impl ApiGateway {
    // ========== Auth API ==========

    /// Login with username and password
    pub async fn login(&self, username: &str, password: &str) -> ClientResult<LoginResponse> {
        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        self.call_public(ApiRequest::new(Method::POST, "/auth/login").with_json(&request)?)
            .await
    }

    /// Register a new account; returns the server's message
    pub async fn register(&self, request: &RegisterRequest) -> ClientResult<MessageResponse> {
        self.call_public(ApiRequest::new(Method::POST, "/auth/register").with_json(request)?)
            .await
    }

    // ========== Clubs API ==========

    pub async fn list_clubs(&self) -> ClientResult<Vec<Club>> {
        self.call(ApiRequest::new(Method::GET, "/clubs")).await
    }

    pub async fn create_club(&self, payload: &ClubPayload) -> ClientResult<Club> {
        self.call(ApiRequest::new(Method::POST, "/clubs").with_json(payload)?)
            .await
    }

    pub async fn get_club(&self, club_id: i64) -> ClientResult<Club> {
        self.call(ApiRequest::new(Method::GET, format!("/clubs/{club_id}")))
            .await
    }

    pub async fn update_club(&self, club_id: i64, payload: &ClubPayload) -> ClientResult<Club> {
        self.call(ApiRequest::new(Method::PUT, format!("/clubs/{club_id}")).with_json(payload)?)
            .await
    }

    pub async fn delete_club(&self, club_id: i64) -> ClientResult<()> {
        self.call_unit(ApiRequest::new(Method::DELETE, format!("/clubs/{club_id}")))
            .await
    }

    pub async fn club_members(&self, club_id: i64) -> ClientResult<Vec<Member>> {
        self.call(ApiRequest::new(Method::GET, format!("/clubs/{club_id}/members")))
            .await
    }

    pub async fn join_club(&self, club_id: i64) -> ClientResult<()> {
        self.call_unit(ApiRequest::new(Method::POST, format!("/clubs/{club_id}/join")))
            .await
    }

    pub async fn leave_club(&self, club_id: i64) -> ClientResult<()> {
        self.call_unit(ApiRequest::new(Method::DELETE, format!("/clubs/{club_id}/leave")))
            .await
    }

    pub async fn promote_member(&self, club_id: i64, user_id: i64) -> ClientResult<()> {
        self.call_unit(ApiRequest::new(
            Method::PUT,
            format!("/clubs/{club_id}/members/{user_id}/promote"),
        ))
        .await
    }

    pub async fn remove_member(&self, club_id: i64, user_id: i64) -> ClientResult<()> {
        self.call_unit(ApiRequest::new(
            Method::DELETE,
            format!("/clubs/{club_id}/members/{user_id}"),
        ))
        .await
    }

    // ========== Users API ==========

    /// All users except the caller
    pub async fn list_users(&self) -> ClientResult<Vec<UserInfo>> {
        self.call(ApiRequest::new(Method::GET, "/users")).await
    }

    /// Clubs of a user, each carrying that user's `clubRole`
    pub async fn user_clubs(&self, user_id: i64) -> ClientResult<Vec<Club>> {
        self.call(ApiRequest::new(Method::GET, format!("/users/{user_id}/clubs")))
            .await
    }

    // ========== Payments API ==========

    pub async fn create_order(
        &self,
        user_id: i64,
        request: &OrderRequest,
    ) -> ClientResult<OrderResponse> {
        self.call(
            ApiRequest::new(Method::POST, "/payments/create-order")
                .with_query("userId", user_id)
                .with_json(request)?,
        )
        .await
    }

    pub async fn verify_payment(&self, verification: &PaymentVerification) -> ClientResult<()> {
        self.call_unit(ApiRequest::new(Method::POST, "/payments/verify").with_json(verification)?)
            .await
    }

    pub async fn payments_for_user(&self, user_id: i64) -> ClientResult<Vec<PaymentRecord>> {
        self.call(ApiRequest::new(Method::GET, format!("/payments/user/{user_id}")))
            .await
    }

    pub async fn payment(&self, payment_id: i64) -> ClientResult<PaymentRecord> {
        self.call(ApiRequest::new(Method::GET, format!("/payments/{payment_id}")))
            .await
    }

    // ========== Admin API ==========

    pub async fn admin_users(&self) -> ClientResult<Vec<UserInfo>> {
        self.call(ApiRequest::new(Method::GET, "/admin/users")).await
    }

    pub async fn admin_delete_user(&self, user_id: i64) -> ClientResult<()> {
        self.call_unit(ApiRequest::new(Method::DELETE, format!("/admin/users/{user_id}")))
            .await
    }

    pub async fn admin_delete_club(&self, club_id: i64) -> ClientResult<()> {
        self.call_unit(ApiRequest::new(Method::DELETE, format!("/admin/clubs/{club_id}")))
            .await
    }
}
