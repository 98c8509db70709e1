//! API gateway
//!
//! Single chokepoint for network calls. It injects the bearer token,
//! classifies responses and tears the session down on HTTP 401. No other
//! component inspects status codes.

use std::sync::Arc;

use http::StatusCode;
use serde::de::DeserializeOwned;
use shared::ApiErrorBody;

use crate::http::{ApiRequest, HttpTransport, RawResponse};
use crate::session::SessionStore;
use crate::{ClientError, ClientResult};

/// Authenticated API gateway
pub struct ApiGateway {
    transport: Arc<dyn HttpTransport>,
    session: Arc<SessionStore>,
}

impl ApiGateway {
    pub fn new(transport: Arc<dyn HttpTransport>, session: Arc<SessionStore>) -> Self {
        Self { transport, session }
    }

    /// Session store the gateway reads tokens from
    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    /// Authenticated call returning the decoded JSON body.
    pub async fn call<T: DeserializeOwned>(&self, request: ApiRequest) -> ClientResult<T> {
        let response = self.send_authenticated(request).await?;
        Self::decode(&response)
    }

    /// Authenticated call whose success body is ignored.
    pub async fn call_unit(&self, request: ApiRequest) -> ClientResult<()> {
        self.send_authenticated(request).await.map(|_| ())
    }

    /// Unauthenticated call (login/register). A 401 here is a rejection of
    /// the submitted credentials and does not touch the session.
    pub async fn call_public<T: DeserializeOwned>(&self, request: ApiRequest) -> ClientResult<T> {
        let path = request.path.clone();
        let response = self.transport.send(request.with_token(None)).await?;
        if response.status == StatusCode::UNAUTHORIZED {
            let message = ApiErrorBody::text_from(&response.body)
                .unwrap_or_else(|| "Invalid credentials".to_string());
            tracing::debug!(path = %path, "Credentials rejected");
            return Err(ClientError::InvalidCredentials(message));
        }
        Self::check_status(&path, &response)?;
        Self::decode(&response)
    }

    async fn send_authenticated(&self, request: ApiRequest) -> ClientResult<RawResponse> {
        let token = self.session.token().await;
        let path = request.path.clone();
        let response = self.transport.send(request.with_token(token)).await?;

        if response.status == StatusCode::UNAUTHORIZED {
            tracing::warn!(path = %path, "Unauthorized response, tearing down session");
            if let Err(e) = self.session.logout().await {
                tracing::error!(error = %e, "Failed to clear persisted session");
            }
            return Err(ClientError::Unauthorized);
        }
        Self::check_status(&path, &response)?;
        Ok(response)
    }

    /// Map a non-2xx response to `ClientError::Api`
    fn check_status(path: &str, response: &RawResponse) -> ClientResult<()> {
        if response.status.is_success() {
            return Ok(());
        }
        let message = ApiErrorBody::message_from(&response.body);
        tracing::debug!(path = %path, status = response.status.as_u16(), message = %message, "Request failed");
        Err(ClientError::Api {
            status: response.status.as_u16(),
            message,
        })
    }

    fn decode<T: DeserializeOwned>(response: &RawResponse) -> ClientResult<T> {
        serde_json::from_str(&response.body)
            .map_err(|e| ClientError::InvalidResponse(format!("{e}")))
    }
}
