//! Session store
//!
//! Owns the auth token and current-user identity. Lifecycle:
//! login -> persist -> restore on startup -> logout clears everything.
//! Token and user are always written and removed as a pair.

use std::sync::Arc;

use shared::{LoginResponse, UserInfo};
use tokio::sync::RwLock;

use crate::storage::KeyValueStore;
use crate::{ClientError, ClientResult};

/// Storage key of the bearer token
pub const AUTH_TOKEN_KEY: &str = "authToken";
/// Storage key of the serialized user
pub const USER_DATA_KEY: &str = "userData";

/// An authenticated session
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: String,
    pub user: UserInfo,
}

impl Session {
    pub fn user_id(&self) -> i64 {
        self.user.id
    }

    /// Platform-wide admin (not club admin)
    pub fn is_admin(&self) -> bool {
        self.user.role.is_admin()
    }
}

impl From<LoginResponse> for Session {
    fn from(response: LoginResponse) -> Self {
        Self {
            token: response.token,
            user: response.user,
        }
    }
}

/// Session store with persistent backing
pub struct SessionStore {
    storage: Arc<dyn KeyValueStore>,
    current: RwLock<Option<Session>>,
}

impl SessionStore {
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self {
            storage,
            current: RwLock::new(None),
        }
    }

    /// Persist and activate a session after a successful login.
    pub async fn establish(&self, session: Session) -> ClientResult<Session> {
        let user_json = serde_json::to_string(&session.user)?;
        self.storage.set(AUTH_TOKEN_KEY, &session.token)?;
        if let Err(e) = self.storage.set(USER_DATA_KEY, &user_json) {
            // keep the pair consistent
            let _ = self.storage.remove(AUTH_TOKEN_KEY);
            return Err(e);
        }

        *self.current.write().await = Some(session.clone());
        tracing::info!(user_id = session.user.id, username = %session.user.username, "Session established");
        Ok(session)
    }

    /// Restore the persisted session at startup.
    ///
    /// Returns `None` when either entry is missing or the user entry is
    /// unreadable; the caller then shows the unauthenticated view.
    pub async fn restore(&self) -> Option<Session> {
        let token = match self.storage.get(AUTH_TOKEN_KEY) {
            Ok(Some(token)) if !token.is_empty() => token,
            Ok(_) => return None,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read persisted token");
                return None;
            }
        };
        let user_json = match self.storage.get(USER_DATA_KEY) {
            Ok(Some(json)) => json,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read persisted user");
                return None;
            }
        };
        let user: UserInfo = match serde_json::from_str(&user_json) {
            Ok(user) => user,
            Err(e) => {
                tracing::warn!(error = %e, "Persisted user is unreadable, ignoring session");
                return None;
            }
        };

        let session = Session { token, user };
        *self.current.write().await = Some(session.clone());
        tracing::info!(user_id = session.user.id, "Session restored from storage");
        Some(session)
    }

    /// Clear in-memory and persisted state. Idempotent.
    pub async fn logout(&self) -> ClientResult<()> {
        let previous = self.current.write().await.take();
        let token_result = self.storage.remove(AUTH_TOKEN_KEY);
        let user_result = self.storage.remove(USER_DATA_KEY);
        if let Some(session) = previous {
            tracing::info!(user_id = session.user.id, "Session cleared");
        }
        token_result.and(user_result)
    }

    /// Current session, if any
    pub async fn current(&self) -> Option<Session> {
        self.current.read().await.clone()
    }

    /// Current bearer token, if any
    pub async fn token(&self) -> Option<String> {
        self.current.read().await.as_ref().map(|s| s.token.clone())
    }

    /// Current session or `NotAuthenticated`
    pub async fn require(&self) -> ClientResult<Session> {
        self.current().await.ok_or(ClientError::NotAuthenticated)
    }

    pub async fn is_authenticated(&self) -> bool {
        self.current.read().await.is_some()
    }
}
