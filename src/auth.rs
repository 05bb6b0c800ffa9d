//! Auth Client
//!
//! Register, login, logout, current-user check, account deletion, and
//! settings update. This is the only component allowed to write session
//! storage: successful register/login persist the session, and
//! logout/delete-account/failed-session-check clear it.

use crate::config::Config;
use crate::error::{AccountError, AuthError};
use crate::http::backend_message;
use crate::session::{Session, SessionHandle, SessionStore, User};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
struct RegisterRequest<'a> {
    username: &'a str,
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

/// Token response from /register and /login (`token_type` is always
/// "bearer" and is ignored)
#[derive(Debug, Deserialize)]
struct AuthResponse {
    access_token: String,
    user: User,
}

/// Free-form per-user settings object, sent and received verbatim
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct UserSettings(pub serde_json::Map<String, serde_json::Value>);

impl UserSettings {
    pub fn set(&mut self, key: impl Into<String>, value: serde_json::Value) {
        self.0.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.0.get(key)
    }
}

/// Client for the authentication endpoints.
pub struct AuthClient {
    http: reqwest::Client,
    config: Config,
    store: SessionStore,
    session: SessionHandle,
}

impl AuthClient {
    /// Create a client using the default on-disk session store, restoring a
    /// previously persisted session if one exists
    pub fn new(config: Config) -> Self {
        Self::with_store(config, SessionStore::open_default())
    }

    /// Create a client over an explicit session store
    pub fn with_store(config: Config, store: SessionStore) -> Self {
        let session = SessionHandle::default();
        session.replace(store.load());
        Self {
            http: reqwest::Client::new(),
            config,
            store,
            session,
        }
    }

    /// Shared read handle for the session; give a clone to [`crate::cards::CardClient`]
    pub fn session(&self) -> SessionHandle {
        self.session.clone()
    }

    /// Register a new account. On success the session is persisted and
    /// returned; on rejection the backend's message comes back verbatim.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<Session, AuthError> {
        tracing::debug!(email, "registering account");
        let response = self
            .http
            .post(self.config.api_url("/register"))
            .timeout(self.config.get_request_timeout())
            .json(&RegisterRequest {
                username,
                email,
                password,
            })
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "register request failed");
                AuthError::Network
            })?;

        self.finish_auth(response).await
    }

    /// Log in with email and password
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        tracing::debug!(email, "logging in");
        let response = self
            .http
            .post(self.config.api_url("/login"))
            .timeout(self.config.get_request_timeout())
            .json(&LoginRequest { email, password })
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "login request failed");
                AuthError::Network
            })?;

        self.finish_auth(response).await
    }

    async fn finish_auth(&self, response: reqwest::Response) -> Result<Session, AuthError> {
        if !response.status().is_success() {
            return Err(AuthError::rejected(backend_message(response).await));
        }
        let auth: AuthResponse = response.json().await.map_err(|e| {
            tracing::warn!(error = %e, "malformed auth response");
            AuthError::Network
        })?;
        let session = Session {
            access_token: auth.access_token,
            user: auth.user,
        };
        self.store.save(&session);
        self.session.replace(Some(session.clone()));
        Ok(session)
    }

    /// Clear the session locally. No network call; the in-memory session is
    /// gone before this returns, so later authenticated calls go out without
    /// the old token.
    pub fn logout(&self) {
        self.session.replace(None);
        self.store.clear();
    }

    /// Fetch the authenticated user's profile.
    ///
    /// `None` on a missing token, 401, or network failure; session expiry is
    /// an expected outcome here, not an error.
    pub async fn current_user(&self) -> Option<User> {
        let token = self.session.token()?;
        let response = self
            .http
            .get(self.config.api_url("/users/me"))
            .timeout(self.config.get_request_timeout())
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| tracing::debug!(error = %e, "current-user check failed"))
            .ok()?;

        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            tracing::debug!("session token no longer valid");
            self.session.replace(None);
            self.store.clear();
            return None;
        }
        if !response.status().is_success() {
            return None;
        }
        response.json().await.ok()
    }

    /// Delete the account. Clears the local session on success.
    pub async fn delete_account(&self) -> Result<(), AccountError> {
        let Some(token) = self.session.token() else {
            return Err(AccountError::rejected("not logged in"));
        };
        let response = self
            .http
            .delete(self.config.api_url("/users/me"))
            .timeout(self.config.get_request_timeout())
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "delete-account request failed");
                AccountError::Network
            })?;

        if !response.status().is_success() {
            return Err(AccountError::rejected(backend_message(response).await));
        }
        self.session.replace(None);
        self.store.clear();
        Ok(())
    }

    /// Replace the authenticated user's settings, returning the stored copy
    pub async fn update_settings(
        &self,
        settings: &UserSettings,
    ) -> Result<UserSettings, AccountError> {
        let Some(token) = self.session.token() else {
            return Err(AccountError::rejected("not logged in"));
        };
        let response = self
            .http
            .put(self.config.api_url("/users/me/settings"))
            .timeout(self.config.get_request_timeout())
            .bearer_auth(token)
            .json(settings)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "settings update failed");
                AccountError::Network
            })?;

        if !response.status().is_success() {
            return Err(AccountError::rejected(backend_message(response).await));
        }
        response.json().await.map_err(|e| {
            tracing::warn!(error = %e, "malformed settings response");
            AccountError::Network
        })
    }
}
