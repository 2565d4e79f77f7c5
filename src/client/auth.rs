//! Authenticated-session lifecycle.
//!
//! [`AuthStore`] owns the process-wide [`AuthState`] and is its only
//! writer; the guard and the hook layer read snapshots or invoke the
//! store's actions. Every terminal state is committed under a single lock
//! acquisition, so overlapping calls (app bootstrap racing the first
//! navigation, a verification outliving a superseded navigation) settle
//! last-write-wins without exposing partially updated fields.
//!
//! The token is kept in two synchronized copies: the in-memory
//! [`TokenStore`] the request interceptor reads, and the durable storage
//! slot that survives reloads. Both are written in tandem here and only
//! here.

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

use crate::user::UserProfile;

use super::http::{ApiClient, HttpTransport};
use super::storage::DurableStorage;
use super::token_store::TokenStore;

pub(crate) const SESSION_PATH: &str = "/api/v1/auth/session";
pub(crate) const ME_PATH: &str = "/api/v1/users/me";

/// Message shown when a login failure carries no backend message.
pub const LOGIN_FALLBACK_MESSAGE: &str = "Login failed";

/// Login credentials for the first-party session endpoint.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Body of a successful `POST /api/v1/auth/session`.
#[derive(Debug, Deserialize)]
struct SessionResponse {
    access_token: String,
}

/// The session state every other component reads.
///
/// `is_authenticated` is not implied by `token` being present: a token
/// rehydrated from storage sits unverified until the who-am-I round trip
/// confirms it. "Logged in" therefore requires both.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    pub user: Option<UserProfile>,
    pub token: Option<String>,
    pub is_authenticated: bool,
}

impl AuthState {
    /// True once the session is verified and a token is held.
    pub fn is_logged_in(&self) -> bool {
        self.is_authenticated && self.token.is_some()
    }

    /// True while a rehydrated token awaits verification.
    pub fn is_verification_pending(&self) -> bool {
        !self.is_authenticated && self.token.is_some()
    }
}

/// Owner of the authenticated-session lifecycle.
///
/// Cheap to clone; clones share the same state, token slot, and storage.
pub struct AuthStore<T: HttpTransport> {
    state: Arc<Mutex<AuthState>>,
    api: Arc<ApiClient<T>>,
    tokens: TokenStore,
    storage: Arc<dyn DurableStorage>,
}

impl<T: HttpTransport> Clone for AuthStore<T> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            api: Arc::clone(&self.api),
            tokens: self.tokens.clone(),
            storage: Arc::clone(&self.storage),
        }
    }
}

impl<T: HttpTransport> AuthStore<T> {
    /// Creates a store over the given client, token slot, and storage.
    ///
    /// The client is expected to carry the bearer interceptor reading the
    /// same [`TokenStore`]; see `browser_session` for the standard wiring.
    pub fn new(api: Arc<ApiClient<T>>, tokens: TokenStore, storage: Arc<dyn DurableStorage>) -> Self {
        Self {
            state: Arc::new(Mutex::new(AuthState::default())),
            api,
            tokens,
            storage,
        }
    }

    /// Returns a snapshot of the current state.
    pub fn state(&self) -> AuthState {
        self.state.lock().expect("auth state lock poisoned").clone()
    }

    /// True once the session is verified and a token is held.
    pub fn is_logged_in(&self) -> bool {
        self.state().is_logged_in()
    }

    /// Exchanges credentials for a session token.
    ///
    /// On success the token is persisted to durable storage, set on the
    /// token slot, and the state becomes authenticated. On failure the
    /// state is left untouched and the returned message is suitable for
    /// inline display: the backend's own message when it supplied one,
    /// [`LOGIN_FALLBACK_MESSAGE`] otherwise. Never panics past this
    /// boundary.
    pub async fn login(&self, credentials: &Credentials) -> Result<(), String> {
        match self
            .api
            .post::<_, SessionResponse>(SESSION_PATH, credentials)
            .await
        {
            Ok(session) => {
                tracing::trace!("login succeeded");
                self.storage.save(&session.access_token);
                self.tokens.set(session.access_token.clone());

                let mut state = self.state.lock().expect("auth state lock poisoned");
                state.token = Some(session.access_token);
                state.is_authenticated = true;
                Ok(())
            }
            Err(err) => {
                tracing::warn!("login failed: {}", err);
                Err(err
                    .backend_message()
                    .unwrap_or(LOGIN_FALLBACK_MESSAGE)
                    .to_string())
            }
        }
    }

    /// Ends the session.
    ///
    /// Clears the state, the durable token, and the token slot. Always
    /// succeeds and is safe to call in any state.
    pub fn logout(&self) {
        tracing::trace!("logging out");
        {
            let mut state = self.state.lock().expect("auth state lock poisoned");
            state.user = None;
            state.token = None;
            state.is_authenticated = false;
        }
        self.storage.clear();
        self.tokens.clear();
    }

    /// Verifies the durable token against the who-am-I endpoint.
    ///
    /// No durable token: normalizes to logged out and returns `false`
    /// without touching the network. Otherwise the token is set on the
    /// token slot and verified; any failure (network, 401, malformed
    /// response) purges it via [`logout`](Self::logout). This is the only
    /// path that detects and removes a stale durable token.
    pub async fn check_token(&self) -> bool {
        let Some(token) = self.storage.load() else {
            tracing::trace!("no stored token, normalizing to logged out");
            self.logout();
            return false;
        };

        self.tokens.set(token.clone());
        match self.api.get::<UserProfile>(ME_PATH).await {
            Ok(user) => {
                tracing::trace!("stored token verified for user {}", user.id);
                let mut state = self.state.lock().expect("auth state lock poisoned");
                state.user = Some(user);
                state.token = Some(token);
                state.is_authenticated = true;
                true
            }
            Err(err) => {
                tracing::warn!("stored token rejected: {}", err);
                self.logout();
                false
            }
        }
    }

    /// Seeds the session from durable storage without verifying it.
    ///
    /// The token is eagerly set on the token slot (so the first real
    /// request already carries it) and marked on the state as
    /// rehydrated-but-unverified; `is_authenticated` stays false until
    /// [`check_token`](Self::check_token) confirms it. Returns whether a
    /// stored token was found.
    pub fn rehydrate(&self) -> bool {
        let Some(token) = self.storage.load() else {
            tracing::trace!("no stored session to restore");
            return false;
        };

        tracing::trace!("restoring stored session");
        self.tokens.set(token.clone());
        let mut state = self.state.lock().expect("auth state lock poisoned");
        state.token = Some(token);
        true
    }

    /// Restores a previous session at app start.
    ///
    /// With no durable token this is a no-op (and makes no network call).
    /// Otherwise the rehydrated token is confirmed through
    /// [`check_token`](Self::check_token), which populates the user
    /// profile or purges the stale token.
    pub async fn initialize_auth(&self) {
        if self.rehydrate() {
            self.check_token().await;
        }
    }
}
