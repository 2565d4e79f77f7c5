//! Dioxus integration for the session lifecycle.
//!
//! [`use_session_provider`] installs a [`SessionContext`] at the root of
//! the component tree; descendants read it back with [`use_session`]. The
//! context mirrors the auth store's state into a signal after every
//! action, so components re-render as the session changes, and exposes
//! login/logout as callbacks.
//!
//! [`browser_session`] is the standard wiring for a real app: token slot,
//! browser storage, browser navigator, reqwest transport, and the stock
//! interceptors assembled into one bundle.

use std::sync::Arc;

use dioxus::prelude::*;

use crate::config::ApiConfig;
use crate::user::UserProfile;

use super::auth::{AuthState, AuthStore, Credentials};
use super::guard::NavigationGuard;
use super::http::{ApiClient, ApiError, ReqwestTransport, bearer_interceptor, session_expiry_interceptor};
use super::navigator::BrowserNavigator;
use super::storage::BrowserStorage;
use super::token_store::TokenStore;

/// Everything a browser app needs, wired together.
pub struct SessionHandles {
    /// Shared client for resource endpoints.
    pub api: Arc<ApiClient<ReqwestTransport>>,
    /// The session lifecycle store.
    pub auth: AuthStore<ReqwestTransport>,
    /// Guard to hook into the router's before-navigation step.
    pub guard: NavigationGuard<ReqwestTransport>,
}

/// Assembles the production session stack for a browser app.
///
/// The returned client carries the bearer interceptor and the 401
/// session-expiry interceptor over a shared token slot; the store persists
/// to browser localStorage.
pub fn browser_session(config: ApiConfig) -> Result<SessionHandles, ApiError> {
    let tokens = TokenStore::new();
    let navigator = Arc::new(BrowserNavigator::new());
    let api = Arc::new(
        ApiClient::new(config)?
            .with_request_interceptor(bearer_interceptor(tokens.clone()))
            .with_response_interceptor(session_expiry_interceptor(tokens.clone(), navigator)),
    );
    let auth = AuthStore::new(
        Arc::clone(&api),
        tokens,
        Arc::new(BrowserStorage::new()),
    );
    let guard = NavigationGuard::new(auth.clone());
    Ok(SessionHandles { api, auth, guard })
}

/// Session context shared through the component tree.
#[derive(Clone)]
pub struct SessionContext {
    auth: AuthStore<ReqwestTransport>,
    state: Signal<AuthState>,
    last_error: Signal<Option<String>>,

    /// Attempts a login with the given credentials.
    pub login: Callback<Credentials>,

    /// Ends the session and drops the stored token.
    pub logout: Callback<()>,
}

impl SessionContext {
    /// Snapshot of the session state.
    pub fn state(&self) -> AuthState {
        self.state.read().clone()
    }

    /// True once the session is verified and a token is held.
    pub fn is_authenticated(&self) -> bool {
        self.state.read().is_logged_in()
    }

    /// The verified user profile, if any.
    pub fn user(&self) -> Option<UserProfile> {
        self.state.read().user.clone()
    }

    /// Message from the most recent failed login, cleared on success.
    pub fn error(&self) -> Option<String> {
        self.last_error.read().clone()
    }

    /// The underlying store, for router wiring and imperative flows.
    pub fn auth(&self) -> &AuthStore<ReqwestTransport> {
        &self.auth
    }
}

/// Installs the session context at the root of the app.
///
/// Call once in the root component, before any [`use_session`] consumer.
/// Restores a stored session on mount via the store's
/// [`initialize_auth`](AuthStore::initialize_auth).
pub fn use_session_provider(auth: AuthStore<ReqwestTransport>) {
    let state = use_signal(AuthState::default);
    let last_error = use_signal(|| None::<String>);

    {
        let auth = auth.clone();
        use_effect(move || {
            let auth = auth.clone();
            let mut state = state;
            spawn(async move {
                auth.initialize_auth().await;
                state.set(auth.state());
            });
        });
    }

    let login = {
        let auth = auth.clone();
        Callback::new(move |credentials: Credentials| {
            let auth = auth.clone();
            let mut state = state;
            let mut last_error = last_error;
            spawn(async move {
                match auth.login(&credentials).await {
                    Ok(()) => last_error.set(None),
                    Err(message) => last_error.set(Some(message)),
                }
                state.set(auth.state());
            });
        })
    };

    let logout = {
        let auth = auth.clone();
        Callback::new(move |_: ()| {
            auth.logout();
            let mut state = state;
            state.set(auth.state());
        })
    };

    use_context_provider(|| SessionContext {
        auth,
        state,
        last_error,
        login,
        logout,
    });
}

/// Reads the session context installed by [`use_session_provider`].
///
/// # Panics
///
/// Panics if no ancestor component called [`use_session_provider`].
pub fn use_session() -> SessionContext {
    use_context::<SessionContext>()
}

#[cfg(test)]
mod tests {
    use super::*;

    // The provider and hook need a Dioxus runtime; what can be covered
    // natively is the wiring itself.
    #[test]
    fn test_browser_session_wires_a_logged_out_stack() {
        let handles = browser_session(ApiConfig::new("http://localhost:8081")).unwrap();
        assert!(!handles.auth.is_logged_in());
        assert_eq!(
            handles.api.config().base_url,
            "http://localhost:8081"
        );
    }

    #[tokio::test]
    async fn test_browser_session_initialize_is_inert_off_wasm() {
        let handles = browser_session(ApiConfig::default()).unwrap();
        // BrowserStorage has nothing stored outside the browser, so this
        // must settle logged out without touching the network.
        handles.auth.initialize_auth().await;
        assert!(!handles.auth.is_logged_in());
    }
}
