//! Route-level access control.
//!
//! The guard runs before every router transition and is the only place
//! access policy is enforced. It never performs navigation itself and
//! never sees transport errors: it resolves pending verification through
//! the auth store, then maps the target's requirements and the store's
//! settled state to a [`GuardDecision`] the router applies.

use super::auth::AuthStore;
use super::http::HttpTransport;
use super::routes::{LOGIN_PATH, RouteLocation, resolve};

/// Which visitor views bounce an already authenticated user.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum VisitorPolicy {
    /// Only the login and register views bounce (observed app behavior).
    #[default]
    LoginRegisterOnly,

    /// Every route flagged `for_visitors` bounces.
    AllVisitorRoutes,
}

/// Guard configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GuardPolicy {
    /// Route name authenticated users are bounced to from visitor views.
    pub landing: String,

    /// Scope of the visitor bounce.
    pub visitor_policy: VisitorPolicy,
}

impl Default for GuardPolicy {
    fn default() -> Self {
        Self {
            landing: "about".to_string(),
            visitor_policy: VisitorPolicy::default(),
        }
    }
}

/// Outcome of evaluating a navigation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    /// Let the transition through unchanged.
    Proceed,

    /// Send the user to the login view, stashing the originally intended
    /// path so the login flow can come back to it.
    ToLogin { redirect: String },

    /// Send an authenticated user away from a visitor view.
    ToLanding { target: String },
}

impl GuardDecision {
    /// Renders the decision as a concrete path for the router to push.
    ///
    /// `None` means the transition proceeds unchanged.
    ///
    /// # Example
    ///
    /// ```
    /// # use nutriplan_client::client::guard::GuardDecision;
    /// let decision = GuardDecision::ToLogin {
    ///     redirect: "/health_form".to_string(),
    /// };
    /// assert_eq!(
    ///     decision.target_path(),
    ///     Some("/login?redirect=%2Fhealth_form".to_string())
    /// );
    /// ```
    pub fn target_path(&self) -> Option<String> {
        match self {
            GuardDecision::Proceed => None,
            GuardDecision::ToLogin { redirect } => Some(format!(
                "{}?redirect={}",
                LOGIN_PATH,
                urlencoding::encode(redirect)
            )),
            GuardDecision::ToLanding { target } => Some(
                resolve(target)
                    .map(|location| location.full_path)
                    .unwrap_or_else(|| "/".to_string()),
            ),
        }
    }
}

/// Gatekeeper evaluated before every route transition.
pub struct NavigationGuard<T: HttpTransport> {
    auth: AuthStore<T>,
    policy: GuardPolicy,
}

impl<T: HttpTransport> NavigationGuard<T> {
    /// Creates a guard with the default policy.
    pub fn new(auth: AuthStore<T>) -> Self {
        Self::with_policy(auth, GuardPolicy::default())
    }

    /// Creates a guard with an explicit policy.
    pub fn with_policy(auth: AuthStore<T>, policy: GuardPolicy) -> Self {
        Self { auth, policy }
    }

    /// Evaluates a transition to `to`.
    ///
    /// A rehydrated-but-unverified token (token present, flag unset) is
    /// resolved first by awaiting a verification round trip; a confirmed
    /// session or a confirmed absence of a token skips that entirely, so
    /// routine navigation costs no network call.
    pub async fn before_each(&self, to: &RouteLocation) -> GuardDecision {
        if self.auth.state().is_verification_pending() {
            tracing::trace!("unverified session, resolving before navigation");
            self.auth.check_token().await;
        }

        let requires_auth = to.requires_auth();
        let is_authenticated = self.auth.is_logged_in();

        if requires_auth && !is_authenticated {
            tracing::trace!("blocking {} pending login", to.full_path);
            GuardDecision::ToLogin {
                redirect: to.full_path.clone(),
            }
        } else if is_authenticated && self.bounces_authenticated(to) {
            tracing::trace!("bouncing authenticated user off {}", to.name);
            GuardDecision::ToLanding {
                target: self.policy.landing.clone(),
            }
        } else {
            GuardDecision::Proceed
        }
    }

    fn bounces_authenticated(&self, to: &RouteLocation) -> bool {
        match self.policy.visitor_policy {
            VisitorPolicy::LoginRegisterOnly => {
                to.for_visitors() && (to.name == "login" || to.name == "register")
            }
            VisitorPolicy::AllVisitorRoutes => to.for_visitors(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::super::auth::Credentials;
    use super::super::http::{ApiClient, bearer_interceptor};
    use super::super::storage::{DurableStorage, MemoryStorage};
    use super::super::testing::StubTransport;
    use super::super::token_store::TokenStore;
    use super::*;
    use crate::ApiConfig;

    fn guard_with(
        transport: StubTransport,
        storage: MemoryStorage,
        policy: GuardPolicy,
    ) -> (NavigationGuard<StubTransport>, AuthStore<StubTransport>) {
        let tokens = TokenStore::new();
        let api = ApiClient::with_transport(ApiConfig::new("http://localhost:8081"), transport)
            .with_request_interceptor(bearer_interceptor(tokens.clone()));
        let auth = AuthStore::new(Arc::new(api), tokens, Arc::new(storage));
        (NavigationGuard::with_policy(auth.clone(), policy), auth)
    }

    fn protected() -> RouteLocation {
        resolve("health_form").unwrap()
    }

    #[tokio::test]
    async fn test_logged_out_is_redirected_to_login_with_intended_path() {
        let (guard, _) = guard_with(
            StubTransport::new(),
            MemoryStorage::new(),
            GuardPolicy::default(),
        );

        let decision = guard.before_each(&protected()).await;
        assert_eq!(
            decision,
            GuardDecision::ToLogin {
                redirect: "/health_form".to_string()
            }
        );
        assert_eq!(
            decision.target_path().as_deref(),
            Some("/login?redirect=%2Fhealth_form")
        );
    }

    #[tokio::test]
    async fn test_logged_out_can_browse_public_routes() {
        let transport = StubTransport::new();
        let (guard, _) = guard_with(
            transport.clone(),
            MemoryStorage::new(),
            GuardPolicy::default(),
        );

        for name in ["home", "login", "register", "about"] {
            let decision = guard.before_each(&resolve(name).unwrap()).await;
            assert_eq!(decision, GuardDecision::Proceed, "route {}", name);
        }
        // A confirmed absence of a token never forces verification.
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn test_pending_verification_is_resolved_before_deciding() {
        let transport = StubTransport::new();
        transport.push_response(200, r#"{"id": 1}"#);
        let storage = MemoryStorage::with_token("abc");
        let (guard, auth) = guard_with(transport.clone(), storage, GuardPolicy::default());
        // App start rehydrated the token; the guard runs before any
        // verification has happened.
        auth.rehydrate();

        let decision = guard.before_each(&protected()).await;
        assert_eq!(decision, GuardDecision::Proceed);
        assert_eq!(transport.request_count(), 1);

        // The session is settled now: further navigation stays local.
        let decision = guard.before_each(&resolve("about").unwrap()).await;
        assert_eq!(decision, GuardDecision::Proceed);
        assert_eq!(transport.request_count(), 1);
    }

    #[tokio::test]
    async fn test_pending_verification_failure_redirects_to_login() {
        let transport = StubTransport::new();
        transport.push_response(401, r#"{"detail": "Invalid-token"}"#);
        let storage = MemoryStorage::with_token("stale");
        let (guard, auth) = guard_with(transport.clone(), storage.clone(), GuardPolicy::default());
        auth.rehydrate();

        let decision = guard.before_each(&protected()).await;
        assert_eq!(
            decision,
            GuardDecision::ToLogin {
                redirect: "/health_form".to_string()
            }
        );
        // The stale token was purged along the way.
        assert!(storage.load().is_none());
    }

    #[tokio::test]
    async fn test_authenticated_user_reaches_protected_route() {
        let transport = StubTransport::new();
        transport.push_response(200, r#"{"access_token": "issued", "token_type": "bearer"}"#);
        let (guard, auth) = guard_with(
            transport.clone(),
            MemoryStorage::new(),
            GuardPolicy::default(),
        );
        auth.login(&Credentials::new("ana@example.com", "secret"))
            .await
            .unwrap();

        let decision = guard.before_each(&protected()).await;
        assert_eq!(decision, GuardDecision::Proceed);
        // Verified in this session: no extra who-am-I round trip.
        assert_eq!(transport.request_count(), 1);
    }

    #[tokio::test]
    async fn test_authenticated_user_is_bounced_from_login_and_register() {
        let transport = StubTransport::new();
        transport.push_response(200, r#"{"access_token": "issued", "token_type": "bearer"}"#);
        let (guard, auth) = guard_with(
            transport,
            MemoryStorage::new(),
            GuardPolicy::default(),
        );
        auth.login(&Credentials::new("ana@example.com", "secret"))
            .await
            .unwrap();

        for name in ["login", "register"] {
            let decision = guard.before_each(&resolve(name).unwrap()).await;
            assert_eq!(
                decision,
                GuardDecision::ToLanding {
                    target: "about".to_string()
                },
                "route {}",
                name
            );
            assert_eq!(decision.target_path().as_deref(), Some("/about"));
        }

        // Other visitor views stay reachable under the default policy.
        let decision = guard.before_each(&resolve("home").unwrap()).await;
        assert_eq!(decision, GuardDecision::Proceed);
    }

    #[tokio::test]
    async fn test_all_visitor_routes_policy_bounces_every_visitor_view() {
        let transport = StubTransport::new();
        transport.push_response(200, r#"{"access_token": "issued", "token_type": "bearer"}"#);
        let policy = GuardPolicy {
            landing: "health_form".to_string(),
            visitor_policy: VisitorPolicy::AllVisitorRoutes,
        };
        let (guard, auth) = guard_with(transport, MemoryStorage::new(), policy);
        auth.login(&Credentials::new("ana@example.com", "secret"))
            .await
            .unwrap();

        let decision = guard.before_each(&resolve("home").unwrap()).await;
        assert_eq!(
            decision,
            GuardDecision::ToLanding {
                target: "health_form".to_string()
            }
        );
        assert_eq!(decision.target_path().as_deref(), Some("/health_form"));
    }

    #[tokio::test]
    async fn test_stored_redirect_succeeds_after_login() {
        let transport = StubTransport::new();
        let storage = MemoryStorage::new();
        let (guard, auth) = guard_with(transport.clone(), storage, GuardPolicy::default());

        // First attempt while logged out stashes the intended path.
        let decision = guard.before_each(&protected()).await;
        let GuardDecision::ToLogin { redirect } = decision else {
            panic!("expected a login redirect");
        };

        // Login, then retry the stashed path: it now proceeds unredirected.
        transport.push_response(200, r#"{"access_token": "issued", "token_type": "bearer"}"#);
        auth.login(&Credentials::new("ana@example.com", "secret"))
            .await
            .unwrap();
        let retry = RouteLocation::new("health_form", redirect, vec![protected().matched[0]]);
        assert_eq!(guard.before_each(&retry).await, GuardDecision::Proceed);
    }

    #[tokio::test]
    async fn test_unknown_landing_falls_back_to_root() {
        let decision = GuardDecision::ToLanding {
            target: "nowhere".to_string(),
        };
        assert_eq!(decision.target_path().as_deref(), Some("/"));
    }
}
