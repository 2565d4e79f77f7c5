//! # nutriplan-client
//!
//! Browser-side session and API client for the NutriPlan meal-planning
//! app. The crate owns the client half of authentication: it attaches the
//! session token to every backend call, detects session expiry, drives the
//! login/logout/verification lifecycle, and gates navigation on per-route
//! access requirements.
//!
//! ## Overview
//!
//! Four pieces cooperate, leaves first:
//!
//! - [`client::TokenStore`] — the in-memory bearer token the request
//!   interceptor reads; kept in lockstep with a durable localStorage copy
//!   ([`client::storage`]).
//! - [`client::ApiClient`] — the single egress point for backend calls,
//!   with explicit ordered request/response interceptor chains. The stock
//!   interceptors inject the bearer token and tear the session down on any
//!   401 (clear token, hard redirect to `/login`).
//! - [`client::AuthStore`] — owner and sole writer of the process-wide
//!   [`client::AuthState`]: `login`, `logout`, `check_token`,
//!   `initialize_auth`. A token rehydrated from storage stays unverified
//!   until the who-am-I round trip confirms it, so "logged in" requires
//!   both the flag and a token.
//! - [`client::NavigationGuard`] — evaluated before every route
//!   transition; resolves pending verification, then allows, redirects to
//!   login (stashing the intended path), or bounces authenticated users
//!   off visitor views.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use nutriplan_client::{ApiConfig, client::browser_session};
//!
//! let handles = browser_session(ApiConfig::from_env_or_default())?;
//!
//! // Root component:
//! use_session_provider(handles.auth.clone());
//!
//! // Router hook:
//! match handles.guard.before_each(&location).await.target_path() {
//!     Some(path) => router.push(path),
//!     None => { /* proceed */ }
//! }
//!
//! // Any component:
//! let session = use_session();
//! if session.is_authenticated() { /* ... */ }
//! ```
//!
//! ## Error handling
//!
//! The pipeline never recovers from failures itself (the 401 teardown is
//! its only side effect) and retries nothing. Transport and status errors
//! surface as [`client::ApiError`]; the auth store converts them into
//! state transitions and user-displayable messages; the guard only ever
//! sees the store's settled state.

pub mod client;
pub mod config;
pub mod user;

pub use config::ApiConfig;
pub use user::UserProfile;
