//! Browser-side session plumbing.
//!
//! This module contains everything between the views and the backend:
//! - `token_store` / `storage`: the two synchronized token copies
//! - `http`: the interceptor pipeline every backend call goes through
//! - `auth`: the session lifecycle store
//! - `routes` / `guard`: route metadata and the navigation gatekeeper
//! - `navigator`: the hard-redirect seam the 401 path uses
//! - `endpoints`: pass-through wrappers for the resource endpoints
//! - `use_session`: the Dioxus provider/hook layer and standard wiring
//!
//! # Example
//!
//! ```rust,ignore
//! use nutriplan_client::client::{browser_session, use_session_provider};
//! use nutriplan_client::ApiConfig;
//!
//! let handles = browser_session(ApiConfig::from_env_or_default())?;
//! // In the root component:
//! use_session_provider(handles.auth.clone());
//! // In the router's before-navigation hook:
//! let decision = handles.guard.before_each(&location).await;
//! ```

pub mod auth;
pub mod endpoints;
pub mod guard;
pub mod http;
pub mod navigator;
pub mod routes;
pub mod storage;
pub mod token_store;
pub mod use_session;

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used types and functions
pub use auth::{AuthState, AuthStore, Credentials, LOGIN_FALLBACK_MESSAGE};
pub use guard::{GuardDecision, GuardPolicy, NavigationGuard, VisitorPolicy};
pub use http::{
    ApiClient, ApiError, HttpTransport, ReqwestTransport, bearer_interceptor,
    session_expiry_interceptor,
};
pub use navigator::{BrowserNavigator, Navigator};
pub use routes::{Route, RouteLocation, RouteMeta, app_routes, resolve};
pub use storage::{BrowserStorage, DurableStorage, MemoryStorage, TOKEN_STORAGE_KEY};
pub use token_store::TokenStore;
pub use use_session::{
    SessionContext, SessionHandles, browser_session, use_session, use_session_provider,
};
