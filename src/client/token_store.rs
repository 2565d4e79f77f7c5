//! In-memory session token slot.
//!
//! The bearer token lives in two places that are kept in sync by the auth
//! store: this in-memory slot, which the HTTP client's request interceptor
//! reads on every call, and the durable browser storage handled by
//! [`storage`](super::storage). The slot itself has no persistence duties;
//! it only answers "what token, if any, goes on the next request".

use std::sync::{Arc, Mutex};

/// Shared handle to the current bearer token.
///
/// Clones are cheap and all point at the same slot, so the interceptor,
/// the auth store, and the hook layer observe a single source of truth.
#[derive(Clone, Debug, Default)]
pub struct TokenStore {
    token: Arc<Mutex<Option<String>>>,
}

impl TokenStore {
    /// Creates an empty token slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the current token.
    pub fn set(&self, token: impl Into<String>) {
        let token = token.into();
        tracing::trace!("session token set");
        *self.token.lock().expect("token slot lock poisoned") = Some(token);
    }

    /// Removes the current token.
    ///
    /// Idempotent: clearing an already empty slot is a no-op.
    pub fn clear(&self) {
        let mut slot = self.token.lock().expect("token slot lock poisoned");
        if slot.take().is_some() {
            tracing::trace!("session token cleared");
        }
    }

    /// Returns a copy of the current token, if one is set.
    pub fn current(&self) -> Option<String> {
        self.token.lock().expect("token slot lock poisoned").clone()
    }

    /// Returns true if a token is currently set.
    pub fn is_set(&self) -> bool {
        self.token
            .lock()
            .expect("token slot lock poisoned")
            .is_some()
    }
}
