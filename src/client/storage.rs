//! Durable token persistence.
//!
//! A single key in client-local storage carries the session token across
//! page reloads; absence of the key means logged out. The auth store is
//! the only writer and keeps this copy in lockstep with the in-memory
//! [`TokenStore`](super::token_store::TokenStore).
//!
//! Storage is injected behind [`DurableStorage`] at wiring time so the
//! session logic has no ambient browser dependency: real apps use
//! [`BrowserStorage`], native builds and tests use [`MemoryStorage`].

use std::sync::{Arc, Mutex};

/// localStorage key holding the raw bearer string.
pub const TOKEN_STORAGE_KEY: &str = "token";

/// Durable slot for the session token.
pub trait DurableStorage: Send + Sync {
    /// Reads the stored token, `None` when absent.
    fn load(&self) -> Option<String>;

    /// Writes the token, replacing any previous value.
    fn save(&self, token: &str);

    /// Removes the token. A no-op when nothing is stored.
    fn clear(&self);
}

/// Browser localStorage under [`TOKEN_STORAGE_KEY`].
///
/// Outside wasm builds every operation is a logged no-op, mirroring the
/// split the rest of the browser-facing code uses.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStorage;

impl BrowserStorage {
    /// Creates a handle to the browser's localStorage.
    pub fn new() -> Self {
        Self
    }

    #[cfg(target_arch = "wasm32")]
    fn local_storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }
}

#[cfg(target_arch = "wasm32")]
impl DurableStorage for BrowserStorage {
    fn load(&self) -> Option<String> {
        Self::local_storage()?.get_item(TOKEN_STORAGE_KEY).ok()?
    }

    fn save(&self, token: &str) {
        if let Some(storage) = Self::local_storage() {
            let _ = storage.set_item(TOKEN_STORAGE_KEY, token);
            tracing::trace!("token saved to localStorage");
        }
    }

    fn clear(&self) {
        if let Some(storage) = Self::local_storage() {
            let _ = storage.remove_item(TOKEN_STORAGE_KEY);
            tracing::trace!("token removed from localStorage");
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl DurableStorage for BrowserStorage {
    fn load(&self) -> Option<String> {
        tracing::trace!("localStorage read skipped (non-wasm)");
        None
    }

    fn save(&self, _token: &str) {
        tracing::trace!("localStorage write skipped (non-wasm)");
    }

    fn clear(&self) {
        tracing::trace!("localStorage clear skipped (non-wasm)");
    }
}

/// In-process token storage for native builds and tests.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    slot: Arc<Mutex<Option<String>>>,
}

impl MemoryStorage {
    /// Creates an empty in-memory slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a slot pre-seeded with a token, as if a previous session
    /// had persisted it.
    pub fn with_token(token: impl Into<String>) -> Self {
        let storage = Self::new();
        storage.save(&token.into());
        storage
    }
}

impl DurableStorage for MemoryStorage {
    fn load(&self) -> Option<String> {
        self.slot.lock().expect("storage lock poisoned").clone()
    }

    fn save(&self, token: &str) {
        *self.slot.lock().expect("storage lock poisoned") = Some(token.to_string());
    }

    fn clear(&self) {
        *self.slot.lock().expect("storage lock poisoned") = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage_starts_empty() {
        let storage = MemoryStorage::new();
        assert!(storage.load().is_none());
    }

    #[test]
    fn test_memory_storage_save_and_load() {
        let storage = MemoryStorage::new();
        storage.save("abc");
        assert_eq!(storage.load().as_deref(), Some("abc"));
    }

    #[test]
    fn test_memory_storage_clear() {
        let storage = MemoryStorage::with_token("abc");
        storage.clear();
        assert!(storage.load().is_none());
    }

    #[test]
    fn test_memory_storage_clear_when_empty() {
        let storage = MemoryStorage::new();
        storage.clear();
        assert!(storage.load().is_none());
    }

    #[test]
    fn test_memory_storage_clones_share_state() {
        let storage = MemoryStorage::new();
        let other = storage.clone();
        storage.save("shared");
        assert_eq!(other.load().as_deref(), Some("shared"));
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_browser_storage_is_inert_off_wasm() {
        let storage = BrowserStorage::new();
        storage.save("abc");
        assert!(storage.load().is_none());
        storage.clear();
    }
}
