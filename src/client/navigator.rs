//! Hard browser navigation.
//!
//! A hard redirect replaces the page outright instead of going through the
//! client-side router, discarding all in-memory application state. The 401
//! interceptor uses it deliberately: once a token is rejected, a clean
//! reload at the login view is the simplest safe recovery. Router-mediated
//! transitions are a different mechanism entirely and are expressed as
//! [`GuardDecision`](super::guard::GuardDecision) values.

/// Performs hard (non-router) navigation.
pub trait Navigator: Send + Sync {
    /// Abandons the current page and loads `path` from scratch.
    fn hard_redirect(&self, path: &str);
}

/// Navigator backed by `window.location`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserNavigator;

impl BrowserNavigator {
    /// Creates a handle to the browser's location API.
    pub fn new() -> Self {
        Self
    }
}

#[cfg(target_arch = "wasm32")]
impl Navigator for BrowserNavigator {
    fn hard_redirect(&self, path: &str) {
        tracing::trace!("hard redirect to {}", path);
        if let Some(window) = web_sys::window() {
            let _ = window.location().set_href(path);
        } else {
            tracing::error!("no window object, cannot redirect to {}", path);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Navigator for BrowserNavigator {
    fn hard_redirect(&self, path: &str) {
        tracing::warn!("hard redirect to {} skipped (non-wasm)", path);
    }
}
