//! Backend connection configuration.
//!
//! This module provides the configuration the HTTP client is built from:
//! the backend base address and the fixed request timeout. Configuration is
//! either constructed programmatically or loaded from the compile-time
//! `NUTRIPLAN_API_URL` environment variable (see `build.rs`, which loads a
//! `.env` file into the compile environment).

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Base address used when no configuration is supplied.
///
/// Matches the development backend (`uvicorn` on port 8081).
pub const DEFAULT_BASE_URL: &str = "http://localhost:8081";

/// Fixed timeout applied to every backend request.
///
/// Calls that exceed it fail with a transport error; there is no retry.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Connection settings for the NutriPlan backend.
///
/// # Fields
///
/// - `base_url`: backend origin, e.g. `http://localhost:8081`
/// - `timeout`: per-request timeout, fixed at [`REQUEST_TIMEOUT`]
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ApiConfig {
    /// Backend origin the client sends every request to.
    pub base_url: String,

    /// Per-request timeout.
    ///
    /// Applied to the native reqwest client builder; on wasm targets the
    /// browser's fetch stack governs instead (reqwest exposes no timeout
    /// there).
    pub timeout: Duration,
}

impl ApiConfig {
    /// Creates a configuration pointing at the given backend origin.
    ///
    /// # Example
    ///
    /// ```
    /// # use nutriplan_client::ApiConfig;
    /// let config = ApiConfig::new("https://api.nutriplan.example");
    /// assert_eq!(config.base_url, "https://api.nutriplan.example");
    /// ```
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: REQUEST_TIMEOUT,
        }
    }

    /// Loads the configuration from the compile-time `NUTRIPLAN_API_URL`
    /// environment variable.
    ///
    /// Returns `None` if the variable was not set when the crate was built.
    pub fn from_env() -> Option<Self> {
        option_env!("NUTRIPLAN_API_URL").map(Self::new)
    }

    /// Loads the configuration from the compile environment, falling back
    /// to [`DEFAULT_BASE_URL`] for development builds.
    ///
    /// # Example
    ///
    /// ```
    /// # use nutriplan_client::ApiConfig;
    /// let config = ApiConfig::from_env_or_default();
    /// assert!(!config.base_url.is_empty());
    /// ```
    pub fn from_env_or_default() -> Self {
        Self::from_env().unwrap_or_else(|| {
            tracing::warn!(
                "NUTRIPLAN_API_URL not set at build time, using {}",
                DEFAULT_BASE_URL
            );
            Self::new(DEFAULT_BASE_URL)
        })
    }

    /// Returns the absolute URL for an endpoint path.
    ///
    /// Accepts paths with or without a leading slash, mirroring how the
    /// backend routes are written down in different places.
    ///
    /// # Example
    ///
    /// ```
    /// # use nutriplan_client::ApiConfig;
    /// let config = ApiConfig::new("http://localhost:8081/");
    /// assert_eq!(
    ///     config.endpoint("api/v1/users/me"),
    ///     "http://localhost:8081/api/v1/users/me"
    /// );
    /// assert_eq!(
    ///     config.endpoint("/api/v1/users/me"),
    ///     "http://localhost:8081/api/v1/users/me"
    /// );
    /// ```
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
