//! Authenticated HTTP pipeline for the NutriPlan backend.
//!
//! Every backend call goes through [`ApiClient`], the single egress point.
//! A request passes, in order: the registered request interceptors (bearer
//! token injection lives here), the transport, then the registered
//! response interceptors (session-expiry handling lives here). The first
//! interceptor failure aborts the chain and rejects the call.
//!
//! The wire itself sits behind [`HttpTransport`]; production code uses
//! [`ReqwestTransport`], tests script a stub. No retries and no backoff:
//! callers receive either the response or a single [`ApiError`].

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

pub use reqwest::Method;

use crate::config::ApiConfig;

use super::navigator::Navigator;
use super::routes::LOGIN_PATH;
use super::token_store::TokenStore;

/// Errors produced by the HTTP pipeline.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Network-level failure: timeout, DNS, connection refused.
    #[error("request failed: {0}")]
    Transport(String),

    /// The backend answered 401; the session has been torn down.
    #[error("session expired")]
    Unauthorized,

    /// Any other non-success status, with the backend's message when the
    /// body carried one.
    #[error("backend returned status {status}")]
    Status {
        status: u16,
        message: Option<String>,
    },

    /// The response body did not decode into the expected shape.
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// A request interceptor rejected the call before it was sent.
    #[error("request rejected: {0}")]
    Interceptor(String),
}

impl ApiError {
    /// Returns the user-displayable message the backend attached, if any.
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            ApiError::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

/// An outgoing request as seen by the interceptor chain.
#[derive(Clone, Debug)]
pub struct ApiRequest {
    pub method: Method,
    /// Absolute URL, already joined with the configured base.
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl ApiRequest {
    fn new(method: Method, url: String) -> Self {
        Self {
            method,
            url,
            headers: Vec::new(),
            body: None,
        }
    }

    /// Sets a header, replacing any existing value (names compare
    /// case-insensitively).
    pub fn set_header(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self
            .headers
            .iter_mut()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
        {
            Some(existing) => existing.1 = value,
            None => self.headers.push((name.to_string(), value)),
        }
    }

    /// Looks up a header by name, case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// A response as seen by the interceptor chain and the verb helpers.
#[derive(Clone, Debug)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    /// True for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decodes the body as JSON into `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        serde_json::from_str(&self.body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Extracts a displayable error message from the body.
    ///
    /// The frontend convention is a `message` field; the backend's own
    /// errors arrive as FastAPI `detail`. Both are accepted.
    pub fn error_message(&self) -> Option<String> {
        let value: Value = serde_json::from_str(&self.body).ok()?;
        value
            .get("message")
            .and_then(Value::as_str)
            .or_else(|| value.get("detail").and_then(Value::as_str))
            .map(str::to_string)
    }
}

/// The wire beneath the interceptor pipeline.
#[allow(async_fn_in_trait)]
pub trait HttpTransport {
    /// Sends a prepared request and returns the raw response.
    ///
    /// Transport errors (timeout, DNS, refused connection) come back as
    /// [`ApiError::Transport`]; any HTTP status is a successful `execute`.
    async fn execute(&self, request: ApiRequest) -> Result<RawResponse, ApiError>;
}

/// Production transport backed by reqwest.
///
/// Carries the fixed request timeout on native targets and never forwards
/// cookies or other ambient credentials.
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    http: reqwest::Client,
}

impl ReqwestTransport {
    /// Builds the transport from the backend configuration.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        #[cfg(not(target_arch = "wasm32"))]
        let builder = reqwest::Client::builder().timeout(config.timeout);

        // reqwest exposes no timeout on wasm; the browser fetch stack
        // enforces its own limits there.
        #[cfg(target_arch = "wasm32")]
        let builder = {
            let _ = config;
            reqwest::Client::builder()
        };

        let http = builder
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Ok(Self { http })
    }
}

impl HttpTransport for ReqwestTransport {
    async fn execute(&self, request: ApiRequest) -> Result<RawResponse, ApiError> {
        let mut builder = self.http.request(request.method.clone(), &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Ok(RawResponse { status, body })
    }
}

/// Interceptor run against every outgoing request, in registration order.
pub type RequestInterceptor = Box<dyn Fn(&mut ApiRequest) -> Result<(), ApiError> + Send + Sync>;

/// Interceptor run against every incoming response, in registration order.
pub type ResponseInterceptor = Box<dyn Fn(&RawResponse) -> Result<(), ApiError> + Send + Sync>;

/// Injects the current bearer token into outgoing requests.
///
/// Requests go out untouched while no token is set.
pub fn bearer_interceptor(tokens: TokenStore) -> RequestInterceptor {
    Box::new(move |request| {
        if let Some(token) = tokens.current() {
            request.set_header("Authorization", format!("Bearer {}", token));
        }
        Ok(())
    })
}

/// Tears the session down on any 401 response.
///
/// Clears the in-memory token, hard-redirects to the login view (a full
/// page load, not a router transition), and rejects with
/// [`ApiError::Unauthorized`] so the caller's error path still runs. Runs
/// at most once per response: the chain short-circuits on the rejection.
pub fn session_expiry_interceptor(
    tokens: TokenStore,
    navigator: Arc<dyn Navigator>,
) -> ResponseInterceptor {
    Box::new(move |response| {
        if response.status == 401 {
            tracing::warn!("401 from backend, abandoning session");
            tokens.clear();
            navigator.hard_redirect(LOGIN_PATH);
            return Err(ApiError::Unauthorized);
        }
        Ok(())
    })
}

/// The single egress point for backend calls.
pub struct ApiClient<T = ReqwestTransport> {
    config: ApiConfig,
    transport: T,
    request_interceptors: Vec<RequestInterceptor>,
    response_interceptors: Vec<ResponseInterceptor>,
}

impl ApiClient<ReqwestTransport> {
    /// Creates a client over the production reqwest transport.
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        let transport = ReqwestTransport::new(&config)?;
        Ok(Self::with_transport(config, transport))
    }
}

impl<T: HttpTransport> ApiClient<T> {
    /// Creates a client over an explicit transport.
    pub fn with_transport(config: ApiConfig, transport: T) -> Self {
        Self {
            config,
            transport,
            request_interceptors: Vec::new(),
            response_interceptors: Vec::new(),
        }
    }

    /// Appends a request interceptor to the chain.
    pub fn with_request_interceptor(mut self, interceptor: RequestInterceptor) -> Self {
        self.request_interceptors.push(interceptor);
        self
    }

    /// Appends a response interceptor to the chain.
    pub fn with_response_interceptor(mut self, interceptor: ResponseInterceptor) -> Self {
        self.response_interceptors.push(interceptor);
        self
    }

    /// The configuration the client was built from.
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Runs a request through the full pipeline.
    ///
    /// Non-success statuses come back as [`ApiError::Status`] (with the
    /// backend message when present) unless a response interceptor already
    /// rejected with something more specific.
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<RawResponse, ApiError> {
        let mut request = ApiRequest::new(method, self.config.endpoint(path));
        request.set_header("Accept", "application/json");
        request.body = body;

        for interceptor in &self.request_interceptors {
            interceptor(&mut request)?;
        }

        tracing::trace!("{} {}", request.method, request.url);
        let response = self.transport.execute(request).await?;

        for interceptor in &self.response_interceptors {
            interceptor(&response)?;
        }

        if response.is_success() {
            Ok(response)
        } else {
            Err(ApiError::Status {
                status: response.status,
                message: response.error_message(),
            })
        }
    }

    /// GET `path`, decoding the JSON response into `R`.
    pub async fn get<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
        self.send(Method::GET, path, None).await?.json()
    }

    /// POST `body` to `path`, decoding the JSON response into `R`.
    pub async fn post<B: Serialize, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<R, ApiError> {
        self.send(Method::POST, path, Some(to_json(body)?)).await?.json()
    }

    /// PUT `body` to `path`, decoding the JSON response into `R`.
    pub async fn put<B: Serialize, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<R, ApiError> {
        self.send(Method::PUT, path, Some(to_json(body)?)).await?.json()
    }

    /// PATCH `body` to `path`, decoding the JSON response into `R`.
    pub async fn patch<B: Serialize, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<R, ApiError> {
        self.send(Method::PATCH, path, Some(to_json(body)?))
            .await?
            .json()
    }

    /// DELETE `path`, decoding the JSON response into `R`.
    pub async fn delete<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
        self.send(Method::DELETE, path, None).await?.json()
    }
}

fn to_json<B: Serialize>(body: &B) -> Result<Value, ApiError> {
    serde_json::to_value(body).map_err(|e| ApiError::Decode(e.to_string()))
}
