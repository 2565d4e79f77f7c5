//! Test doubles shared by the pipeline, store, and guard tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use super::http::{ApiError, ApiRequest, HttpTransport, RawResponse};
use super::navigator::Navigator;

/// Transport that replays scripted responses and records every request.
#[derive(Clone, Default)]
pub struct StubTransport {
    responses: Arc<Mutex<VecDeque<Result<RawResponse, ApiError>>>>,
    requests: Arc<Mutex<Vec<ApiRequest>>>,
}

impl StubTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a response with the given status and body.
    pub fn push_response(&self, status: u16, body: &str) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(RawResponse {
                status,
                body: body.to_string(),
            }));
    }

    /// Queues a transport-level failure.
    pub fn push_error(&self, error: ApiError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    /// Requests seen so far, in order.
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl HttpTransport for StubTransport {
    async fn execute(&self, request: ApiRequest) -> Result<RawResponse, ApiError> {
        self.requests.lock().unwrap().push(request.clone());
        match self.responses.lock().unwrap().pop_front() {
            Some(result) => result,
            None => panic!("no scripted response for {} {}", request.method, request.url),
        }
    }
}

/// Navigator that records hard redirects instead of performing them.
#[derive(Clone, Default)]
pub struct RecordingNavigator {
    redirects: Arc<Mutex<Vec<String>>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Redirect targets seen so far, in order.
    pub fn redirects(&self) -> Vec<String> {
        self.redirects.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn hard_redirect(&self, path: &str) {
        self.redirects.lock().unwrap().push(path.to_string());
    }
}
