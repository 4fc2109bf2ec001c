use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE};
use reqwest::Url;

use super::UploadError;

/// One fully-built upload request.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub url: Url,
    pub content_type: String,
    pub body: Vec<u8>,
}

/// Status and raw body of the service's reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// The network hop of an upload: send one POST, return what came back.
///
/// Implementations only fail with `UploadError::Transport`; status codes and
/// bodies are interpreted by `UploadClient`.
pub trait HttpTransport: Send + Sync {
    fn post(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, UploadError>> + Send;
}

/// Production transport backed by a pooled `reqwest::Client`.
#[derive(Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Client with a connect timeout and no overall request timeout.
    pub fn new(connect_timeout_secs: u64) -> Result<Self, UploadError> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(connect_timeout_secs))
            .build()
            .map_err(|e| UploadError::Transport(format!("Cannot build HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

impl HttpTransport for ReqwestTransport {
    async fn post(&self, request: HttpRequest) -> Result<HttpResponse, UploadError> {
        let length = request.body.len();
        let response = self
            .client
            .post(request.url)
            .header(CONTENT_TYPE, request.content_type)
            .header(CONTENT_LENGTH, length)
            .body(request.body)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    UploadError::Transport(format!("Cannot connect: {e}"))
                } else if e.is_timeout() {
                    UploadError::Transport(format!("Request timed out: {e}"))
                } else {
                    UploadError::Transport(e.to_string())
                }
            })?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| UploadError::Transport(format!("Failed to read response body: {e}")))?;

        Ok(HttpResponse {
            status,
            body: body.to_vec(),
        })
    }
}

/// Mock transport for testing. Returns a configurable reply and records
/// every request it receives.
pub struct MockTransport {
    reply: Result<HttpResponse, UploadError>,
    calls: AtomicUsize,
    last_request: Mutex<Option<HttpRequest>>,
}

impl MockTransport {
    pub fn replying(status: u16, body: &str) -> Self {
        Self::with_reply(Ok(HttpResponse::new(status, body)))
    }

    pub fn failing(message: &str) -> Self {
        Self::with_reply(Err(UploadError::Transport(message.to_string())))
    }

    pub fn with_reply(reply: Result<HttpResponse, UploadError>) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    /// Number of requests sent so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Most recent request, if any.
    pub fn last_request(&self) -> Option<HttpRequest> {
        self.last_request.lock().ok()?.clone()
    }
}

impl HttpTransport for MockTransport {
    async fn post(&self, request: HttpRequest) -> Result<HttpResponse, UploadError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_request.lock() {
            *last = Some(request);
        }
        self.reply.clone()
    }
}
