use std::time::Duration;

use async_trait::async_trait;
use http::StatusCode;
use reqwest::Url;
use serde::Deserialize;

use crate::UpstreamError;

/// Payload code the upstream uses for "concurrent request rejected".
pub const CONTENTION_CODE: i64 = 10_500;

/// A fully-formed upstream request: final URL plus a label for logging.
///
/// The URL already carries every query parameter, access ticket included.
/// Log sites must use [`UpstreamRequest::label`], never the URL, so the
/// ticket stays out of the log stream.
#[derive(Clone, Debug)]
pub struct UpstreamRequest {
    url: Url,
    label: &'static str,
}

impl UpstreamRequest {
    /// Wrap a ready-to-send URL under a short log label.
    pub fn new(url: Url, label: &'static str) -> Self {
        Self { url, label }
    }

    /// Target URL, ticket included.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Short name for log lines; safe to print.
    pub fn label(&self) -> &'static str {
        self.label
    }
}

/// Raw upstream reply: status and body text, not yet interpreted.
#[derive(Clone, Debug)]
pub struct UpstreamResponse {
    status: StatusCode,
    body: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(rename = "Codigo")]
    codigo: Option<i64>,
}

impl UpstreamResponse {
    /// Build a response from its parts.
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// HTTP status of the reply.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Raw body text.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Consume the response, keeping only the body.
    pub fn into_body(self) -> String {
        self.body
    }

    /// Whether this reply matches the retryable contention signature:
    /// HTTP 500 with a JSON body carrying `Codigo: 10500`.
    ///
    /// No other error shape is retried.
    pub fn is_contention(&self) -> bool {
        self.status == StatusCode::INTERNAL_SERVER_ERROR
            && matches!(
                serde_json::from_str::<ErrorBody>(&self.body),
                Ok(ErrorBody {
                    codigo: Some(CONTENTION_CODE),
                })
            )
    }
}

/// Seam between the governor and the network.
///
/// Production code uses [`ReqwestTransport`]; tests substitute scripted
/// implementations to observe dispatch timing and inject failures.
#[async_trait]
pub trait UpstreamTransport: Send + Sync {
    /// Perform one GET against the upstream API.
    ///
    /// Implementations return `Ok` for any completed HTTP exchange, whatever
    /// the status; `Err` is reserved for exchanges that never completed.
    async fn get(&self, request: &UpstreamRequest) -> Result<UpstreamResponse, UpstreamError>;
}

/// Production transport backed by [`reqwest`].
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Build a transport with the given per-request timeout.
    pub fn new(request_timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(request_timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl UpstreamTransport for ReqwestTransport {
    async fn get(&self, request: &UpstreamRequest) -> Result<UpstreamResponse, UpstreamError> {
        let response = self.client.get(request.url().clone()).send().await?;
        let status = response.status();
        let body = response.text().await?;

        Ok(UpstreamResponse::new(status, body))
    }
}
