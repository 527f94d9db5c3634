use axum::Json;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use serde_json::json;
use tracing::error;

/// Failure of one outbound call to the Mercado Público API.
///
/// Whatever the shape, the original diagnostic (status, body, source) is kept
/// attached so callers and log sites can interpret it. Retryable contention
/// that exhausted its budget surfaces here as [`UpstreamError::Rejected`] with
/// the original `500`/`Codigo: 10500` payload.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    /// The HTTP exchange never completed (DNS, connect, timeout, ...).
    #[error("upstream transport failure: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The upstream answered with a non-success status.
    #[error("upstream rejected the request with HTTP {status}")]
    Rejected {
        /// HTTP status returned by the upstream.
        status: StatusCode,
        /// Raw response body, preserved verbatim for diagnostics.
        body: String,
    },

    /// A successful upstream response carried a body that is not valid JSON.
    #[error("unparseable upstream payload: {0}")]
    Payload(#[from] serde_json::Error),
}

impl From<reqwest::Error> for UpstreamError {
    fn from(err: reqwest::Error) -> Self {
        UpstreamError::Transport(Box::new(err))
    }
}

/// Outcome of one API request, mapped onto the HTTP boundary.
///
/// Validation failures never reach the governor; not-found is a distinct
/// outcome, not an error; upstream failures of any shape become a generic
/// server-error body while the detail goes to the logs.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Missing or malformed request parameter (caller's fault).
    #[error("{0}")]
    Validation(&'static str),

    /// The upstream call succeeded but matched no records.
    #[error("{0}")]
    NotFound(&'static str),

    /// The upstream call failed.
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": msg }))).into_response()
            }
            ApiError::NotFound(msg) => {
                (StatusCode::NOT_FOUND, Json(json!({ "error": msg }))).into_response()
            }
            ApiError::Upstream(err) => {
                error!(error = ?err, "upstream call failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Ocurrió un error al consultar la API externa." })),
                )
                    .into_response()
            }
        }
    }
}

/// Invalid or missing service configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required environment variable is not set.
    #[error("missing required environment variable {0}")]
    MissingVar(&'static str),

    /// An environment variable holds a value that cannot be used.
    #[error("invalid value for {var}: {reason}")]
    InvalidVar {
        /// Name of the offending variable.
        var: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

/// Failure while assembling the service at startup.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    /// Configuration could not be loaded or parsed.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The outbound HTTP client could not be constructed.
    #[error("failed to build upstream HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}
