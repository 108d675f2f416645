//! Unified error types for apirelay.
//!
//! [`RelayError`] covers both startup failures (bad listen address,
//! unparsable origin URL) and per-request failures in the generic
//! request helper. Request-level variants are never fatal: the proxy
//! converts them into a 500 JSON response at the handler boundary.

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum RelayError {
    #[error("Invalid address: {0}")]
    AddressParse(#[from] std::net::AddrParseError),

    #[error("Invalid URL: {source}")]
    UrlParse {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("HTTP request failed: {source}")]
    HttpRequest {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Request timed out after {0}ms")]
    Timeout(u64),

    #[error("Upstream responded with status {0}")]
    UpstreamStatus(hyper::StatusCode),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("Health check failed with status {0}")]
    HealthCheckFailed(hyper::StatusCode),
}
