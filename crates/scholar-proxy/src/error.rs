//! Error taxonomy for the publications proxy.
//!
//! Uses `thiserror` for structured error handling. Every failure the proxy can
//! hit falls into one of four kinds, and each kind maps to a fixed HTTP status
//! so the handler never has to guess.

use serde_json::Value;

/// Errors from the proxy's publication-page pipeline.
#[derive(thiserror::Error, Debug)]
pub enum ProxyError {
    /// A required request parameter (scholar id or API credential) is missing.
    /// No upstream call is attempted when this is raised.
    #[error("Missing scholarId or serpApiKey")]
    InvalidRequest,

    /// SerpAPI was reachable but answered with a non-success status.
    #[error("SerpAPI error: {status}")]
    Upstream {
        /// HTTP status code returned by SerpAPI.
        status: u16,
        /// Raw upstream response body, kept for diagnostics.
        body: String,
    },

    /// SerpAPI answered with success but the payload had no usable
    /// `articles` list (missing, wrong type, or undecodable entries).
    #[error("No articles found in SerpAPI response")]
    UpstreamSchema {
        /// The raw payload that failed shape validation.
        data: Value,
    },

    /// Anything else: transport failure, serialization failure, etc.
    #[error("Failed to fetch publications: {0}")]
    Unexpected(String),
}

impl ProxyError {
    /// Create an upstream error from a status code and raw body.
    #[must_use]
    pub fn upstream(status: u16, body: impl Into<String>) -> Self {
        Self::Upstream { status, body: body.into() }
    }

    /// Create a schema error carrying the unparseable payload.
    #[must_use]
    pub fn upstream_schema(data: Value) -> Self {
        Self::UpstreamSchema { data }
    }

    /// Create an unexpected error.
    #[must_use]
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected(message.into())
    }

    /// HTTP status the proxy reports for this error.
    ///
    /// Upstream failures pass the upstream status through; schema failures
    /// are treated as 404 per the proxy's external contract.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::InvalidRequest => 400,
            Self::Upstream { status, .. } => *status,
            Self::UpstreamSchema { .. } => 404,
            Self::Unexpected(_) => 500,
        }
    }
}

impl From<reqwest::Error> for ProxyError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            // A hung upstream surfaces as an upstream failure, not a 500,
            // so the UI shows a failure instead of spinning.
            Self::upstream(504, "request to SerpAPI timed out")
        } else {
            Self::unexpected(err.to_string())
        }
    }
}

impl From<reqwest_middleware::Error> for ProxyError {
    fn from(err: reqwest_middleware::Error) -> Self {
        match err {
            reqwest_middleware::Error::Reqwest(e) => Self::from(e),
            reqwest_middleware::Error::Middleware(e) => Self::unexpected(e.to_string()),
        }
    }
}

impl From<serde_json::Error> for ProxyError {
    fn from(err: serde_json::Error) -> Self {
        Self::unexpected(format!("invalid JSON from SerpAPI: {err}"))
    }
}

/// Result type alias for proxy operations.
pub type ProxyResult<T> = Result<T, ProxyError>;
