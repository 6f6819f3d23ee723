//! Error types for the analytics core.

use thiserror::Error;

/// The main error type for all analytics operations.
#[derive(Error, Debug)]
pub enum AnalyticsError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// HTTP request with middleware failed
    #[error("HTTP request failed: {0}")]
    HttpMiddleware(#[from] reqwest_middleware::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing error
    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),

    /// The stats API answered with a non-2xx status
    #[error("OpenDota API error: {0}")]
    Upstream(UpstreamError),

    /// Malformed identifier or argument, rejected before any network call
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The durable cache store could not be reached
    #[error("Cache store unavailable: {0}")]
    CacheUnavailable(String),

    /// Operation timed out
    #[error("Request timed out")]
    Timeout,

    /// Invalid response from the API
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl AnalyticsError {
    /// Whether this error originated from talking to the stats API.
    ///
    /// Transport failures, non-2xx statuses and undecodable bodies all count.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            Self::Http(_)
                | Self::HttpMiddleware(_)
                | Self::Upstream(_)
                | Self::Timeout
                | Self::InvalidResponse(_)
        )
    }

    /// HTTP status of an upstream failure, when the API produced one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Upstream(err) => Some(err.status),
            Self::Http(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

impl From<redis::RedisError> for AnalyticsError {
    fn from(err: redis::RedisError) -> Self {
        Self::CacheUnavailable(err.to_string())
    }
}

/// A non-2xx answer from the stats API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamError {
    /// HTTP status code
    pub status: u16,
    /// Status text or response body
    pub message: String,
}

impl UpstreamError {
    /// Create a new upstream error from a status code and message.
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// Check if the API is throttling us.
    pub fn is_rate_limit(&self) -> bool {
        self.status == 429
    }

    /// Check if the requested resource does not exist (private or unknown profile).
    pub fn is_not_found(&self) -> bool {
        self.status == 404
    }

    /// Check if the API itself is failing.
    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.status)
    }
}

impl std::fmt::Display for UpstreamError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.status, self.message)
    }
}
