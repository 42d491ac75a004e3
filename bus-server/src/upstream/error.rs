//! Upstream client error types.

/// Errors talking to the upstream transit-data API.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned a non-success status
    #[error("API error {status}: {message}")]
    Status { status: u16, message: String },

    /// Response body was not the JSON we expected
    #[error("JSON parse error: {message}")]
    Json {
        message: String,
        body: Option<String>,
    },

    /// Mock fixture could not be loaded
    #[error("fixture error: {0}")]
    Fixture(String),
}

impl UpstreamError {
    /// Whether the request timed out rather than failing outright.
    pub fn is_timeout(&self) -> bool {
        matches!(self, UpstreamError::Http(e) if e.is_timeout())
    }
}
