//! Lookup error types.

/// Errors from a single lookup request.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("HTTP error: {status} for {url}")]
    Http { status: u16, url: String },

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("Request error: {0}")]
    Request(String),
}

impl LookupError {
    /// Whether retrying the same request might succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Http { status, .. } => (500..600).contains(status) || *status == 429,
            Self::Timeout(_) | Self::Connection(_) => true,
            Self::Deserialization(_) | Self::Request(_) => false,
        }
    }
}

impl From<reqwest::Error> for LookupError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout(e.to_string())
        } else if e.is_connect() {
            Self::Connection(e.to_string())
        } else if e.is_decode() {
            Self::Deserialization(e.to_string())
        } else {
            Self::Request(e.to_string())
        }
    }
}

impl From<serde_json::Error> for LookupError {
    fn from(e: serde_json::Error) -> Self {
        Self::Deserialization(e.to_string())
    }
}
