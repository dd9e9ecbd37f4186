//! Fetch error taxonomy

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FetchError {
    /// The API host failed the reachability probe; the run must not proceed
    #[error("server at {url} is unavailable: {reason}")]
    ServerUnavailable { url: String, reason: String },

    /// A single request failed (network, status or body); recovered as an absent result
    #[error("request to {url} failed: {reason}")]
    RequestFailed { url: String, reason: String },

    /// The HTTP client could not be configured
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(String),
}

impl FetchError {
    pub fn request_failed(url: &str, reason: impl Into<String>) -> Self {
        FetchError::RequestFailed {
            url: url.to_string(),
            reason: reason.into(),
        }
    }
}
