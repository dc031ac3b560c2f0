use termlens_core::NormalizeError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Rejected client-side before any request was sent.
    #[error("{0}")]
    Validation(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server returned {status}: {body}")]
    Server { status: u16, body: String },

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Malformed(#[from] NormalizeError),

    /// 2xx response whose body is not shaped like the endpoint's contract.
    #[error("unexpected response shape: {0}")]
    Unexpected(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
