//! Unified error types for the status service and client.

use thiserror::Error;

/// Unified error type for the service.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Configuration loaded but failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// HTTP client construction or request error.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures of a single status fetch.
///
/// These never escape the client: they are rendered into
/// [`FetchState::Failed`](crate::client::FetchState::Failed) via `Display`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Connection refused, DNS failure, timeout and the like.
    #[error("{0}")]
    Transport(String),

    /// Server answered with a non-2xx status.
    #[error("HTTP error! status: {0}")]
    Status(u16),

    /// Body was not valid JSON or lacked expected fields.
    #[error("failed to parse status response: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        // reqwest's Display stops at "error sending request"; the alternate
        // anyhow form appends the cause chain (e.g. "Connection refused").
        FetchError::Transport(format!("{:#}", anyhow::Error::from(err)))
    }
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, AppError>;
