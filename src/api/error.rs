use reqwest::StatusCode;
use thiserror::Error;

/// Errors surfaced by the API client.
///
/// The client is a thin pass-through: no retries, no backoff. Transport
/// and server failures are reported as-is for the UI to display.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server returned {status}: {message}")]
    Status { status: StatusCode, message: String },

    #[error("invalid API base URL: {0}")]
    BaseUrl(#[from] url::ParseError),

    #[error("student id is required for update")]
    MissingStudentId,
}

pub type ApiResult<T> = Result<T, ApiError>;
