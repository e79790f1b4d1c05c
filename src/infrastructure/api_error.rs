// Errors raised by the outbound HTTP clients
use thiserror::Error;

/// Request URLs carry credentials (bot token, `appid`), so none of these
/// variants keep the URL.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed")]
    Transport(#[source] reqwest::Error),

    #[error("request timed out")]
    Timeout,

    #[error("request failed with status {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("malformed response: {0}")]
    Parse(String),

    #[error("request rejected: {0}")]
    Rejected(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        let e = e.without_url();
        if e.is_timeout() {
            ApiError::Timeout
        } else if e.is_decode() {
            ApiError::Parse(e.to_string())
        } else {
            ApiError::Transport(e)
        }
    }
}

/// Turn a non-2xx response into `ApiError::Status`, keeping the body for the log.
pub async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ApiError::Status { status, body })
}
