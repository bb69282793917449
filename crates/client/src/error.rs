use reqwest::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ClientError>;

/// Failures talking to the SACCO API.
///
/// `Api` carries the server's own message untouched so callers can show it
/// verbatim.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid base_url: {0}")]
    InvalidBaseUrl(String),
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("{message}")]
    Api { status: StatusCode, message: String },
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl ClientError {
    /// HTTP status reported by the API, if the request got that far.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Network(err) => err.status(),
            Self::InvalidBaseUrl(_) | Self::MalformedResponse(_) => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self.status(),
            Some(StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN)
        )
    }
}
