use thiserror::Error;

pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Failures talking to the collections backend or the email webhook.
///
/// The `Display` text is what ends up in the load-state error shown next to
/// the "try again" control, so keep it short.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP error! status: {status}")]
    Status { status: u16, body: String },

    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Unexpected response shape from {endpoint}: {message}")]
    Schema { endpoint: String, message: String },

    #[error("Invalid URL: {0}")]
    Url(String),
}

impl ApiError {
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
