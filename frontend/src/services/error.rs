use thiserror::Error;

use crate::domain::validation::ValidationErrors;

/// Failure of one API action.
///
/// None of these are fatal: the screen that issued the request shows the
/// message and stays usable.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// The request never got a response
    #[error("Network error: {0}")]
    Network(String),

    /// Non-2xx response carrying a JSON `{message}` or `{error}` body
    #[error("{message}")]
    Http { status: u16, message: String },

    /// Non-2xx response without a readable body
    #[error("HTTP {status}: {status_text}")]
    HttpStatus { status: u16, status_text: String },

    /// The token was rejected; the session has been ended
    #[error("Session expired, please log in again")]
    Unauthorized,

    /// Rejected before sending
    #[error("{0}")]
    Validation(#[from] ValidationErrors),

    #[error("Unexpected response from server: {0}")]
    Decode(String),

    #[error("Invalid record in response: {0}")]
    Mapping(String),
}

impl ApiError {
    /// HTTP status behind this error, if the server answered
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } | ApiError::HttpStatus { status, .. } => Some(*status),
            ApiError::Unauthorized => Some(401),
            _ => None,
        }
    }

    /// Whether running the same request again can succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::Network(_) => true,
            ApiError::Http { status, .. } | ApiError::HttpStatus { status, .. } => {
                *status == 408 || *status == 429 || (500..600).contains(status)
            }
            _ => false,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(error: reqwest::Error) -> Self {
        ApiError::Network(error.to_string())
    }
}
