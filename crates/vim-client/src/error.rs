//! Endpoint client errors

use dvs_nic_core::ClientError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VimApiError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Endpoint returned error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("Response parsing failed: {0}")]
    ParseError(String),

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("No password configured for user '{user}'")]
    MissingPassword { user: String },

    #[error("Timeout waiting for {0}")]
    Timeout(String),
}

impl From<VimApiError> for ClientError {
    fn from(err: VimApiError) -> Self {
        match err {
            VimApiError::Http(err) => ClientError::Transport(Box::new(err)),
            VimApiError::ApiError { status, message } => ClientError::Api { status, message },
            VimApiError::ParseError(message) => ClientError::Decode(message),
            VimApiError::Authentication(message) => ClientError::Session(message),
            err @ VimApiError::MissingPassword { .. } => ClientError::Session(err.to_string()),
            VimApiError::Timeout(what) => ClientError::Timeout(what),
        }
    }
}
