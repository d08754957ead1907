//! Error types for NIC reassignment

use thiserror::Error;
use vim_types::ObjectKind;

/// Failures reported by a [`crate::ManagementClient`] implementation
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("Response decoding failed: {0}")]
    Decode(String),

    #[error("Session error: {0}")]
    Session(String),

    #[error("Timed out waiting for {0}")]
    Timeout(String),
}

/// Main error type for NIC reassignment
#[derive(Debug, Error)]
pub enum NicError {
    #[error("{kind} '{name}' not found")]
    NotFound { kind: ObjectKind, name: String },

    #[error("{kind} name '{name}' is ambiguous: {count} objects match")]
    Ambiguous {
        kind: ObjectKind,
        name: String,
        count: usize,
    },

    #[error("Virtual {label} could not be found.")]
    AdapterNotFound { label: String },

    #[error("Task {task} failed: {message}")]
    TaskFailed { task: String, message: String },

    #[error(transparent)]
    Client(#[from] ClientError),
}
