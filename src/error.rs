//! Error types for lokai.

use thiserror::Error;

/// Primary error type for all client operations.
#[derive(Error, Debug)]
pub enum LokaiError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Model not found: {0}")]
    ModelNotFound(String),
}

/// Coarse classification used to decide between degrading and surfacing.
///
/// Conditions that always degrade (images on a non-vision model, a probe
/// miss) never become errors at all; they surface as warnings or default
/// values instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Server unreachable or too slow to answer.
    Connectivity,
    /// Non-JSON body or unexpected payload shape.
    MalformedResponse,
    /// Model absent from the server catalog.
    ModelNotFound,
    /// Any other server-reported failure.
    Api,
    Other,
}

impl LokaiError {
    /// Create an API error from a status code and body.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Classify this error into a category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Network(_) => ErrorCategory::Connectivity,
            Self::Serialization(_) => ErrorCategory::MalformedResponse,
            Self::ModelNotFound(_) => ErrorCategory::ModelNotFound,
            Self::Api { status, .. } if *status == 404 => ErrorCategory::ModelNotFound,
            Self::Api { .. } => ErrorCategory::Api,
            Self::Io(_) => ErrorCategory::Other,
        }
    }

    /// Whether the caller can proceed with degraded behavior instead of
    /// surfacing the failure.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self.category(),
            ErrorCategory::Connectivity
                | ErrorCategory::MalformedResponse
                | ErrorCategory::ModelNotFound
        )
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, LokaiError>;
