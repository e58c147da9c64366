use thiserror::Error;

/// Application-wide error type for the push sender and its CLI.
///
/// Gateway rejections and transport failures are kept apart so callers can
/// inspect the gateway's response body when they need to.
#[derive(Error, Debug)]
pub enum AppError {
    /// Validation error with field-specific details
    #[error("Validation failed for {field}: {reason}")]
    Validation { field: String, reason: String },

    /// Configuration error with key information
    #[error("Configuration error: {key}")]
    Configuration {
        key: String,
        #[source]
        source: anyhow::Error,
    },

    /// Payload could not be encoded as JSON
    #[error("Serialization failed: {context}")]
    Serialization {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// DNS, connect, TLS or timeout failure before a response was received
    #[error("Transport error while calling {url}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Gateway answered with a non-success status
    #[error("Gateway rejected request with status {status}: {body}")]
    Gateway { status: u16, body: String },

    /// Internal error for unexpected failures
    #[error("Internal error")]
    Internal {
        #[source]
        source: anyhow::Error,
    },
}

impl AppError {
    /// HTTP status returned by the gateway, if the failure carries one
    pub fn gateway_status(&self) -> Option<u16> {
        match self {
            AppError::Gateway { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        AppError::Internal { source: error }
    }
}

impl From<crate::config::error::ConfigError> for AppError {
    fn from(error: crate::config::error::ConfigError) -> Self {
        AppError::Configuration {
            key: "settings".to_string(),
            source: anyhow::Error::new(error),
        }
    }
}

/// Type alias for Result with AppError to simplify function signatures
pub type AppResult<T> = Result<T, AppError>;
