use thiserror::Error;

/// Translation key used when the backend rejects without a message
pub const UNEXPECTED: &str = "error.unexpected-error";

/// Failure of a backend call
#[derive(Debug, Error)]
pub enum ApiError {
    /// Connection, timeout or TLS failure
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx response without a usable envelope
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// `success: false`; the message may be a translation key
    #[error("{0}")]
    Rejected(String),

    #[error("malformed response: {0}")]
    Decode(String),

    /// The resource has no endpoint for this operation
    #[error("{resource} has no {operation} endpoint")]
    Unsupported {
        resource: String,
        operation: &'static str,
    },
}

impl ApiError {
    pub fn rejected(message: Option<String>) -> Self {
        Self::Rejected(
            message
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| UNEXPECTED.to_string()),
        )
    }
}
