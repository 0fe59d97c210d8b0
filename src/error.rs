//! Petition classifier error types

/// Petition classifier error types
#[derive(Debug, thiserror::Error)]
pub enum PetitionError {
    // Input errors
    #[error("Missing required argument. Usage: classify-petition <base64_encoded_json>")]
    MissingArgument,

    #[error("decode error: {0}")]
    Decode(String),

    #[error("{0}")]
    Validation(String),

    // Backend/network errors
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("empty response from model")]
    EmptyResponse,

    #[error("invalid input: {0}")]
    InvalidInput(String),

    // Data errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("data error: {0}")]
    DataError(String),

    // Configuration errors
    #[error("{0} environment variable is not set")]
    MissingToken(String),

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("backend not available in this build: {0}")]
    Unsupported(&'static str),

    /// Anything that does not fit the kinds above, e.g. a panicked worker.
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

impl PetitionError {
    /// Whether the error came from the remote inference API, either as a
    /// non-success status or a transport failure (connect, timeout, body).
    pub fn is_api_error(&self) -> bool {
        matches!(self, Self::Api { .. } | Self::Http(_))
    }
}

/// Result type alias for petition classifier operations
pub type Result<T> = std::result::Result<T, PetitionError>;
