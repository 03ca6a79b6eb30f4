//! Error types for the Reel API client

use thiserror::Error;

/// Reel API client error
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Local asset could not be read
    #[error("Asset read error: {0}")]
    Asset(#[from] std::io::Error),

    /// Request lacked a valid session
    #[error("Unauthorized")]
    Unauthorized,

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Server returned an error
    #[error("Server error {status}: {message}")]
    Server { status: u16, message: String },
}

/// Result type for API operations
pub type Result<T> = std::result::Result<T, ApiError>;
