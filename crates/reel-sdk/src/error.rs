//! Error types for the Reel SDK

use reel_api_client::ApiError;
use thiserror::Error;

/// Result type for SDK operations
pub type Result<T> = std::result::Result<T, SdkError>;

/// SDK error types
///
/// Local validation failures never reach the network; everything else
/// is a failed backend call surfaced with its message.
#[derive(Debug, Error)]
pub enum SdkError {
    /// A form field failed local validation; nothing was sent
    #[error("Validation error: {0}")]
    Validation(String),

    /// A backend call failed
    #[error("Remote call error: {0}")]
    Remote(#[from] ApiError),
}
