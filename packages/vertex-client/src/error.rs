//! Error types for the Vertex AI client.

use thiserror::Error;

/// Result type for Vertex AI client operations.
pub type Result<T> = std::result::Result<T, VertexError>;

/// Vertex AI client errors.
#[derive(Debug, Error)]
pub enum VertexError {
    /// Network error (connection failed, stream interrupted)
    #[error("Network error: {0}")]
    Network(String),

    /// API error (non-2xx response, quota, permission)
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Parse error (invalid JSON, unexpected stream payload)
    #[error("Parse error: {0}")]
    Parse(String),
}
