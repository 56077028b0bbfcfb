//! Error types for the telesieve data model.
//!
//! Filters themselves never fail; errors only arise when decoding payloads.

use thiserror::Error;

/// Errors that can occur while decoding Bot API payloads.
#[derive(Debug, Error)]
pub enum ModelError {
    /// The payload is not valid JSON or does not match the expected shape.
    #[error("failed to decode payload: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Result type for model operations.
pub type ModelResult<T> = Result<T, ModelError>;
