//! Error types for bptrend

use thiserror::Error;

/// Errors that can occur at the parse/encode boundary.
///
/// The numeric transforms themselves are total over their input domain and
/// never fail; errors only arise reading or writing JSON.
#[derive(Debug, Error)]
pub enum ComputeError {
    #[error("Failed to parse reading payload: {0}")]
    ParseError(String),

    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Encoding error: {0}")]
    EncodingError(String),
}
