use thiserror::Error;

#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("embedding request to '{url}' failed: {message}")]
    RequestFailed { url: String, message: String },

    #[error("embedding service returned an invalid response: {reason}")]
    InvalidResponse { reason: String },

    #[error("embedding inference failed: {reason}")]
    InferenceFailed { reason: String },

    #[error("embedding has dimension {actual}, expected {expected}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("invalid embedder configuration: {reason}")]
    InvalidConfig { reason: String },
}

impl From<crate::constants::DimValidationError> for EmbeddingError {
    fn from(err: crate::constants::DimValidationError) -> Self {
        match err {
            crate::constants::DimValidationError::DimensionMismatch { expected, actual } => {
                EmbeddingError::DimensionMismatch { expected, actual }
            }
            other => EmbeddingError::InvalidConfig {
                reason: other.to_string(),
            },
        }
    }
}
