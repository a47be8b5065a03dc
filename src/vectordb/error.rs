use thiserror::Error;

/// Failures talking to the video embedding index.
#[derive(Debug, Error)]
pub enum VectorDbError {
    #[error("failed to connect to Qdrant at '{url}': {message}")]
    ConnectionFailed { url: String, message: String },

    /// Creating or inspecting a collection failed.
    #[error("failed to set up collection '{collection}': {message}")]
    CollectionSetupFailed { collection: String, message: String },

    #[error("collection not found: {collection}")]
    CollectionNotFound { collection: String },

    #[error("failed to write embeddings to '{collection}': {message}")]
    UpsertFailed { collection: String, message: String },

    #[error("failed to query '{collection}': {message}")]
    SearchFailed { collection: String, message: String },

    #[error("failed to count points in '{collection}': {message}")]
    CountFailed { collection: String, message: String },

    /// A vector or an existing collection disagrees with the embedding width.
    #[error("invalid vector dimension: expected {expected}, got {actual}")]
    InvalidDimension { expected: usize, actual: usize },
}
