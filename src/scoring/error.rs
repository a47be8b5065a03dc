use thiserror::Error;
use tokio::sync::AcquireError;

use crate::constants::DimValidationError;
use crate::embedding::{AlignmentError, EmbeddingError};
use crate::vectordb::VectorDbError;

/// Infrastructure failures the pipeline cannot absorb.
///
/// Punishment and floor outcomes are not errors; see
/// [`BatchOutcome`](super::BatchOutcome).
#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("embedding service error: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("vector index error: {0}")]
    Index(#[from] VectorDbError),

    #[error("pipeline sequences misaligned: {0}")]
    Misaligned(#[from] AlignmentError),

    #[error("embedding dimension check failed: {0}")]
    Dimension(#[from] DimValidationError),

    #[error("concurrency gate closed")]
    GateClosed(#[from] AcquireError),

    #[error("no candidates to sample from")]
    EmptySample,
}
