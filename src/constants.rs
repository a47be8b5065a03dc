//! Scoring thresholds and bounds.
//!
//! Runtime overrides flow through
//! [`ScoringPolicy`](crate::config::ScoringPolicy).
//!
//! Every claimed and computed embedding has the same fixed width, carried at
//! runtime by [`DimConfig`].

use std::time::Duration;

/// Output width of the multimodal embedding model.
pub const DEFAULT_EMBEDDING_DIM: usize = 1024;

/// Shortest clip (seconds, inclusive) that survives the metadata filter.
pub const MIN_VIDEO_LENGTH: u64 = 5;

/// Longest clip (seconds, inclusive) that survives the metadata filter.
pub const MAX_VIDEO_LENGTH: u64 = 120;

/// Novelty below this marks an item as a near-duplicate.
pub const DIFFERENCE_THRESHOLD: f32 = 0.05;

/// Loose-match cosine threshold (strictly greater than).
pub const SIMILARITY_THRESHOLD: f32 = 1.0 - DIFFERENCE_THRESHOLD;

/// Absolute tolerance of the strict (element-wise) match.
pub const STRICT_MATCH_ATOL: f32 = 1e-4;

/// Relative tolerance of the strict (element-wise) match.
pub const STRICT_MATCH_RTOL: f32 = 1e-5;

/// Floor applied to every non-punished score.
pub const MIN_SCORE: f32 = 0.005;

/// Score returned when a batch is caught fabricating content.
pub const FAKE_VIDEO_PUNISHMENT: f32 = -5.0;

/// Scores above this are logged with their metadata.
pub const HIGH_SCORE_LOG_THRESHOLD: f32 = 0.4;

pub const DEFAULT_CHECK_PROBABILITY: f64 = 0.1;

pub const VIDEO_DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(10);

/// Capacity of the process-wide download gate.
pub const DOWNLOAD_CONCURRENCY: usize = 5;

/// Capacity of the process-wide embedding gate (one shared accelerator).
pub const EMBEDDING_CONCURRENCY: usize = 1;

/// Embedding width agreed on by the embedder, the index and the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DimConfig {
    pub embedding_dim: usize,
}

impl Default for DimConfig {
    fn default() -> Self {
        Self::new(DEFAULT_EMBEDDING_DIM)
    }
}

impl DimConfig {
    pub const fn new(embedding_dim: usize) -> Self {
        Self { embedding_dim }
    }

    pub fn validate(&self) -> Result<(), DimValidationError> {
        match self.embedding_dim {
            0 => Err(DimValidationError::ZeroDimension),
            _ => Ok(()),
        }
    }

    /// Rejects a claimed or computed vector of the wrong width.
    pub fn check(&self, vector: &[f32]) -> Result<(), DimValidationError> {
        validate_embedding_dim(vector.len(), self.embedding_dim)
    }

    pub fn vector_size(&self) -> u64 {
        self.embedding_dim as u64
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DimValidationError {
    #[error("embedding dimension cannot be zero")]
    ZeroDimension,

    #[error("embedding has {actual} values, expected {expected}")]
    DimensionMismatch { expected: usize, actual: usize },
}

/// Fails unless `actual == expected`.
///
/// ```
/// use vidscore::constants::{validate_embedding_dim, DEFAULT_EMBEDDING_DIM};
///
/// let claimed = vec![0.0_f32; 1024];
/// assert!(validate_embedding_dim(claimed.len(), DEFAULT_EMBEDDING_DIM).is_ok());
/// assert!(validate_embedding_dim(768, DEFAULT_EMBEDDING_DIM).is_err());
/// ```
pub fn validate_embedding_dim(actual: usize, expected: usize) -> Result<(), DimValidationError> {
    (actual == expected)
        .then_some(())
        .ok_or(DimValidationError::DimensionMismatch { expected, actual })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dim_config_default() {
        let config = DimConfig::default();
        assert_eq!(config.embedding_dim, DEFAULT_EMBEDDING_DIM);
        assert_eq!(config.vector_size(), 1024);
    }

    #[test]
    fn test_dim_config_validate_zero() {
        let config = DimConfig::new(0);
        assert_eq!(config.validate(), Err(DimValidationError::ZeroDimension));
        assert!(DimConfig::new(3).validate().is_ok());
    }

    #[test]
    fn test_dim_config_check_vector() {
        let config = DimConfig::new(4);
        assert!(config.check(&[0.0; 4]).is_ok());
        assert_eq!(
            config.check(&[0.0; 3]),
            Err(DimValidationError::DimensionMismatch {
                expected: 4,
                actual: 3
            })
        );
    }

    #[test]
    fn test_similarity_threshold_complements_difference() {
        assert!((SIMILARITY_THRESHOLD - 0.95).abs() < 1e-6);
        assert!(MIN_VIDEO_LENGTH <= MAX_VIDEO_LENGTH);
        assert!(FAKE_VIDEO_PUNISHMENT < MIN_SCORE);
    }

    #[test]
    fn test_error_display() {
        let err = DimValidationError::ZeroDimension;
        assert_eq!(err.to_string(), "embedding dimension cannot be zero");

        let err = DimValidationError::DimensionMismatch {
            expected: 1024,
            actual: 768,
        };
        assert!(err.to_string().contains("1024"));
        assert!(err.to_string().contains("768"));
    }
}
