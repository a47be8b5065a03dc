//! Submitted batches, their items, and the response shapes returned to callers.

pub mod types;
pub mod validation;

#[cfg(test)]
mod tests;

pub use types::{ExtendedScore, ScoreResponse, VideoMetadata, VideosBatch};
pub use validation::is_valid_id;
