//! Index of accepted video embeddings, backed by Qdrant.
//!
//! The pipeline only needs three things from it: write a batch of embeddings,
//! fetch nearest neighbours for a vector, and count what is stored.

pub mod client;
pub mod error;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod model;

#[cfg(test)]
mod tests;

pub use client::{QdrantClient, VectorDbClient};
pub use error::VectorDbError;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockVectorDbClient;
pub use model::{SearchResult, VectorPoint, generate_point_id};

/// Payload key carrying the submitted video id.
pub const VIDEO_ID_PAYLOAD_KEY: &str = "youtube_id";
