//! Embedding service seam and the numeric helpers the pipeline runs on.
//!
//! - [`EmbeddingService`] is the external model (text, and text + media).
//! - [`EmbeddingSet`] holds a batch's claimed embeddings as aligned rows.
//! - [`similarity`] provides cosine and element-wise closeness checks.

mod error;
/// Deterministic mock with scripted vectors and call accounting.
#[cfg(any(test, feature = "mock"))]
pub mod mock;
/// HTTP client for a remote embedding server.
pub mod remote;
pub mod service;
pub mod set;
pub mod similarity;
/// Hash-seeded embedder for local runs without a model server.
pub mod stub;


pub use error::EmbeddingError;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockEmbeddingService;
pub use remote::RemoteEmbedder;
pub use service::{EmbeddingService, Embeddings, MediaClip};
pub use set::{AlignmentError, EmbeddingSet, compact};
pub use similarity::{allclose, cosine_against, cosine_similarity, pairwise_cosine};
pub use stub::StubEmbedder;
