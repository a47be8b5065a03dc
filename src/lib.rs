//! Vidscore library crate (used by the `vidscore` binary and integration tests).
//!
//! Scores batches of submitted video metadata: is the batch genuine, how novel
//! is it against the existing corpus, and how relevant is it to the query it
//! answers.
//!
//! # Public API Surface
//!
//! ## Pipeline
//! - [`VideoScorer`] - Runs a batch through every stage
//! - [`ScoringMode`], [`BatchOutcome`] - Mutating vs check-only passes, and how a pass ended
//! - [`ConcurrencyGates`], [`SamplingRng`] - Shared capacity limits and the injectable random source
//!
//! ## Data
//! - [`VideosBatch`], [`VideoMetadata`] - Submissions
//! - [`ScoreResponse`], [`ExtendedScore`] - Responses
//! - [`ScoringConfig`], [`ScoringPolicy`] - Environment configuration and derived thresholds
//!
//! ## Collaborators
//! - [`EmbeddingService`] - The multimodal embedding model ([`StubEmbedder`], [`RemoteEmbedder`])
//! - [`VectorDbClient`] - The nearest-neighbour index ([`QdrantClient`])
//! - [`MediaFetcher`] - Source media downloads ([`HttpMediaFetcher`])
//! - [`DatasetSink`] - Fire-and-forget dataset hand-off ([`JsonlDatasetSink`])
//!
//! ## Test/Mock Support
//! Mock implementations are available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod batch;
pub mod config;
pub mod constants;
pub mod embedding;
pub mod fetch;
pub mod hashing;
pub mod scoring;
pub mod sink;
pub mod vectordb;

pub use batch::{ExtendedScore, ScoreResponse, VideoMetadata, VideosBatch, is_valid_id};
pub use config::{ConfigError, ScoringConfig, ScoringPolicy};
pub use constants::{DimConfig, DimValidationError, validate_embedding_dim};
#[cfg(any(test, feature = "mock"))]
pub use embedding::MockEmbeddingService;
pub use embedding::{
    EmbeddingError, EmbeddingService, EmbeddingSet, Embeddings, MediaClip, RemoteEmbedder,
    StubEmbedder, cosine_similarity,
};
#[cfg(any(test, feature = "mock"))]
pub use fetch::{ScriptedFetch, ScriptedMediaFetcher};
pub use fetch::{FetchError, HttpMediaFetcher, MediaFetcher, ProxyPool, UnavailableFetcher};
pub use hashing::{hash_modality, hash_to_u64};
pub use scoring::{
    BatchOutcome, ConcurrencyGates, SamplingRng, ScoringError, ScoringMode, VideoScorer,
};
#[cfg(any(test, feature = "mock"))]
pub use sink::MemoryDatasetSink;
pub use sink::{
    DatasetRecord, DatasetSink, DatasetVideo, DiscardSink, JsonlDatasetSink, SinkError,
};
#[cfg(any(test, feature = "mock"))]
pub use vectordb::MockVectorDbClient;
pub use vectordb::{
    QdrantClient, SearchResult, VectorDbClient, VectorDbError, VectorPoint, generate_point_id,
};
