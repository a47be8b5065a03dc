use tracing::debug;

use crate::constants::DimConfig;
use crate::hashing::hash_modality;

use super::{EmbeddingError, EmbeddingService, Embeddings, MediaClip};

const STUB_DEVICE: &str = "cpu-stub";

/// Embeds by seeding a unit vector from a hash of the input.
///
/// Identical inputs always produce identical vectors; unrelated inputs are
/// near-orthogonal. Claimed embeddings produced by any other model fail the
/// authenticity check against it.
#[derive(Debug, Clone, Default)]
pub struct StubEmbedder {
    dims: DimConfig,
}

impl StubEmbedder {
    pub fn new(dims: DimConfig) -> Self {
        Self { dims }
    }

    pub fn embedding_dim(&self) -> usize {
        self.dims.embedding_dim
    }

    /// The vector [`embed_text`](EmbeddingService::embed_text) returns for `text`.
    pub fn text_vector(&self, text: &str) -> Vec<f32> {
        seeded_unit_vector(hash_modality("text", text.as_bytes()), self.dims.embedding_dim)
    }

    /// The vectors [`embed`](EmbeddingService::embed) returns.
    pub fn clip_vectors(&self, description: &str, media: &MediaClip) -> Embeddings {
        Embeddings {
            video: seeded_unit_vector(
                hash_modality("video", &media.bytes),
                self.dims.embedding_dim,
            ),
            audio: seeded_unit_vector(
                hash_modality("audio", &media.bytes),
                self.dims.embedding_dim,
            ),
            description: self.text_vector(description),
        }
    }
}

impl EmbeddingService for StubEmbedder {
    async fn embed_text(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        debug!(text_len = text.len(), "Generating stub text embedding");
        Ok(self.text_vector(text))
    }

    async fn embed(
        &self,
        description: &str,
        media: &MediaClip,
    ) -> Result<Embeddings, EmbeddingError> {
        debug!(
            video_id = %media.video_id,
            media_bytes = media.bytes.len(),
            "Generating stub clip embeddings"
        );
        Ok(self.clip_vectors(description, media))
    }

    fn device(&self) -> &str {
        STUB_DEVICE
    }
}

/// LCG-expanded, L2-normalised vector seeded from `seed`.
pub(crate) fn seeded_unit_vector(seed: u64, dim: usize) -> Vec<f32> {
    let mut embedding = Vec::with_capacity(dim);
    let mut state = seed;

    for _ in 0..dim {
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
        let value = ((state >> 32) as f32 / u32::MAX as f32) * 2.0 - 1.0;
        embedding.push(value);
    }

    let norm: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for x in &mut embedding {
            *x /= norm;
        }
    }

    embedding
}
