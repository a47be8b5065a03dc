use crate::embedding::{EmbeddingSet, cosine_against, pairwise_cosine};

use super::types::RelevanceScores;

/// Video-to-description and video-to-query cosine per row of `embeddings`.
pub fn relevance_scores(embeddings: &EmbeddingSet, query_embedding: &[f32]) -> RelevanceScores {
    RelevanceScores {
        description: pairwise_cosine(&embeddings.video, &embeddings.description),
        query: cosine_against(&embeddings.video, query_embedding),
    }
}

/// `(Σ description + Σ query + novelty) / 3 / num_videos`, floored at `min_score`.
///
/// `num_videos` is the requested count, not the number of survivors.
pub fn aggregate(
    relevance: &RelevanceScores,
    novelty_total: f32,
    num_videos: usize,
    min_score: f32,
) -> f32 {
    let description: f32 = relevance.description.iter().sum();
    let query: f32 = relevance.query.iter().sum();
    let score = (description + query + novelty_total) / 3.0 / num_videos.max(1) as f32;
    score.max(min_score)
}
