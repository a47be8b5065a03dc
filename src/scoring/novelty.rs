use futures_util::future::join_all;
use tracing::{debug, warn};

use crate::batch::VideoMetadata;
use crate::vectordb::{VectorDbClient, VectorPoint, generate_point_id};

use super::error::ScoringError;
use super::types::{NoveltyReport, ScoringMode};

/// Measures each item's distance to the nearest prior entry in the index.
pub struct NoveltyEngine<'a, V> {
    index: &'a V,
    collection: &'a str,
    difference_threshold: f32,
}

impl<'a, V: VectorDbClient> NoveltyEngine<'a, V> {
    pub fn new(index: &'a V, collection: &'a str, difference_threshold: f32) -> Self {
        Self {
            index,
            collection,
            difference_threshold,
        }
    }

    /// Writes one point per item and returns the assigned ids.
    ///
    /// Ids are assigned before the write; a failed write is logged and the ids
    /// are returned anyway.
    pub async fn write_batch(&self, metadata: &[VideoMetadata], vectors: &[Vec<f32>]) -> Vec<String> {
        let ids: Vec<String> = metadata.iter().map(|_| generate_point_id()).collect();

        let points = ids
            .iter()
            .zip(metadata.iter().zip(vectors.iter()))
            .map(|(id, (item, vector))| {
                VectorPoint::new(id.clone(), vector.clone(), item.video_id.clone())
            })
            .collect();

        match self
            .index
            .upsert_points(self.collection, points)
            .await
        {
            Ok(()) => debug!(
                collection = %self.collection,
                points = ids.len(),
                "Wrote batch embeddings to index"
            ),
            Err(e) => warn!(
                collection = %self.collection,
                points = ids.len(),
                error = %e,
                "Failed to write batch embeddings to index"
            ),
        }

        ids
    }

    /// Queries every vector concurrently. A missing match counts as fully novel.
    pub async fn score(
        &self,
        vectors: &[Vec<f32>],
        mode: ScoringMode,
    ) -> Result<NoveltyReport, ScoringError> {
        let top_k = mode.top_k();
        let rank = mode.match_rank();

        let queries = vectors.iter().map(|vector| async move {
            let matches = self
                .index
                .search(self.collection, vector.clone(), top_k)
                .await?;
            Ok::<f32, ScoringError>(matches.get(rank).map_or(1.0, |m| 1.0 - m.score))
        });

        let novelty = join_all(queries)
            .await
            .into_iter()
            .collect::<Result<Vec<f32>, ScoringError>>()?;

        Ok(NoveltyReport::from_scores(novelty, self.difference_threshold))
    }
}
