//! Test fixtures for integration tests.

use std::sync::Arc;

use vidscore::batch::{VideoMetadata, VideosBatch};
use vidscore::config::ScoringPolicy;
use vidscore::constants::DimConfig;
use vidscore::embedding::{MediaClip, StubEmbedder};
use vidscore::scoring::SamplingRng;
use vidscore::vectordb::VectorDbClient;
use vidscore::{MockEmbeddingService, MockVectorDbClient, VideoScorer};

pub const DIM: usize = 32;

pub const COLLECTION: &str = "integration_videos";

pub const QUERY: &str = "a skateboarder landing a kickflip";

/// A valid 11-character id unique to `n`.
pub fn video_id(n: usize) -> String {
    format!("vid{n:08}")
}

pub fn dims() -> DimConfig {
    DimConfig::new(DIM)
}

pub fn policy(check_probability: f64) -> ScoringPolicy {
    ScoringPolicy {
        check_probability,
        min_video_length: 5,
        max_video_length: 60,
        dims: dims(),
        ..ScoringPolicy::default()
    }
}

/// Builds metadata whose claimed embeddings are exactly what the stub
/// embedder produces for the item's description and for the clip bytes a
/// scripted fetcher returns by default (the id itself).
pub struct VideoMetadataBuilder {
    video_id: String,
    description: Option<String>,
    start_time: u64,
    end_time: u64,
}

impl VideoMetadataBuilder {
    pub fn new(n: usize) -> Self {
        Self {
            video_id: video_id(n),
            description: None,
            start_time: 30,
            end_time: 45,
        }
    }

    pub fn description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn duration(mut self, seconds: u64) -> Self {
        self.end_time = self.start_time + seconds;
        self
    }

    pub fn build(self) -> VideoMetadata {
        let stub = StubEmbedder::new(dims());
        let description = self
            .description
            .unwrap_or_else(|| format!("clip number {}", self.video_id));

        let clip = MediaClip {
            video_id: self.video_id.clone(),
            start_time: self.start_time,
            end_time: self.end_time,
            bytes: self.video_id.as_bytes().to_vec(),
        };
        let fresh = stub.clip_vectors(&description, &clip);

        VideoMetadata {
            video_id: self.video_id,
            description,
            views: 0,
            start_time: self.start_time,
            end_time: self.end_time,
            video_emb: fresh.video,
            audio_emb: fresh.audio,
            description_emb: fresh.description,
        }
    }
}

pub fn create_batch(count: usize) -> VideosBatch {
    VideosBatch {
        query: QUERY.to_string(),
        num_videos: count,
        video_metadata: (0..count)
            .map(|n| VideoMetadataBuilder::new(n).build())
            .collect(),
    }
}

pub async fn mock_index() -> Arc<MockVectorDbClient> {
    let index = Arc::new(MockVectorDbClient::new());
    index
        .ensure_collection(COLLECTION, DIM as u64)
        .await
        .expect("collection should be created");
    index
}

pub fn scorer(
    index: Arc<MockVectorDbClient>,
    policy: ScoringPolicy,
) -> VideoScorer<MockEmbeddingService, MockVectorDbClient> {
    VideoScorer::new(
        Arc::new(MockEmbeddingService::new(dims())),
        index,
        COLLECTION,
    )
    .with_policy(policy)
    .with_rng(SamplingRng::seeded(11))
}
