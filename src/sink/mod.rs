//! Fire-and-forget hand-off of accepted batches to the dataset.

pub mod error;
pub mod jsonl;
#[cfg(any(test, feature = "mock"))]
pub mod mock;


use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub use error::SinkError;
pub use jsonl::JsonlDatasetSink;
#[cfg(any(test, feature = "mock"))]
pub use mock::MemoryDatasetSink;

use crate::batch::VideoMetadata;

/// One accepted item with its index id and relevance scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetVideo {
    pub metadata: VideoMetadata,
    pub index_id: String,
    pub description_relevance: f32,
    pub query_relevance: f32,
}

/// Everything a successful mutating pass hands to the dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetRecord {
    pub query: String,
    pub videos: Vec<DatasetVideo>,
    pub enqueued_at: DateTime<Utc>,
}

impl DatasetRecord {
    /// Zips the parallel sequences into one record. All four must be index-aligned.
    pub fn new(
        query: &str,
        metadata: Vec<VideoMetadata>,
        index_ids: Vec<String>,
        description_relevance: &[f32],
        query_relevance: &[f32],
    ) -> Self {
        let videos = metadata
            .into_iter()
            .zip(index_ids)
            .zip(description_relevance.iter().zip(query_relevance.iter()))
            .map(
                |((metadata, index_id), (&description_relevance, &query_relevance))| DatasetVideo {
                    metadata,
                    index_id,
                    description_relevance,
                    query_relevance,
                },
            )
            .collect();

        Self {
            query: query.to_string(),
            videos,
            enqueued_at: Utc::now(),
        }
    }
}

/// Receives accepted batches. Must not block; retry and batching are the sink's own concern.
pub trait DatasetSink: Send + Sync {
    fn enqueue(&self, record: DatasetRecord);
}

/// Sink that drops every record.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscardSink;

impl DatasetSink for DiscardSink {
    fn enqueue(&self, record: DatasetRecord) {
        debug!(
            videos = record.videos.len(),
            "Dataset sink disabled, discarding record"
        );
    }
}
