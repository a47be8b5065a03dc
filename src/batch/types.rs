use serde::{Deserialize, Serialize};

/// One submitted clip with its claimed embeddings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoMetadata {
    pub video_id: String,
    pub description: String,
    #[serde(default)]
    pub views: u64,
    /// Clip start, seconds from the beginning of the source video.
    pub start_time: u64,
    /// Clip end, seconds from the beginning of the source video.
    pub end_time: u64,
    pub video_emb: Vec<f32>,
    pub audio_emb: Vec<f32>,
    pub description_emb: Vec<f32>,
}

impl VideoMetadata {
    /// Clip length in seconds; `None` if the clip ends before it starts.
    pub fn duration(&self) -> Option<u64> {
        self.end_time.checked_sub(self.start_time)
    }
}

/// A batch submitted in answer to `query`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideosBatch {
    pub query: String,
    /// Requested count N. At most N items are ever scored and the final
    /// score is normalised by N.
    pub num_videos: usize,
    pub video_metadata: Vec<VideoMetadata>,
}

/// Full per-batch breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtendedScore {
    /// One flag per filtered item; `false` marks a near-duplicate.
    pub is_unique: Vec<bool>,
    /// Video-to-description cosine per unique item.
    pub description_relevance_scores: Vec<f32>,
    /// Video-to-query cosine per unique item.
    pub query_relevance_scores: Vec<f32>,
    /// Sum of novelty over unique items.
    pub novelty_score: f32,
    pub score: f32,
}

/// Response of a scoring call.
///
/// Terminal outcomes (punishment, empty batch) only carry the score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScoreResponse {
    Extended(ExtendedScore),
    Short { score: f32 },
}

impl ScoreResponse {
    pub fn score(&self) -> f32 {
        match self {
            ScoreResponse::Extended(extended) => extended.score,
            ScoreResponse::Short { score } => *score,
        }
    }

    pub fn extended(&self) -> Option<&ExtendedScore> {
        match self {
            ScoreResponse::Extended(extended) => Some(extended),
            ScoreResponse::Short { .. } => None,
        }
    }
}
