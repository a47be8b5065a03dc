use qdrant_client::Payload;
use qdrant_client::qdrant::ScoredPoint;
use qdrant_client::qdrant::point_id::PointIdOptions;
use uuid::Uuid;

use super::VIDEO_ID_PAYLOAD_KEY;

/// One embedding written to the index.
#[derive(Debug, Clone)]
pub struct VectorPoint {
    /// UUID string assigned at write time.
    pub id: String,
    pub vector: Vec<f32>,
    /// Submitted source video id, stored as payload.
    pub video_id: String,
}

impl VectorPoint {
    pub fn new(id: String, vector: Vec<f32>, video_id: String) -> Self {
        Self {
            id,
            vector,
            video_id,
        }
    }

    /// Payload stored next to the vector: just the source video id.
    pub fn payload(&self) -> Payload {
        let mut payload = Payload::new();
        payload.insert(VIDEO_ID_PAYLOAD_KEY, self.video_id.clone());
        payload
    }
}

/// A ranked nearest-neighbour match.
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub id: String,
    /// Cosine similarity to the query vector.
    pub score: f32,
    pub video_id: Option<String>,
}

impl SearchResult {
    pub fn from_scored_point(point: ScoredPoint) -> Option<Self> {
        let id = match point.id.and_then(|pid| pid.point_id_options) {
            Some(PointIdOptions::Uuid(uuid)) => uuid,
            Some(PointIdOptions::Num(n)) => n.to_string(),
            None => return None,
        };

        let video_id = point
            .payload
            .get(VIDEO_ID_PAYLOAD_KEY)
            .and_then(|v| v.as_str())
            .map(|s| s.to_string());

        Some(SearchResult {
            id,
            score: point.score,
            video_id,
        })
    }
}

/// Generates a fresh point id.
pub fn generate_point_id() -> String {
    Uuid::new_v4().to_string()
}
