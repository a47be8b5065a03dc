use std::future::Future;

use super::EmbeddingError;

/// Fresh embeddings of one clip, one vector per modality.
#[derive(Debug, Clone, PartialEq)]
pub struct Embeddings {
    pub video: Vec<f32>,
    pub audio: Vec<f32>,
    pub description: Vec<f32>,
}

/// Raw media fetched for an authenticity audit.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaClip {
    pub video_id: String,
    pub start_time: u64,
    pub end_time: u64,
    pub bytes: Vec<u8>,
}

/// The multimodal embedding model.
///
/// Every call is expensive and runs on a shared accelerator; callers are
/// expected to hold the embedding gate while awaiting these futures.
pub trait EmbeddingService: Send + Sync {
    /// Embeds a single text.
    fn embed_text(
        &self,
        text: &str,
    ) -> impl Future<Output = Result<Vec<f32>, EmbeddingError>> + Send;

    /// Embeds a clip's video and audio tracks together with its description.
    fn embed(
        &self,
        description: &str,
        media: &MediaClip,
    ) -> impl Future<Output = Result<Embeddings, EmbeddingError>> + Send;

    /// Where inference runs. Informational only.
    fn device(&self) -> &str;
}
