use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use parking_lot::RwLock;

use crate::constants::DimConfig;

use super::{EmbeddingError, EmbeddingService, Embeddings, MediaClip, StubEmbedder};

/// Embedder returning scripted vectors, falling back to [`StubEmbedder`] output.
///
/// Texts are scripted by exact content, clips by video id. Every call records
/// how many calls were in flight at once so tests can observe gating.
#[derive(Default)]
pub struct MockEmbeddingService {
    stub: StubEmbedder,
    texts: RwLock<HashMap<String, Vec<f32>>>,
    clips: RwLock<HashMap<String, Embeddings>>,
    latency: Option<Duration>,
    failing: AtomicBool,
    text_calls: AtomicUsize,
    clip_calls: AtomicUsize,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

impl MockEmbeddingService {
    pub fn new(dims: DimConfig) -> Self {
        Self {
            stub: StubEmbedder::new(dims),
            ..Default::default()
        }
    }

    /// Every call sleeps `latency` before answering.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    pub fn set_text(&self, text: &str, embedding: Vec<f32>) {
        self.texts.write().insert(text.to_string(), embedding);
    }

    pub fn set_clip(&self, video_id: &str, embeddings: Embeddings) {
        self.clips.write().insert(video_id.to_string(), embeddings);
    }

    /// Makes every subsequent call fail with [`EmbeddingError::InferenceFailed`].
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn text_calls(&self) -> usize {
        self.text_calls.load(Ordering::SeqCst)
    }

    pub fn clip_calls(&self) -> usize {
        self.clip_calls.load(Ordering::SeqCst)
    }

    /// Highest number of calls observed running at the same time.
    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }

    pub fn stub(&self) -> &StubEmbedder {
        &self.stub
    }

    async fn enter(&self) -> Result<(), EmbeddingError> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(now, Ordering::SeqCst);

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.failing.load(Ordering::SeqCst) {
            return Err(EmbeddingError::InferenceFailed {
                reason: "mock embedder set to fail".to_string(),
            });
        }
        Ok(())
    }
}

impl EmbeddingService for MockEmbeddingService {
    async fn embed_text(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        self.text_calls.fetch_add(1, Ordering::SeqCst);
        self.enter().await?;

        let scripted = self.texts.read().get(text).cloned();
        Ok(scripted.unwrap_or_else(|| self.stub.text_vector(text)))
    }

    async fn embed(
        &self,
        description: &str,
        media: &MediaClip,
    ) -> Result<Embeddings, EmbeddingError> {
        self.clip_calls.fetch_add(1, Ordering::SeqCst);
        self.enter().await?;

        let scripted = self.clips.read().get(&media.video_id).cloned();
        Ok(scripted.unwrap_or_else(|| self.stub.clip_vectors(description, media)))
    }

    fn device(&self) -> &str {
        "mock"
    }
}
