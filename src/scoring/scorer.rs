use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::batch::{ExtendedScore, ScoreResponse, VideoMetadata, VideosBatch};
use crate::config::ScoringPolicy;
use crate::embedding::{AlignmentError, EmbeddingService, EmbeddingSet, compact};
use crate::fetch::{MediaFetcher, ProxyPool, UnavailableFetcher};
use crate::sink::{DatasetRecord, DatasetSink, DiscardSink};
use crate::vectordb::VectorDbClient;

use super::error::ScoringError;
use super::filter::{filter_by_length, first_invalid_id};
use super::gates::ConcurrencyGates;
use super::novelty::NoveltyEngine;
use super::relevance::{aggregate, relevance_scores};
use super::rng::SamplingRng;
use super::sampler::{SampleOutcome, Sampler};
use super::types::{BatchOutcome, ScoringMode};
use super::verifier::verify;

enum Audit {
    Passed { query_embedding: Vec<f32> },
    Rejected(BatchOutcome),
}

/// Scores submitted batches for authenticity, novelty and relevance.
///
/// Every batch scored through one `VideoScorer` (or through scorers sharing a
/// [`ConcurrencyGates`] clone) competes for the same embedding and download slots.
pub struct VideoScorer<E, V> {
    embedder: Arc<E>,
    index: Arc<V>,
    collection: String,
    fetcher: Arc<dyn MediaFetcher>,
    sink: Arc<dyn DatasetSink>,
    proxies: ProxyPool,
    policy: ScoringPolicy,
    gates: ConcurrencyGates,
    rng: SamplingRng,
}

impl<E, V> std::fmt::Debug for VideoScorer<E, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VideoScorer")
            .field("collection", &self.collection)
            .field("proxies", &self.proxies.proxies().len())
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl<E: EmbeddingService, V: VectorDbClient> VideoScorer<E, V> {
    /// Creates a scorer with default policy and gates, no media fetcher, and
    /// a discarding dataset sink.
    pub fn new(embedder: Arc<E>, index: Arc<V>, collection: impl Into<String>) -> Self {
        Self {
            embedder,
            index,
            collection: collection.into(),
            fetcher: Arc::new(UnavailableFetcher),
            sink: Arc::new(DiscardSink),
            proxies: ProxyPool::default(),
            policy: ScoringPolicy::default(),
            gates: ConcurrencyGates::default(),
            rng: SamplingRng::default(),
        }
    }

    pub fn with_fetcher(mut self, fetcher: Arc<dyn MediaFetcher>) -> Self {
        self.fetcher = fetcher;
        self
    }

    pub fn with_sink(mut self, sink: Arc<dyn DatasetSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn with_proxies(mut self, proxies: ProxyPool) -> Self {
        self.proxies = proxies;
        self
    }

    pub fn with_policy(mut self, policy: ScoringPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_gates(mut self, gates: ConcurrencyGates) -> Self {
        self.gates = gates;
        self
    }

    pub fn with_rng(mut self, rng: SamplingRng) -> Self {
        self.rng = rng;
        self
    }

    pub fn policy(&self) -> &ScoringPolicy {
        &self.policy
    }

    pub fn gates(&self) -> &ConcurrencyGates {
        &self.gates
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Mutating pass; returns the final score only.
    pub async fn score_and_upload(&self, batch: &VideosBatch) -> Result<f32, ScoringError> {
        Ok(self.run_scoring(batch, ScoringMode::Upload).await?.score())
    }

    /// Check-only pass; nothing is written.
    pub async fn score_for_testing(
        &self,
        batch: &VideosBatch,
    ) -> Result<ScoreResponse, ScoringError> {
        self.run_scoring(batch, ScoringMode::DryRun).await
    }

    pub async fn run_scoring(
        &self,
        batch: &VideosBatch,
        mode: ScoringMode,
    ) -> Result<ScoreResponse, ScoringError> {
        Ok(self.evaluate(batch, mode).await?.into_response(&self.policy))
    }

    /// Counts items that are not near-duplicates of anything already indexed.
    ///
    /// Considers every submitted item (no length filter, no truncation) and
    /// never writes.
    #[instrument(skip(self, batch), fields(submitted = batch.video_metadata.len()))]
    pub async fn num_unique_videos(&self, batch: &VideosBatch) -> Result<usize, ScoringError> {
        let embeddings = EmbeddingSet::from_metadata(&batch.video_metadata, &self.policy.dims)?;
        let report = self
            .novelty_engine()
            .score(&embeddings.video, ScoringMode::DryRun)
            .await?;

        let unique = report.unique_count();
        debug!(unique, "Counted unique videos");
        Ok(unique)
    }

    /// Runs the full pipeline and reports how the batch ended.
    #[instrument(
        skip(self, batch),
        fields(
            submitted = batch.video_metadata.len(),
            num_videos = batch.num_videos,
        )
    )]
    pub async fn evaluate(
        &self,
        batch: &VideosBatch,
        mode: ScoringMode,
    ) -> Result<BatchOutcome, ScoringError> {
        if let Some(video_id) = first_invalid_id(&batch.video_metadata) {
            warn!(video_id = %video_id, "Invalid video id, punishing batch");
            return Ok(BatchOutcome::InvalidId {
                video_id: video_id.to_string(),
            });
        }

        let metadata = filter_by_length(
            &batch.video_metadata,
            self.policy.min_video_length,
            self.policy.max_video_length,
            batch.num_videos,
        );
        info!(
            "Filtered {} videos down to {} videos",
            batch.video_metadata.len(),
            metadata.len()
        );

        if metadata.is_empty() {
            return Ok(BatchOutcome::Empty);
        }

        let mut embeddings = EmbeddingSet::from_metadata(&metadata, &self.policy.dims)?;

        let query_embedding = match self.audit(&batch.query, &metadata).await? {
            Audit::Passed { query_embedding } => query_embedding,
            Audit::Rejected(outcome) => return Ok(outcome),
        };

        let original_len = metadata.len();
        let engine = self.novelty_engine();

        let index_ids = if mode.is_mutating() {
            Some(engine.write_batch(&metadata, &embeddings.video).await)
        } else {
            None
        };

        let novelty = engine.score(&embeddings.video, mode).await?;
        let keep = novelty.keep_mask();

        embeddings.retain_mask(&keep);
        let metadata = compact(metadata, &keep);
        let index_ids = index_ids.map(|ids| compact(ids, &keep));
        check_alignment(&embeddings, &metadata, index_ids.as_deref())?;

        info!(
            "Deduplicated {} videos down to {} videos",
            original_len,
            metadata.len()
        );

        let relevance = relevance_scores(&embeddings, &query_embedding);
        let score = aggregate(
            &relevance,
            novelty.total,
            batch.num_videos,
            self.policy.min_score,
        );

        if score > self.policy.high_score_log_threshold {
            let video_ids: Vec<&str> = metadata.iter().map(|m| m.video_id.as_str()).collect();
            info!(score, video_ids = ?video_ids, "Videos scored above high-score threshold");
        }

        if let Some(index_ids) = index_ids {
            self.sink.enqueue(DatasetRecord::new(
                &batch.query,
                metadata,
                index_ids,
                &relevance.description,
                &relevance.query,
            ));
        }

        Ok(BatchOutcome::Scored(ExtendedScore {
            is_unique: keep,
            description_relevance_scores: relevance.description,
            query_relevance_scores: relevance.query,
            novelty_score: novelty.total,
            score,
        }))
    }

    /// Samples one item, checks it, and embeds the query under the same
    /// embedding slot.
    async fn audit(&self, query: &str, metadata: &[VideoMetadata]) -> Result<Audit, ScoringError> {
        let check_video = self.rng.check_gate(self.policy.check_probability);
        let sampler = Sampler::new(
            &*self.fetcher,
            &self.proxies,
            &self.gates,
            &self.rng,
            self.policy.download_timeout,
        );

        let target = match sampler.draw(metadata, check_video).await? {
            SampleOutcome::Audit(target) => target,
            SampleOutcome::Fake { video_id } => {
                return Ok(Audit::Rejected(BatchOutcome::FakeContent { video_id }));
            }
        };

        let _permit = self.gates.embedding_slot().await?;

        let report = verify(&*self.embedder, &target, &self.policy).await?;
        if !report.loose {
            warn!(
                video_id = %report.video_id,
                media_checked = report.media_checked,
                "Authenticity check failed, punishing batch"
            );
            return Ok(Audit::Rejected(BatchOutcome::AuthenticityFailed {
                video_id: report.video_id,
            }));
        }

        let query_embedding = self.embedder.embed_text(query).await?;
        self.policy.dims.check(&query_embedding)?;

        Ok(Audit::Passed { query_embedding })
    }

    fn novelty_engine(&self) -> NoveltyEngine<'_, V> {
        NoveltyEngine::new(
            &*self.index,
            &self.collection,
            self.policy.difference_threshold,
        )
    }
}

fn check_alignment(
    embeddings: &EmbeddingSet,
    metadata: &[VideoMetadata],
    index_ids: Option<&[String]>,
) -> Result<(), AlignmentError> {
    embeddings.check_aligned(metadata.len())?;

    if let Some(ids) = index_ids
        && ids.len() != metadata.len()
    {
        return Err(AlignmentError {
            what: "index ids",
            expected: metadata.len(),
            actual: ids.len(),
        });
    }

    Ok(())
}
