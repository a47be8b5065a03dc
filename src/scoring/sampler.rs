use std::time::Duration;

use tracing::{debug, info, warn};

use crate::batch::VideoMetadata;
use crate::embedding::MediaClip;
use crate::fetch::{FetchError, MediaFetcher, ProxyPool};

use super::error::ScoringError;
use super::gates::ConcurrencyGates;
use super::rng::SamplingRng;

/// What the authenticity check runs against.
#[derive(Debug, Clone, PartialEq)]
pub enum AuditTarget<'m> {
    /// Compare only the description embedding.
    DescriptionOnly(&'m VideoMetadata),
    /// Compare all three modalities against the fetched clip.
    Media {
        metadata: &'m VideoMetadata,
        clip: MediaClip,
    },
}

impl<'m> AuditTarget<'m> {
    pub fn metadata(&self) -> &'m VideoMetadata {
        match self {
            AuditTarget::DescriptionOnly(metadata) => metadata,
            AuditTarget::Media { metadata, .. } => metadata,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SampleOutcome<'m> {
    Audit(AuditTarget<'m>),
    /// The fetcher flagged this video as fabricated.
    Fake { video_id: String },
}

/// Picks the item a batch is audited on, downloading its media when the
/// audit gate asks for it.
pub struct Sampler<'a> {
    fetcher: &'a dyn MediaFetcher,
    proxies: &'a ProxyPool,
    gates: &'a ConcurrencyGates,
    rng: &'a SamplingRng,
    timeout: Duration,
}

impl<'a> Sampler<'a> {
    pub fn new(
        fetcher: &'a dyn MediaFetcher,
        proxies: &'a ProxyPool,
        gates: &'a ConcurrencyGates,
        rng: &'a SamplingRng,
        timeout: Duration,
    ) -> Self {
        Self {
            fetcher,
            proxies,
            gates,
            rng,
            timeout,
        }
    }

    /// Draws candidates without replacement until one yields a decision.
    ///
    /// - success: audit against the clip
    /// - blocked or other failure: description-only audit of that candidate
    /// - fake: the whole batch is fabricated
    /// - timeout: next candidate; description-only audit of the last one once
    ///   the pool runs out
    pub async fn draw<'m>(
        &self,
        metadata: &'m [VideoMetadata],
        check_video: bool,
    ) -> Result<SampleOutcome<'m>, ScoringError> {
        let queue = self.rng.shuffled_indices(metadata.len());

        if !check_video {
            let chosen = queue
                .first()
                .and_then(|&i| metadata.get(i))
                .ok_or(ScoringError::EmptySample)?;
            debug!(video_id = %chosen.video_id, "Download audit skipped");
            return Ok(SampleOutcome::Audit(AuditTarget::DescriptionOnly(chosen)));
        }

        let mut last_attempted = None;

        for candidate in queue.into_iter().filter_map(|i| metadata.get(i)) {
            last_attempted = Some(candidate);

            let permit = self.gates.download_slot().await?;
            let proxy = self.rng.choose_proxy(self.proxies);
            let attempt = tokio::time::timeout(
                self.timeout,
                self.fetcher.fetch(
                    &candidate.video_id,
                    candidate.start_time,
                    candidate.end_time,
                    proxy,
                ),
            )
            .await;
            drop(permit);

            match attempt {
                Ok(Ok(clip)) => {
                    debug!(
                        video_id = %candidate.video_id,
                        media_bytes = clip.bytes.len(),
                        "Downloaded audit clip"
                    );
                    return Ok(SampleOutcome::Audit(AuditTarget::Media {
                        metadata: candidate,
                        clip,
                    }));
                }
                Ok(Err(FetchError::Blocked { .. })) => {
                    warn!(
                        video_id = %candidate.video_id,
                        "IP is blocked, cannot download video, checking description only"
                    );
                    return Ok(SampleOutcome::Audit(AuditTarget::DescriptionOnly(
                        candidate,
                    )));
                }
                Ok(Err(FetchError::Fake { video_id })) => {
                    warn!(video_id = %video_id, "Video is fake, punishing batch");
                    return Ok(SampleOutcome::Fake { video_id });
                }
                Ok(Err(err @ FetchError::Other { .. })) => {
                    warn!(
                        video_id = %candidate.video_id,
                        error = %err,
                        "Video download failed, checking description only"
                    );
                    return Ok(SampleOutcome::Audit(AuditTarget::DescriptionOnly(
                        candidate,
                    )));
                }
                Err(_) => {
                    info!(
                        video_id = %candidate.video_id,
                        timeout_secs = self.timeout.as_secs_f32(),
                        "Video download timed out, trying another candidate"
                    );
                }
            }
        }

        let candidate = last_attempted.ok_or(ScoringError::EmptySample)?;
        warn!(
            video_id = %candidate.video_id,
            "Every download attempt timed out, checking description only"
        );
        Ok(SampleOutcome::Audit(AuditTarget::DescriptionOnly(candidate)))
    }
}
