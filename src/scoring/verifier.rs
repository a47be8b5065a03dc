use tracing::info;

use crate::config::ScoringPolicy;
use crate::embedding::{EmbeddingService, allclose, cosine_similarity};

use super::error::ScoringError;
use super::sampler::AuditTarget;

/// Result of comparing fresh embeddings of the sampled item with its claims.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthenticityReport {
    pub video_id: String,
    /// Cosine above threshold on every compared modality. Gates the batch.
    pub loose: bool,
    /// Element-wise closeness on every compared modality. Logged only.
    pub strict: bool,
    pub media_checked: bool,
}

pub fn loose_match(fresh: &[f32], claimed: &[f32], threshold: f32) -> bool {
    cosine_similarity(fresh, claimed) > threshold
}

pub fn strict_match(fresh: &[f32], claimed: &[f32], atol: f32, rtol: f32) -> bool {
    allclose(fresh, claimed, atol, rtol)
}

/// Embeds the audit target and compares it with the claimed vectors.
///
/// The caller must hold the embedding gate.
pub async fn verify<E: EmbeddingService>(
    embedder: &E,
    target: &AuditTarget<'_>,
    policy: &ScoringPolicy,
) -> Result<AuthenticityReport, ScoringError> {
    let metadata = target.metadata();

    let (pairs, media_checked) = match target {
        AuditTarget::DescriptionOnly(_) => {
            let fresh = embedder.embed_text(&metadata.description).await?;
            (vec![(fresh, &metadata.description_emb)], false)
        }
        AuditTarget::Media { clip, .. } => {
            let fresh = embedder.embed(&metadata.description, clip).await?;
            (
                vec![
                    (fresh.video, &metadata.video_emb),
                    (fresh.audio, &metadata.audio_emb),
                    (fresh.description, &metadata.description_emb),
                ],
                true,
            )
        }
    };

    for (fresh, _) in &pairs {
        policy.dims.check(fresh)?;
    }

    let loose = pairs
        .iter()
        .all(|(fresh, claimed)| loose_match(fresh, claimed, policy.similarity_threshold));
    let strict = pairs.iter().all(|(fresh, claimed)| {
        strict_match(fresh, claimed, policy.strict_atol, policy.strict_rtol)
    });

    if media_checked {
        info!(
            video_id = %metadata.video_id,
            similar = loose,
            strict_similar = strict,
            "Total similarity check"
        );
    } else {
        info!(
            video_id = %metadata.video_id,
            similar = loose,
            strict_similar = strict,
            "Description similarity check"
        );
    }

    Ok(AuthenticityReport {
        video_id: metadata.video_id.clone(),
        loose,
        strict,
        media_checked,
    })
}
