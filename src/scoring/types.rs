use crate::batch::{ExtendedScore, ScoreResponse};
use crate::config::ScoringPolicy;

/// Whether a pass may write to the index and the dataset sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoringMode {
    /// Writes each item to the index before the novelty query and enqueues
    /// accepted items to the dataset.
    Upload,
    /// Check-only: no index writes, no dataset hand-off.
    DryRun,
}

impl ScoringMode {
    pub fn is_mutating(self) -> bool {
        matches!(self, ScoringMode::Upload)
    }

    /// Rank of the match novelty is computed against. On a mutating pass the
    /// first match is the item's own freshly written vector.
    pub fn match_rank(self) -> usize {
        match self {
            ScoringMode::Upload => 1,
            ScoringMode::DryRun => 0,
        }
    }

    pub fn top_k(self) -> u64 {
        self.match_rank() as u64 + 1
    }
}

/// How a scoring pass ended.
#[derive(Debug, Clone, PartialEq)]
pub enum BatchOutcome {
    /// A submitted identifier failed validation.
    InvalidId { video_id: String },
    /// Nothing survived the length filter.
    Empty,
    /// The media fetcher reported the sampled video as fabricated.
    FakeContent { video_id: String },
    /// Fresh embeddings of the sampled item did not match its claims.
    AuthenticityFailed { video_id: String },
    Scored(ExtendedScore),
}

impl BatchOutcome {
    pub fn is_punished(&self) -> bool {
        matches!(
            self,
            BatchOutcome::InvalidId { .. }
                | BatchOutcome::FakeContent { .. }
                | BatchOutcome::AuthenticityFailed { .. }
        )
    }

    pub fn into_response(self, policy: &ScoringPolicy) -> ScoreResponse {
        match self {
            BatchOutcome::Scored(extended) => ScoreResponse::Extended(extended),
            BatchOutcome::Empty => ScoreResponse::Short {
                score: policy.min_score,
            },
            BatchOutcome::InvalidId { .. }
            | BatchOutcome::FakeContent { .. }
            | BatchOutcome::AuthenticityFailed { .. } => ScoreResponse::Short {
                score: policy.punishment,
            },
        }
    }
}

/// Per-item novelty of one batch against the index.
#[derive(Debug, Clone, PartialEq)]
pub struct NoveltyReport {
    pub novelty: Vec<f32>,
    pub too_similar: Vec<bool>,
    /// Sum of novelty over items that are not too similar.
    pub total: f32,
}

impl NoveltyReport {
    pub fn from_scores(novelty: Vec<f32>, difference_threshold: f32) -> Self {
        let too_similar: Vec<bool> = novelty.iter().map(|&n| n < difference_threshold).collect();
        let total = novelty
            .iter()
            .zip(too_similar.iter())
            .filter(|(_, similar)| !**similar)
            .map(|(n, _)| n)
            .sum();

        Self {
            novelty,
            too_similar,
            total,
        }
    }

    /// `true` for every item that keeps uniqueness credit.
    pub fn keep_mask(&self) -> Vec<bool> {
        self.too_similar.iter().map(|similar| !similar).collect()
    }

    pub fn unique_count(&self) -> usize {
        self.too_similar.iter().filter(|similar| !**similar).count()
    }
}

/// Cosine relevance of each surviving item, index-aligned.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RelevanceScores {
    pub description: Vec<f32>,
    pub query: Vec<f32>,
}
