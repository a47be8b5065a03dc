//! The batch scoring pipeline.
//!
//! Stages, in order:
//!
//! 1. identifier validation over the whole submission ([`filter::first_invalid_id`])
//! 2. length filter and truncation to the requested count ([`filter::filter_by_length`])
//! 3. sampling one item for audit, optionally downloading its media ([`Sampler`])
//! 4. authenticity check and query embedding under the embedding gate ([`verifier::verify`])
//! 5. novelty against the vector index, writing first on a mutating pass ([`NoveltyEngine`])
//! 6. relevance and aggregation ([`relevance`])
//! 7. dataset hand-off on a mutating pass
//!
//! [`VideoScorer`] wires the stages together. Punishment and floor outcomes are
//! values ([`BatchOutcome`]); [`ScoringError`] is reserved for infrastructure
//! failures.
//!
//! # Index writes
//!
//! On a mutating pass every filtered item is written before its novelty is
//! measured, including items later flagged as near-duplicates.

pub mod error;
pub mod filter;
pub mod gates;
pub mod novelty;
pub mod relevance;
pub mod rng;
pub mod sampler;
pub mod scorer;
pub mod types;
pub mod verifier;


pub use error::ScoringError;
pub use gates::ConcurrencyGates;
pub use novelty::NoveltyEngine;
pub use rng::SamplingRng;
pub use sampler::{AuditTarget, SampleOutcome, Sampler};
pub use scorer::VideoScorer;
pub use types::{BatchOutcome, NoveltyReport, RelevanceScores, ScoringMode};
pub use verifier::AuthenticityReport;
