use thiserror::Error;

use crate::batch::VideoMetadata;
use crate::constants::{DimConfig, DimValidationError};

/// A compaction left parallel sequences with different lengths.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{what} has {actual} rows, expected {expected}")]
pub struct AlignmentError {
    pub what: &'static str,
    pub expected: usize,
    pub actual: usize,
}

/// Claimed embeddings of a batch, row `i` belonging to metadata item `i`.
///
/// The three sequences always have the same length; [`retain_mask`](Self::retain_mask)
/// compacts them together.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmbeddingSet {
    pub video: Vec<Vec<f32>>,
    pub audio: Vec<Vec<f32>>,
    pub description: Vec<Vec<f32>>,
}

impl EmbeddingSet {
    /// Stacks the claimed vectors of `metadata`, rejecting any row of the wrong width.
    pub fn from_metadata(
        metadata: &[VideoMetadata],
        dims: &DimConfig,
    ) -> Result<Self, DimValidationError> {
        let mut set = Self {
            video: Vec::with_capacity(metadata.len()),
            audio: Vec::with_capacity(metadata.len()),
            description: Vec::with_capacity(metadata.len()),
        };

        for item in metadata {
            dims.check(&item.video_emb)?;
            dims.check(&item.audio_emb)?;
            dims.check(&item.description_emb)?;
            set.video.push(item.video_emb.clone());
            set.audio.push(item.audio_emb.clone());
            set.description.push(item.description_emb.clone());
        }

        Ok(set)
    }

    pub fn len(&self) -> usize {
        self.video.len()
    }

    pub fn is_empty(&self) -> bool {
        self.video.is_empty()
    }

    /// Checks that every sequence holds exactly `expected` rows.
    pub fn check_aligned(&self, expected: usize) -> Result<(), AlignmentError> {
        for (what, actual) in [
            ("video embeddings", self.video.len()),
            ("audio embeddings", self.audio.len()),
            ("description embeddings", self.description.len()),
        ] {
            if actual != expected {
                return Err(AlignmentError {
                    what,
                    expected,
                    actual,
                });
            }
        }
        Ok(())
    }

    /// Keeps row `i` iff `keep[i]`.
    pub fn retain_mask(&mut self, keep: &[bool]) {
        self.video = compact(std::mem::take(&mut self.video), keep);
        self.audio = compact(std::mem::take(&mut self.audio), keep);
        self.description = compact(std::mem::take(&mut self.description), keep);
    }
}

/// Keeps `items[i]` iff `keep[i]`, preserving order.
///
/// Items past the end of `keep` are dropped, which an alignment check downstream reports.
pub fn compact<T>(items: Vec<T>, keep: &[bool]) -> Vec<T> {
    items
        .into_iter()
        .zip(keep.iter())
        .filter_map(|(item, &kept)| kept.then_some(item))
        .collect()
}
