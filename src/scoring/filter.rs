use crate::batch::{VideoMetadata, is_valid_id};

/// First submitted identifier that fails validation, if any.
pub fn first_invalid_id(metadata: &[VideoMetadata]) -> Option<&str> {
    metadata
        .iter()
        .map(|item| item.video_id.as_str())
        .find(|id| !is_valid_id(id))
}

/// Keeps items whose duration lies in `[min_len, max_len]`, in order, then
/// truncates to `limit`. Clips ending before they start are dropped.
pub fn filter_by_length(
    metadata: &[VideoMetadata],
    min_len: u64,
    max_len: u64,
    limit: usize,
) -> Vec<VideoMetadata> {
    metadata
        .iter()
        .filter(|item| {
            item.duration()
                .is_some_and(|duration| (min_len..=max_len).contains(&duration))
        })
        .take(limit)
        .cloned()
        .collect()
}
