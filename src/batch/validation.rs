use std::sync::LazyLock;

use regex_lite::Regex;

static VIDEO_ID_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]{11}$").ok());

/// Returns `true` if `video_id` looks like an 11-character source video id.
pub fn is_valid_id(video_id: &str) -> bool {
    VIDEO_ID_PATTERN
        .as_ref()
        .is_some_and(|re| re.is_match(video_id))
}
