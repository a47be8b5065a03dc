use thiserror::Error;

/// Failure signals a media fetch can raise.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The egress address is blocked by the source.
    #[error("egress blocked while fetching {video_id}")]
    Blocked { video_id: String },

    /// The source reports the clip does not exist as claimed.
    #[error("video {video_id} is fake")]
    Fake { video_id: String },

    /// Anything else; not attributable to the submitter.
    #[error("failed to fetch {video_id}: {message}")]
    Other { video_id: String, message: String },
}

impl FetchError {
    pub fn other(video_id: &str, message: impl Into<String>) -> Self {
        FetchError::Other {
            video_id: video_id.to_string(),
            message: message.into(),
        }
    }
}
