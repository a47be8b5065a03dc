use thiserror::Error;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("dataset I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize dataset record: {0}")]
    Serialize(#[from] serde_json::Error),
}
