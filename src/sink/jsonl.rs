use std::path::PathBuf;

use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::{DatasetRecord, DatasetSink, SinkError};

/// Appends records, one JSON object per line, from a background task.
///
/// [`enqueue`](DatasetSink::enqueue) only pushes onto an unbounded channel. The
/// writer task drains it and finishes once every sink handle is dropped,
/// yielding the number of records written.
#[derive(Debug, Clone)]
pub struct JsonlDatasetSink {
    tx: mpsc::UnboundedSender<DatasetRecord>,
    path: PathBuf,
}

impl JsonlDatasetSink {
    /// Starts the writer task. Must be called inside a Tokio runtime.
    pub fn spawn(path: impl Into<PathBuf>) -> (Self, JoinHandle<Result<usize, SinkError>>) {
        let path = path.into();
        let (tx, rx) = mpsc::unbounded_channel();
        let handle = tokio::spawn(write_records(path.clone(), rx));
        (Self { tx, path }, handle)
    }
}

impl DatasetSink for JsonlDatasetSink {
    fn enqueue(&self, record: DatasetRecord) {
        let videos = record.videos.len();
        if self.tx.send(record).is_err() {
            warn!(
                path = %self.path.display(),
                videos,
                "Dataset writer stopped, record dropped"
            );
        }
    }
}

async fn write_records(
    path: PathBuf,
    mut rx: mpsc::UnboundedReceiver<DatasetRecord>,
) -> Result<usize, SinkError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .await?;

    let mut written = 0;
    while let Some(record) = rx.recv().await {
        let mut line = serde_json::to_vec(&record)?;
        line.push(b'\n');
        file.write_all(&line).await?;
        written += 1;
        debug!(path = %path.display(), videos = record.videos.len(), "Dataset record appended");
    }

    file.flush().await?;
    Ok(written)
}
