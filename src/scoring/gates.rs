use std::sync::Arc;

use tokio::sync::{AcquireError, Semaphore, SemaphorePermit};

use crate::constants::{DOWNLOAD_CONCURRENCY, EMBEDDING_CONCURRENCY};

/// Process-wide capacity limits shared by every batch scored through the
/// same gates. Clones share permits.
#[derive(Debug, Clone)]
pub struct ConcurrencyGates {
    embedding: Arc<Semaphore>,
    download: Arc<Semaphore>,
}

impl Default for ConcurrencyGates {
    fn default() -> Self {
        Self::new(EMBEDDING_CONCURRENCY, DOWNLOAD_CONCURRENCY)
    }
}

impl ConcurrencyGates {
    /// Capacities below one are raised to one.
    pub fn new(embedding_slots: usize, download_slots: usize) -> Self {
        Self {
            embedding: Arc::new(Semaphore::new(embedding_slots.max(1))),
            download: Arc::new(Semaphore::new(download_slots.max(1))),
        }
    }

    /// Held for every embedding model invocation.
    pub async fn embedding_slot(&self) -> Result<SemaphorePermit<'_>, AcquireError> {
        self.embedding.acquire().await
    }

    /// Held for one media fetch attempt.
    pub async fn download_slot(&self) -> Result<SemaphorePermit<'_>, AcquireError> {
        self.download.acquire().await
    }

    pub fn available_embedding_slots(&self) -> usize {
        self.embedding.available_permits()
    }

    pub fn available_download_slots(&self) -> usize {
        self.download.available_permits()
    }
}
