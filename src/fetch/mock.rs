use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use super::{FetchError, MediaFetcher};
use crate::embedding::MediaClip;

/// What a scripted fetch of one video id does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptedFetch {
    /// Returns these bytes.
    Media(Vec<u8>),
    /// Sleeps, then returns these bytes.
    Delayed(Duration, Vec<u8>),
    Blocked,
    Fake,
    Other,
    /// Never completes.
    Hang,
}

/// Fetcher whose outcome is scripted per video id. Unscripted ids return the
/// id's bytes as media.
#[derive(Default)]
pub struct ScriptedMediaFetcher {
    script: Mutex<HashMap<String, ScriptedFetch>>,
    attempts: Mutex<Vec<(String, Option<String>)>>,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

impl ScriptedMediaFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn script(&self, video_id: &str, outcome: ScriptedFetch) {
        self.script.lock().insert(video_id.to_string(), outcome);
    }

    /// Every attempt as `(video_id, proxy)`, in call order.
    pub fn attempts(&self) -> Vec<(String, Option<String>)> {
        self.attempts.lock().clone()
    }

    pub fn attempted_ids(&self) -> Vec<String> {
        self.attempts.lock().iter().map(|(id, _)| id.clone()).collect()
    }

    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }
}

struct InFlight<'a>(&'a AtomicUsize);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl MediaFetcher for ScriptedMediaFetcher {
    async fn fetch(
        &self,
        video_id: &str,
        start_time: u64,
        end_time: u64,
        proxy: Option<&str>,
    ) -> Result<MediaClip, FetchError> {
        self.attempts
            .lock()
            .push((video_id.to_string(), proxy.map(str::to_string)));

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(now, Ordering::SeqCst);
        let _in_flight = InFlight(&self.in_flight);

        let outcome = self
            .script
            .lock()
            .get(video_id)
            .cloned()
            .unwrap_or_else(|| ScriptedFetch::Media(video_id.as_bytes().to_vec()));

        let clip = |bytes: Vec<u8>| MediaClip {
            video_id: video_id.to_string(),
            start_time,
            end_time,
            bytes,
        };

        match outcome {
            ScriptedFetch::Media(bytes) => Ok(clip(bytes)),
            ScriptedFetch::Delayed(delay, bytes) => {
                tokio::time::sleep(delay).await;
                Ok(clip(bytes))
            }
            ScriptedFetch::Blocked => Err(FetchError::Blocked {
                video_id: video_id.to_string(),
            }),
            ScriptedFetch::Fake => Err(FetchError::Fake {
                video_id: video_id.to_string(),
            }),
            ScriptedFetch::Other => Err(FetchError::other(video_id, "scripted failure")),
            ScriptedFetch::Hang => {
                std::future::pending::<()>().await;
                Err(FetchError::other(video_id, "unreachable"))
            }
        }
    }
}
