use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Proxy, StatusCode};
use tracing::debug;

use super::{FetchError, MediaFetcher};
use crate::embedding::MediaClip;

/// Fetches clips from a download service over HTTP.
///
/// `GET {base}/download?video_id=..&start=..&end=..` returns the raw clip.
/// `403`/`429` signal a blocked egress, `404`/`410`/`422` a fake video; every
/// other failure is reported as [`FetchError::Other`].
///
/// Direct downloads share one client; a proxied attempt gets its own.
#[derive(Debug, Clone)]
pub struct HttpMediaFetcher {
    base_url: String,
    request_timeout: Duration,
    direct: Client,
}

impl HttpMediaFetcher {
    pub fn new(base_url: &str, request_timeout: Duration) -> Result<Self, reqwest::Error> {
        let direct = Client::builder().timeout(request_timeout).build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            request_timeout,
            direct,
        })
    }

    fn client_for(&self, video_id: &str, proxy: Option<&str>) -> Result<Client, FetchError> {
        let Some(proxy) = proxy else {
            return Ok(self.direct.clone());
        };

        let proxy = Proxy::all(proxy)
            .map_err(|e| FetchError::other(video_id, format!("invalid proxy: {e}")))?;
        Client::builder()
            .timeout(self.request_timeout)
            .proxy(proxy)
            .build()
            .map_err(|e| FetchError::other(video_id, e.to_string()))
    }
}

/// Maps a non-success download status to its failure signal.
pub fn classify_status(video_id: &str, status: StatusCode) -> FetchError {
    match status {
        StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS => FetchError::Blocked {
            video_id: video_id.to_string(),
        },
        StatusCode::NOT_FOUND | StatusCode::GONE | StatusCode::UNPROCESSABLE_ENTITY => {
            FetchError::Fake {
                video_id: video_id.to_string(),
            }
        }
        other => FetchError::other(video_id, format!("download service returned {other}")),
    }
}

#[async_trait]
impl MediaFetcher for HttpMediaFetcher {
    async fn fetch(
        &self,
        video_id: &str,
        start_time: u64,
        end_time: u64,
        proxy: Option<&str>,
    ) -> Result<MediaClip, FetchError> {
        let client = self.client_for(video_id, proxy)?;
        let url = format!("{}/download", self.base_url);
        debug!(%url, video_id, start_time, end_time, via_proxy = proxy.is_some(), "Fetching clip");

        let response = client
            .get(&url)
            .query(&[
                ("video_id", video_id.to_string()),
                ("start", start_time.to_string()),
                ("end", end_time.to_string()),
            ])
            .send()
            .await
            .map_err(|e| FetchError::other(video_id, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(classify_status(video_id, status));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| FetchError::other(video_id, e.to_string()))?;

        Ok(MediaClip {
            video_id: video_id.to_string(),
            start_time,
            end_time,
            bytes: bytes.to_vec(),
        })
    }
}

/// Fetcher used when no download service is configured; every audit falls
/// back to description-only verification.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableFetcher;

#[async_trait]
impl MediaFetcher for UnavailableFetcher {
    async fn fetch(
        &self,
        video_id: &str,
        _start_time: u64,
        _end_time: u64,
        _proxy: Option<&str>,
    ) -> Result<MediaClip, FetchError> {
        Err(FetchError::other(video_id, "no download service configured"))
    }
}
