//! Source media retrieval for authenticity audits.
//!
//! A fetch either returns the clip or fails with one of three distinguished
//! signals ([`FetchError`]). Timeouts are imposed by the caller.

pub mod error;
pub mod http;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod proxy;

#[cfg(test)]
mod tests;

use async_trait::async_trait;

pub use error::FetchError;
pub use http::{HttpMediaFetcher, UnavailableFetcher};
#[cfg(any(test, feature = "mock"))]
pub use mock::{ScriptedFetch, ScriptedMediaFetcher};
pub use proxy::ProxyPool;

use crate::embedding::MediaClip;

/// Downloads a clip of a source video, optionally through an egress proxy.
#[async_trait]
pub trait MediaFetcher: Send + Sync {
    async fn fetch(
        &self,
        video_id: &str,
        start_time: u64,
        end_time: u64,
        proxy: Option<&str>,
    ) -> Result<MediaClip, FetchError>;
}
