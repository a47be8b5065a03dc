use std::time::Duration;

use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::DimConfig;

use super::{EmbeddingError, EmbeddingService, Embeddings, MediaClip};

/// Embedding server reachable over HTTP.
///
/// - `POST {base}/embed_text` with `{"texts": [..]}` answers `{"embeddings": [[..]]}`.
/// - `POST {base}/embed?video_id=..&description=..` with the raw clip as the body
///   answers `{"video": [..], "audio": [..], "description": [..]}`.
#[derive(Clone)]
pub struct RemoteEmbedder {
    client: Client,
    base_url: String,
    device: String,
    dims: DimConfig,
}

impl std::fmt::Debug for RemoteEmbedder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteEmbedder")
            .field("base_url", &self.base_url)
            .field("device", &self.device)
            .field("embedding_dim", &self.dims.embedding_dim)
            .finish()
    }
}

#[derive(Serialize)]
struct EmbedTextRequest<'a> {
    texts: [&'a str; 1],
}

#[derive(Deserialize)]
struct EmbedTextResponse {
    embeddings: Vec<Vec<f32>>,
}

#[derive(Deserialize)]
struct EmbedClipResponse {
    video: Vec<f32>,
    audio: Vec<f32>,
    description: Vec<f32>,
}

impl RemoteEmbedder {
    pub fn new(base_url: &str, dims: DimConfig, timeout: Duration) -> Result<Self, EmbeddingError> {
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(EmbeddingError::InvalidConfig {
                reason: format!("embedding URL must be http(s): {base_url}"),
            });
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| EmbeddingError::InvalidConfig {
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            device: format!("remote:{}", base_url.trim_end_matches('/')),
            base_url: base_url.trim_end_matches('/').to_string(),
            dims,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn request_failed(&self, url: &str, err: reqwest::Error) -> EmbeddingError {
        EmbeddingError::RequestFailed {
            url: url.to_string(),
            message: err.to_string(),
        }
    }
}

impl EmbeddingService for RemoteEmbedder {
    async fn embed_text(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let url = self.endpoint("embed_text");
        debug!(%url, text_len = text.len(), "Requesting text embedding");

        let response: EmbedTextResponse = self
            .client
            .post(&url)
            .json(&EmbedTextRequest { texts: [text] })
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| self.request_failed(&url, e))?
            .json()
            .await
            .map_err(|e| EmbeddingError::InvalidResponse {
                reason: e.to_string(),
            })?;

        let embedding =
            response
                .embeddings
                .into_iter()
                .next()
                .ok_or_else(|| EmbeddingError::InvalidResponse {
                    reason: "no embedding returned for text".to_string(),
                })?;
        self.dims.check(&embedding)?;
        Ok(embedding)
    }

    async fn embed(
        &self,
        description: &str,
        media: &MediaClip,
    ) -> Result<Embeddings, EmbeddingError> {
        let url = self.endpoint("embed");
        debug!(
            %url,
            video_id = %media.video_id,
            media_bytes = media.bytes.len(),
            "Requesting clip embeddings"
        );

        let response: EmbedClipResponse = self
            .client
            .post(&url)
            .query(&[("video_id", media.video_id.as_str()), ("description", description)])
            .header(CONTENT_TYPE, "application/octet-stream")
            .body(media.bytes.clone())
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| self.request_failed(&url, e))?
            .json()
            .await
            .map_err(|e| EmbeddingError::InvalidResponse {
                reason: e.to_string(),
            })?;

        self.dims.check(&response.video)?;
        self.dims.check(&response.audio)?;
        self.dims.check(&response.description)?;

        Ok(Embeddings {
            video: response.video,
            audio: response.audio,
            description: response.description,
        })
    }

    fn device(&self) -> &str {
        &self.device
    }
}
