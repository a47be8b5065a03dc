//! Environment-backed configuration.
//!
//! Every setting has a default. Override with `VIDSCORE_*` environment variables.

pub mod error;

#[cfg(test)]
mod tests;

pub use error::ConfigError;

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::constants::{
    DEFAULT_CHECK_PROBABILITY, DEFAULT_EMBEDDING_DIM, DIFFERENCE_THRESHOLD, DOWNLOAD_CONCURRENCY,
    DimConfig, FAKE_VIDEO_PUNISHMENT, HIGH_SCORE_LOG_THRESHOLD, MAX_VIDEO_LENGTH, MIN_SCORE,
    MIN_VIDEO_LENGTH, SIMILARITY_THRESHOLD, STRICT_MATCH_ATOL, STRICT_MATCH_RTOL,
    VIDEO_DOWNLOAD_TIMEOUT,
};

/// Default Qdrant URL used when `VIDSCORE_QDRANT_URL` is not set.
pub const DEFAULT_QDRANT_URL: &str = "http://localhost:6334";

/// Default collection holding accepted video embeddings.
pub const DEFAULT_COLLECTION: &str = "video_embeddings";

/// Process configuration loaded from environment variables.
///
/// Use [`ScoringConfig::from_env`] to read `VIDSCORE_*` overrides on top of defaults.
#[derive(Debug, Clone)]
pub struct ScoringConfig {
    /// Qdrant endpoint URL. Default: `http://localhost:6334`.
    pub qdrant_url: String,

    /// Collection storing video embeddings. Default: `video_embeddings`.
    pub collection: String,

    /// Remote embedding service base URL. `None` runs the deterministic stub.
    pub embedding_url: Option<String>,

    /// Media fetch service base URL. `None` disables download audits.
    pub fetch_url: Option<String>,

    /// Egress proxies as `http://user:pass@ip:port` URLs.
    pub proxies: Vec<String>,

    /// Probability that a batch gets a download audit. Default: `0.1`.
    pub check_probability: f64,

    /// Inclusive duration bounds in seconds. Default: `5..=120`.
    pub min_video_length: u64,
    pub max_video_length: u64,

    /// Per-attempt fetch timeout. Default: `10s`.
    pub download_timeout: Duration,

    /// Download gate capacity. Default: `5`.
    pub download_concurrency: usize,

    /// Fixed embedding width. Default: `1024`.
    pub embedding_dim: usize,

    /// Seed for the sampling RNG. `None` seeds from entropy.
    pub rng_seed: Option<u64>,

    /// JSONL file receiving accepted batches. `None` discards them.
    pub dataset_path: Option<PathBuf>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            qdrant_url: DEFAULT_QDRANT_URL.to_string(),
            collection: DEFAULT_COLLECTION.to_string(),
            embedding_url: None,
            fetch_url: None,
            proxies: Vec::new(),
            check_probability: DEFAULT_CHECK_PROBABILITY,
            min_video_length: MIN_VIDEO_LENGTH,
            max_video_length: MAX_VIDEO_LENGTH,
            download_timeout: VIDEO_DOWNLOAD_TIMEOUT,
            download_concurrency: DOWNLOAD_CONCURRENCY,
            embedding_dim: DEFAULT_EMBEDDING_DIM,
            rng_seed: None,
            dataset_path: None,
        }
    }
}

impl ScoringConfig {
    const ENV_QDRANT_URL: &'static str = "VIDSCORE_QDRANT_URL";
    const ENV_COLLECTION: &'static str = "VIDSCORE_COLLECTION";
    const ENV_EMBEDDING_URL: &'static str = "VIDSCORE_EMBEDDING_URL";
    const ENV_FETCH_URL: &'static str = "VIDSCORE_FETCH_URL";
    const ENV_PROXY_LIST: &'static str = "VIDSCORE_PROXY_LIST";
    const ENV_CHECK_PROBABILITY: &'static str = "VIDSCORE_CHECK_PROBABILITY";
    const ENV_MIN_VIDEO_LENGTH: &'static str = "VIDSCORE_MIN_VIDEO_LENGTH";
    const ENV_MAX_VIDEO_LENGTH: &'static str = "VIDSCORE_MAX_VIDEO_LENGTH";
    const ENV_DOWNLOAD_TIMEOUT: &'static str = "VIDSCORE_DOWNLOAD_TIMEOUT_SECS";
    const ENV_DOWNLOAD_CONCURRENCY: &'static str = "VIDSCORE_DOWNLOAD_CONCURRENCY";
    const ENV_EMBEDDING_DIM: &'static str = "VIDSCORE_EMBEDDING_DIM";
    const ENV_RNG_SEED: &'static str = "VIDSCORE_RNG_SEED";
    const ENV_DATASET_PATH: &'static str = "VIDSCORE_DATASET_PATH";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let proxies = match Self::parse_optional_string_from_env(Self::ENV_PROXY_LIST) {
            Some(raw) => parse_proxy_list(&raw)?,
            None => defaults.proxies,
        };

        Ok(Self {
            qdrant_url: Self::parse_string_from_env(Self::ENV_QDRANT_URL, defaults.qdrant_url),
            collection: Self::parse_string_from_env(Self::ENV_COLLECTION, defaults.collection),
            embedding_url: Self::parse_optional_string_from_env(Self::ENV_EMBEDDING_URL),
            fetch_url: Self::parse_optional_string_from_env(Self::ENV_FETCH_URL),
            proxies,
            check_probability: Self::parse_from_env(
                Self::ENV_CHECK_PROBABILITY,
                defaults.check_probability,
            )?,
            min_video_length: Self::parse_from_env(
                Self::ENV_MIN_VIDEO_LENGTH,
                defaults.min_video_length,
            )?,
            max_video_length: Self::parse_from_env(
                Self::ENV_MAX_VIDEO_LENGTH,
                defaults.max_video_length,
            )?,
            download_timeout: Duration::from_secs(Self::parse_from_env(
                Self::ENV_DOWNLOAD_TIMEOUT,
                defaults.download_timeout.as_secs(),
            )?),
            download_concurrency: Self::parse_from_env(
                Self::ENV_DOWNLOAD_CONCURRENCY,
                defaults.download_concurrency,
            )?,
            embedding_dim: Self::parse_from_env(Self::ENV_EMBEDDING_DIM, defaults.embedding_dim)?,
            rng_seed: Self::parse_optional_string_from_env(Self::ENV_RNG_SEED)
                .map(|v| parse_value(Self::ENV_RNG_SEED, &v))
                .transpose()?,
            dataset_path: Self::parse_optional_string_from_env(Self::ENV_DATASET_PATH)
                .map(PathBuf::from),
        })
    }

    /// Validates basic invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.check_probability) {
            return Err(ConfigError::InvalidProbability {
                value: self.check_probability,
            });
        }

        if self.min_video_length > self.max_video_length {
            return Err(ConfigError::InvalidLengthBounds {
                min: self.min_video_length,
                max: self.max_video_length,
            });
        }

        if self.download_concurrency == 0 {
            return Err(ConfigError::ZeroValue {
                name: "download concurrency",
            });
        }

        if self.embedding_dim == 0 {
            return Err(ConfigError::ZeroValue {
                name: "embedding dimension",
            });
        }

        if self.download_timeout.is_zero() {
            return Err(ConfigError::ZeroValue {
                name: "download timeout",
            });
        }

        Ok(())
    }

    /// Thresholds and constants consumed by the scoring pipeline.
    pub fn policy(&self) -> ScoringPolicy {
        ScoringPolicy {
            min_video_length: self.min_video_length,
            max_video_length: self.max_video_length,
            check_probability: self.check_probability,
            download_timeout: self.download_timeout,
            dims: DimConfig::new(self.embedding_dim),
            ..ScoringPolicy::default()
        }
    }

    fn parse_string_from_env(var_name: &str, default: String) -> String {
        env::var(var_name).unwrap_or(default)
    }

    fn parse_optional_string_from_env(var_name: &str) -> Option<String> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn parse_from_env<T>(var_name: &'static str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        match Self::parse_optional_string_from_env(var_name) {
            Some(value) => parse_value(var_name, &value),
            None => Ok(default),
        }
    }
}

fn parse_value<T>(name: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value.parse().map_err(|e: T::Err| ConfigError::ParseError {
        name,
        value: value.to_string(),
        reason: e.to_string(),
    })
}

/// Parses a JSON array of `ip:port:user:pass` entries into proxy URLs.
pub fn parse_proxy_list(raw: &str) -> Result<Vec<String>, ConfigError> {
    let entries: Vec<String> =
        serde_json::from_str(raw).map_err(|source| ConfigError::ProxyListParse { source })?;

    entries.iter().map(|entry| parse_proxy(entry)).collect()
}

/// Rewrites `ip:port:user:pass` as `http://user:pass@ip:port`.
pub fn parse_proxy(entry: &str) -> Result<String, ConfigError> {
    let parts: Vec<&str> = entry.trim().split(':').collect();
    match parts.as_slice() {
        [ip, port, user, pass] if !ip.is_empty() && !port.is_empty() => {
            Ok(format!("http://{user}:{pass}@{ip}:{port}"))
        }
        _ => Err(ConfigError::InvalidProxy {
            entry: entry.to_string(),
        }),
    }
}

/// Thresholds, bounds and constants that drive one scoring pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringPolicy {
    pub min_video_length: u64,
    pub max_video_length: u64,
    pub check_probability: f64,
    pub download_timeout: Duration,
    pub difference_threshold: f32,
    pub similarity_threshold: f32,
    pub strict_atol: f32,
    pub strict_rtol: f32,
    pub min_score: f32,
    pub punishment: f32,
    pub high_score_log_threshold: f32,
    pub dims: DimConfig,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            min_video_length: MIN_VIDEO_LENGTH,
            max_video_length: MAX_VIDEO_LENGTH,
            check_probability: DEFAULT_CHECK_PROBABILITY,
            download_timeout: VIDEO_DOWNLOAD_TIMEOUT,
            difference_threshold: DIFFERENCE_THRESHOLD,
            similarity_threshold: SIMILARITY_THRESHOLD,
            strict_atol: STRICT_MATCH_ATOL,
            strict_rtol: STRICT_MATCH_RTOL,
            min_score: MIN_SCORE,
            punishment: FAKE_VIDEO_PUNISHMENT,
            high_score_log_threshold: HIGH_SCORE_LOG_THRESHOLD,
            dims: DimConfig::default(),
        }
    }
}
