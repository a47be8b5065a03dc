//! Configuration error types.

use thiserror::Error;

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A numeric variable could not be parsed.
    #[error("failed to parse {name}='{value}': {reason}")]
    ParseError {
        name: &'static str,
        value: String,
        reason: String,
    },

    /// `VIDSCORE_PROXY_LIST` was not a JSON array of strings.
    #[error("failed to parse proxy list: {source}")]
    ProxyListParse {
        #[source]
        source: serde_json::Error,
    },

    /// A proxy entry was not of the form `ip:port:user:pass`.
    #[error("invalid proxy entry '{entry}': expected ip:port:user:pass")]
    InvalidProxy { entry: String },

    /// Check probability outside `[0, 1]`.
    #[error("check probability {value} must be within [0, 1]")]
    InvalidProbability { value: f64 },

    /// Minimum clip length above the maximum.
    #[error("min video length {min}s exceeds max video length {max}s")]
    InvalidLengthBounds { min: u64, max: u64 },

    /// A capacity or size that must be positive was zero.
    #[error("{name} must be greater than zero")]
    ZeroValue { name: &'static str },
}
