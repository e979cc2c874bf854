//! # Smoke Error Types
//!
//! The effect itself never fails at runtime: inputs are clamped and a full
//! particle list drops spawns. Only file I/O and config parsing can fail.

use thiserror::Error;

/// Errors from loading config or writing overlay output.
#[derive(Error, Debug)]
pub enum SmokeError {
    /// A file could not be read or written.
    #[error("I/O error on {path}: {source}")]
    Io {
        /// Path involved.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for `SmokeConfig`.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Config could not be serialized back to TOML.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// Config parsed, but holds values that cannot be clamped into range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for fallible smoke operations.
pub type SmokeResult<T> = Result<T, SmokeError>;
