//! Error types for the config manager.

use std::path::PathBuf;
use thiserror::Error;

/// Configuration loading, saving, and worker errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseFailed {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Failed to write config file '{path}': {source}")]
    WriteFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to serialize config: {0}")]
    SerializeFailed(#[from] serde_json::Error),

    #[error("No Tokio runtime to run the config I/O worker on: {0}")]
    RuntimeUnavailable(#[from] tokio::runtime::TryCurrentError),

    /// The I/O worker is gone, so no load or save can complete.
    #[error("Config I/O worker is no longer running")]
    WorkerUnavailable,
}
