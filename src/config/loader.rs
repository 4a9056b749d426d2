//! Configuration file reading and writing.

use std::path::Path;

use super::model::OrderlyConfig;
use crate::error::ConfigError;

/// Parses config file contents.
pub fn parse_config(path: &Path, content: &str) -> Result<OrderlyConfig, ConfigError> {
    serde_json::from_str(content).map_err(|source| ConfigError::ParseFailed {
        path: path.to_path_buf(),
        source,
    })
}

/// Renders a config as pretty-printed JSON with snake_case keys.
pub fn render_config(config: &OrderlyConfig) -> Result<String, ConfigError> {
    Ok(serde_json::to_string_pretty(config)?)
}

/// Reads and parses the config file.
pub async fn read_config(path: &Path) -> Result<OrderlyConfig, ConfigError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| ConfigError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })?;

    parse_config(path, &content)
}

/// Serializes the config and overwrites the file, creating its directory first.
pub async fn write_config(path: &Path, config: &OrderlyConfig) -> Result<(), ConfigError> {
    let json = render_config(config)?;

    let write_failed = |source| ConfigError::WriteFailed {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await.map_err(write_failed)?;
    }

    tokio::fs::write(path, json).await.map_err(write_failed)
}
