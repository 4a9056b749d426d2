//! Resolution of the config file location.

use std::path::PathBuf;

/// Mod id used for the config file name when none is given.
pub const DEFAULT_MOD_ID: &str = "orderly";

/// Where the host mod loader keeps config files, plus the mod's id.
#[derive(Debug, Clone)]
pub struct ConfigLocation {
    config_dir: PathBuf,
    mod_id: String,
}

impl ConfigLocation {
    pub fn new(config_dir: impl Into<PathBuf>, mod_id: impl Into<String>) -> Self {
        Self {
            config_dir: config_dir.into(),
            mod_id: mod_id.into(),
        }
    }

    /// Location for the default mod id inside the given config directory.
    pub fn in_dir(config_dir: impl Into<PathBuf>) -> Self {
        Self::new(config_dir, DEFAULT_MOD_ID)
    }

    /// Returns `<config_dir>/<mod_id>.json`.
    pub fn file_path(&self) -> PathBuf {
        self.config_dir.join(format!("{}.json", self.mod_id))
    }
}
