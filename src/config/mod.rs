//! Configuration loading, saving, and in-memory management.

pub mod loader;
pub mod model;
pub mod paths;
pub mod worker;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::{mpsc, oneshot, OnceCell, RwLock};
use tokio::task::JoinHandle;
use tracing::{error, info, trace, warn};

use crate::error::ConfigError;
pub use model::OrderlyConfig;
pub use paths::{ConfigLocation, DEFAULT_MOD_ID};
pub use worker::PendingIo;
use worker::{IoRequest, IoWorker};

/// Owns the on-disk config file and the authoritative in-memory copy.
///
/// All file access goes through one background worker, so loads and saves
/// run strictly in the order they were requested. Share it between callers
/// with an `Arc`, and call [`ConfigManager::shutdown`] before the runtime
/// exits so queued writes reach the disk.
pub struct ConfigManager {
    config: Arc<RwLock<Option<OrderlyConfig>>>,
    config_path: PathBuf,
    requests: mpsc::UnboundedSender<IoRequest>,
    worker: JoinHandle<()>,
    initialized: OnceCell<()>,
}

impl ConfigManager {
    /// Creates a manager for the given location and starts its I/O worker on
    /// the current Tokio runtime.
    ///
    /// No file access happens until the first `init`, `get_config`, `load`
    /// or `save`. Fails if there is no runtime to run the worker on.
    pub fn new(location: &ConfigLocation) -> Result<Self, ConfigError> {
        let runtime = Handle::try_current()?;
        let config_path = location.file_path();
        let config = Arc::new(RwLock::new(None));
        let (requests, worker) =
            IoWorker::spawn(&runtime, config_path.clone(), Arc::clone(&config));

        Ok(Self {
            config,
            config_path,
            requests,
            worker,
            initialized: OnceCell::new(),
        })
    }

    /// Returns the path to the configuration file.
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Returns the current configuration, initializing on first use.
    ///
    /// Concurrent first calls share a single `init`. If initialization cannot
    /// complete, defaults are returned.
    pub async fn get_config(&self) -> OrderlyConfig {
        let ready = self
            .initialized
            .get_or_try_init(|| async { self.init().await.map(|_| ()) })
            .await;

        if let Err(e) = ready {
            error!(error = %e, "Failed to initialize config, using defaults");
            return OrderlyConfig::default();
        }

        self.config.read().await.clone().unwrap_or_default()
    }

    /// Ensures the config file exists, then loads it into memory.
    ///
    /// A missing file is first written with the current (or default) values.
    /// Read and parse failures fall back to defaults; the only error is the
    /// I/O worker having gone away.
    pub async fn init(&self) -> Result<OrderlyConfig, ConfigError> {
        let exists = tokio::fs::try_exists(&self.config_path)
            .await
            .unwrap_or(false);

        if !exists {
            info!(path = %self.config_path.display(), "Creating config file");
            self.save().await?;
        }

        let config = self.reload().await?;
        // Already set, or being set by `get_config`, is fine either way.
        let _ = self.initialized.set(());
        Ok(config)
    }

    /// Loads the file and commits the result as the in-memory config.
    pub async fn reload(&self) -> Result<OrderlyConfig, ConfigError> {
        let config = self.load().await?;
        self.replace(config.clone()).await;
        Ok(config)
    }

    /// Queues a read of the config file on the I/O worker.
    ///
    /// Resolves to the parsed config, or to defaults if the file could not be
    /// read or parsed (a repair save is then queued). Does not touch the
    /// in-memory config.
    pub fn load(&self) -> PendingIo<OrderlyConfig> {
        let (reply, rx) = oneshot::channel();
        self.submit(IoRequest::Load { reply });
        PendingIo::new(rx)
    }

    /// Queues a write of the in-memory config (or defaults) on the I/O worker.
    ///
    /// The snapshot is taken when the worker runs the request. Write failures
    /// are logged and the handle still resolves to `Ok(())`.
    pub fn save(&self) -> PendingIo<()> {
        trace!(path = %self.config_path.display(), "Saving config file");

        let (reply, rx) = oneshot::channel();
        self.submit(IoRequest::Save { reply: Some(reply) });
        PendingIo::new(rx)
    }

    /// Replaces the whole in-memory config. Call `save` to persist it.
    pub async fn replace(&self, config: OrderlyConfig) {
        *self.config.write().await = Some(config);
    }

    /// Closes the request queue and waits for the worker to finish.
    ///
    /// Everything already queued, including repair saves, runs before this
    /// returns. Dropping the manager instead leaves the worker draining in the
    /// background, where runtime shutdown may cut it short.
    pub async fn shutdown(self) -> Result<(), ConfigError> {
        let Self {
            requests, worker, ..
        } = self;
        drop(requests);

        worker.await.map_err(|_| ConfigError::WorkerUnavailable)
    }

    fn submit(&self, request: IoRequest) {
        // On failure the reply sender is dropped with the request, which
        // resolves the pending handle to `WorkerUnavailable`.
        if self.requests.send(request).is_err() {
            warn!(path = %self.config_path.display(), "Config I/O worker is not running");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager_in(dir: &tempfile::TempDir) -> ConfigManager {
        ConfigManager::new(&ConfigLocation::in_dir(dir.path())).unwrap()
    }

    #[test]
    fn test_new_outside_runtime_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = ConfigManager::new(&ConfigLocation::in_dir(dir.path()));

        assert!(matches!(result, Err(ConfigError::RuntimeUnavailable(_))));
    }

    #[tokio::test]
    async fn test_config_path_is_resolved_at_construction() {
        let dir = tempfile::tempdir().unwrap();
        let manager = manager_in(&dir);

        assert_eq!(manager.config_path(), dir.path().join("orderly.json"));
        assert!(!manager.config_path().exists());
    }

    #[tokio::test]
    async fn test_init_keeps_existing_file_values() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("orderly.json"),
            r#"{ "max_distance": 48, "show_on_players": false }"#,
        )
        .unwrap();

        let manager = manager_in(&dir);
        let config = manager.init().await.unwrap();

        assert_eq!(config.max_distance, 48);
        assert!(!config.show_on_players);
        assert!(config.draw);
    }

    #[tokio::test]
    async fn test_load_does_not_touch_memory() {
        let dir = tempfile::tempdir().unwrap();
        let manager = manager_in(&dir);
        manager.get_config().await;

        let mut on_disk = OrderlyConfig::default();
        on_disk.bar_height = 9;
        loader::write_config(manager.config_path(), &on_disk)
            .await
            .unwrap();

        let loaded = manager.load().await.unwrap();
        assert_eq!(loaded.bar_height, 9);
        assert_eq!(manager.get_config().await.bar_height, 4);

        manager.reload().await.unwrap();
        assert_eq!(manager.get_config().await.bar_height, 9);
    }

    #[tokio::test]
    async fn test_save_without_config_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let manager = manager_in(&dir);

        manager.save().await.unwrap();

        let on_disk = loader::read_config(manager.config_path()).await.unwrap();
        assert_eq!(on_disk, OrderlyConfig::default());
    }

    #[tokio::test]
    async fn test_write_failure_is_swallowed() {
        let dir = tempfile::tempdir().unwrap();
        // A regular file where the config directory should be.
        let blocked = dir.path().join("config");
        std::fs::write(&blocked, "").unwrap();

        let manager = ConfigManager::new(&ConfigLocation::in_dir(&blocked)).unwrap();

        tokio_test::assert_ok!(manager.save().await);
        let config = tokio_test::assert_ok!(manager.init().await);
        assert_eq!(config, OrderlyConfig::default());
    }
}
