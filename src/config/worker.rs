//! Single I/O worker that executes config loads and saves in submission order.

use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use tokio::runtime::Handle;
use tokio::sync::{mpsc, oneshot, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, error};

use super::loader;
use super::model::OrderlyConfig;
use crate::error::ConfigError;

/// A request queued on the I/O worker.
pub(crate) enum IoRequest {
    /// Read the file and reply with its contents (or defaults).
    Load {
        reply: oneshot::Sender<OrderlyConfig>,
    },
    /// Write the current in-memory config. Repair saves have no reply.
    Save { reply: Option<oneshot::Sender<()>> },
}

/// Handle to a load or save queued on the I/O worker.
///
/// Awaiting it yields the result once the worker has run the request.
/// Dropping it leaves the request queued; it still runs to completion.
#[derive(Debug)]
pub struct PendingIo<T> {
    rx: oneshot::Receiver<T>,
}

impl<T> PendingIo<T> {
    pub(crate) fn new(rx: oneshot::Receiver<T>) -> Self {
        Self { rx }
    }
}

impl<T> Future for PendingIo<T> {
    type Output = Result<T, ConfigError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.rx)
            .poll(cx)
            .map(|result| result.map_err(|_| ConfigError::WorkerUnavailable))
    }
}

/// Worker owning all reads and writes of the config file.
pub(crate) struct IoWorker {
    /// Resolved config file path.
    path: PathBuf,
    /// In-memory config shared with the manager; read when saving.
    config: Arc<RwLock<Option<OrderlyConfig>>>,
    /// Incoming requests.
    rx: mpsc::UnboundedReceiver<IoRequest>,
    /// Own queue, for repair saves. Weak so the worker exits once the manager is gone.
    repair_tx: mpsc::WeakUnboundedSender<IoRequest>,
    /// A repair requested after the queue closed; runs once the queue is drained.
    repair_pending: bool,
}

impl IoWorker {
    /// Spawns the worker task on `runtime`.
    ///
    /// Returns the sender used to queue requests and the task's handle, which
    /// completes once every sender is dropped and the queue is drained.
    pub(crate) fn spawn(
        runtime: &Handle,
        path: PathBuf,
        config: Arc<RwLock<Option<OrderlyConfig>>>,
    ) -> (mpsc::UnboundedSender<IoRequest>, JoinHandle<()>) {
        let (tx, rx) = mpsc::unbounded_channel();

        let worker = Self {
            path,
            config,
            rx,
            repair_tx: tx.downgrade(),
            repair_pending: false,
        };
        let task = runtime.spawn(worker.run());

        (tx, task)
    }

    /// Runs requests one at a time until every sender is dropped.
    async fn run(mut self) {
        debug!(path = %self.path.display(), "Config I/O worker started");

        while let Some(request) = self.rx.recv().await {
            match request {
                IoRequest::Load { reply } => {
                    let config = self.load().await;
                    let _ = reply.send(config);
                }
                IoRequest::Save { reply } => {
                    self.save().await;
                    if let Some(reply) = reply {
                        let _ = reply.send(());
                    }
                }
            }
        }

        if self.repair_pending {
            self.save().await;
        }

        debug!(path = %self.path.display(), "Config I/O worker stopped");
    }

    async fn load(&mut self) -> OrderlyConfig {
        match loader::read_config(&self.path).await {
            Ok(config) => config,
            Err(e) => {
                error!(
                    path = %self.path.display(),
                    error = %e,
                    "Unable to read config file, restoring defaults"
                );
                self.queue_repair();
                OrderlyConfig::default()
            }
        }
    }

    async fn save(&self) {
        let snapshot = self.config.read().await.clone().unwrap_or_default();

        if let Err(e) = loader::write_config(&self.path, &snapshot).await {
            error!(path = %self.path.display(), error = %e, "Unable to write config file");
        }
    }

    /// Queues a best-effort save behind the requests already submitted.
    fn queue_repair(&mut self) {
        let queued = self
            .repair_tx
            .upgrade()
            .is_some_and(|tx| tx.send(IoRequest::Save { reply: None }).is_ok());

        // The manager is gone, so nothing new can be queued; repair after the drain.
        if !queued {
            self.repair_pending = true;
        }
    }
}
