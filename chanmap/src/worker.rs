//! Dedicated worker thread running the dispatch loop

use std::thread::JoinHandle;

use plainmap::Map;
use tracing::debug;

use crate::client::ConcurrentMap;
use crate::config::MapConfig;
use crate::error::MapError;
use crate::server::MapServer;

/// Join handle of a dispatch loop started with [`ConcurrentMap::spawn`]
pub struct MapWorker<M> {
    handle: JoinHandle<M>,
}

impl<M> MapWorker<M> {
    /// Wait for the loop to exit and take back the backing map.
    ///
    /// The loop exits after [`ConcurrentMap::close`], or once every client
    /// handle has been dropped.
    pub fn join(self) -> Result<M, MapError> {
        self.handle.join().map_err(|_| MapError::WorkerPanicked)
    }

    #[must_use]
    pub fn thread_name(&self) -> Option<&str> {
        self.handle.thread().name()
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl<M> ConcurrentMap<M>
where
    M: Map + Send + 'static,
    M::Key: Send + 'static,
    M::Value: Send + 'static,
    M::Storage: Send + 'static,
{
    /// Move `store` onto a new thread that runs its dispatch loop, and return
    /// the first client handle.
    ///
    /// The thread drives a current-thread tokio runtime and touches nothing
    /// but the loop.
    pub fn spawn(store: M, config: &MapConfig) -> Result<(Self, MapWorker<M>), MapError> {
        let (server, client) = MapServer::new(store, config);

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(MapError::Spawn)?;

        let handle = std::thread::Builder::new()
            .name(config.worker_name.clone())
            .spawn(move || runtime.block_on(server.run()))
            .map_err(MapError::Spawn)?;

        debug!(worker = %config.worker_name, "map worker started");
        Ok((client, MapWorker { handle }))
    }
}
