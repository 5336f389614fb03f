//! Request messages and the request channel
//!
//! Every request carries exactly one `oneshot` reply channel. The dispatch
//! loop answers each request once; a request dropped without an answer is
//! seen by its caller as [`MapError::Closed`].

use plainmap::Map;
use tokio::sync::{mpsc, oneshot};

use crate::error::MapError;

/// Requests sent from map clients to the dispatch loop
pub enum MapRequest<M: Map> {
    /// Return a copy of the backing map. Writes to the copy never reach
    /// the served map, and the copy does not see later requests.
    UnderlyingMap { response: oneshot::Sender<M> },
    /// Return a copy of the backing map's raw storage, detached the same way
    UnderlyingStorage {
        response: oneshot::Sender<M::Storage>,
    },
    /// Remove all entries
    Clear { response: oneshot::Sender<()> },
    Contains {
        key: M::Key,
        response: oneshot::Sender<bool>,
    },
    /// Remove a key (returns the new length)
    Delete {
        key: M::Key,
        response: oneshot::Sender<usize>,
    },
    Length { response: oneshot::Sender<usize> },
    Get {
        key: M::Key,
        response: oneshot::Sender<Option<M::Value>>,
    },
    /// Insert or overwrite (returns the new length)
    Set {
        key: M::Key,
        value: M::Value,
        response: oneshot::Sender<usize>,
    },
    /// Stop the dispatch loop after acknowledging
    Shutdown { response: oneshot::Sender<()> },
}

impl<M: Map> MapRequest<M> {
    /// Short name for logging
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UnderlyingMap { .. } => "underlying_map",
            Self::UnderlyingStorage { .. } => "underlying_storage",
            Self::Clear { .. } => "clear",
            Self::Contains { .. } => "contains",
            Self::Delete { .. } => "delete",
            Self::Length { .. } => "length",
            Self::Get { .. } => "get",
            Self::Set { .. } => "set",
            Self::Shutdown { .. } => "shutdown",
        }
    }
}

/// Sending side of the request queue, bounded or not
pub(crate) enum RequestSender<M: Map> {
    Bounded(mpsc::Sender<MapRequest<M>>),
    Unbounded(mpsc::UnboundedSender<MapRequest<M>>),
}

impl<M: Map> Clone for RequestSender<M> {
    fn clone(&self) -> Self {
        match self {
            Self::Bounded(tx) => Self::Bounded(tx.clone()),
            Self::Unbounded(tx) => Self::Unbounded(tx.clone()),
        }
    }
}

impl<M: Map> RequestSender<M> {
    pub(crate) async fn send(&self, request: MapRequest<M>) -> Result<(), MapError> {
        match self {
            Self::Bounded(tx) => tx.send(request).await.map_err(|_| MapError::Closed),
            Self::Unbounded(tx) => tx.send(request).map_err(|_| MapError::Closed),
        }
    }

    /// Must not be called from within an async runtime.
    pub(crate) fn blocking_send(&self, request: MapRequest<M>) -> Result<(), MapError> {
        match self {
            Self::Bounded(tx) => tx.blocking_send(request).map_err(|_| MapError::Closed),
            Self::Unbounded(tx) => tx.send(request).map_err(|_| MapError::Closed),
        }
    }
}

/// Receiving side of the request queue, owned by the dispatch loop
pub(crate) enum RequestReceiver<M: Map> {
    Bounded(mpsc::Receiver<MapRequest<M>>),
    Unbounded(mpsc::UnboundedReceiver<MapRequest<M>>),
}

impl<M: Map> RequestReceiver<M> {
    pub(crate) async fn recv(&mut self) -> Option<MapRequest<M>> {
        match self {
            Self::Bounded(rx) => rx.recv().await,
            Self::Unbounded(rx) => rx.recv().await,
        }
    }

    /// Take an already-queued request without waiting
    pub(crate) fn try_recv(&mut self) -> Option<MapRequest<M>> {
        match self {
            Self::Bounded(rx) => rx.try_recv().ok(),
            Self::Unbounded(rx) => rx.try_recv().ok(),
        }
    }

    /// Refuse new requests; queued ones stay readable
    pub(crate) fn close(&mut self) {
        match self {
            Self::Bounded(rx) => rx.close(),
            Self::Unbounded(rx) => rx.close(),
        }
    }
}

pub(crate) fn request_channel<M: Map>(
    capacity: Option<usize>,
) -> (RequestSender<M>, RequestReceiver<M>) {
    match capacity {
        Some(capacity) => {
            let (tx, rx) = mpsc::channel(capacity.max(1));
            (RequestSender::Bounded(tx), RequestReceiver::Bounded(rx))
        }
        None => {
            let (tx, rx) = mpsc::unbounded_channel();
            (RequestSender::Unbounded(tx), RequestReceiver::Unbounded(rx))
        }
    }
}
