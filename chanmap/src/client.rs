//! Blocking client of the dispatch loop
//!
//! Every operation builds one request with its own `oneshot` reply channel,
//! sends it to the `MapServer`, and blocks the calling thread until the reply
//! arrives. This mirrors calling a plain map, but from any number of threads.

use std::time::Duration;

use plainmap::Map;
use tokio::sync::oneshot;
use tracing::trace;

use crate::async_client::AsyncConcurrentMap;
use crate::error::MapError;
use crate::request::{MapRequest, RequestSender};

/// Thread-safe handle to a map owned by a dispatch loop.
///
/// Methods block, so they must not be called from inside an async runtime;
/// convert with [`ConcurrentMap::into_async`] there. Blocking calls have no
/// deadline; the configured request timeout only applies once converted.
pub struct ConcurrentMap<M: Map> {
    request_tx: RequestSender<M>,
    /// Carried over to async handles created from this one
    request_timeout: Option<Duration>,
}

impl<M: Map> Clone for ConcurrentMap<M> {
    fn clone(&self) -> Self {
        Self {
            request_tx: self.request_tx.clone(),
            request_timeout: self.request_timeout,
        }
    }
}

impl<M: Map> ConcurrentMap<M> {
    pub(crate) fn new(request_tx: RequestSender<M>, request_timeout: Option<Duration>) -> Self {
        Self {
            request_tx,
            request_timeout,
        }
    }

    /// Send a request and block until its reply arrives
    fn roundtrip<T>(
        &self,
        make_request: impl FnOnce(oneshot::Sender<T>) -> MapRequest<M>,
    ) -> Result<T, MapError> {
        let (tx, rx) = oneshot::channel();
        let request = make_request(tx);
        let kind = request.kind();

        self.request_tx.blocking_send(request)?;

        trace!(request = kind, "blocking_recv");
        rx.blocking_recv().map_err(|_| MapError::Closed)
    }

    /// Copy of the backing map.
    ///
    /// The copy is detached: later changes made through this handle are not
    /// visible in it, and changes to it do not reach the served map.
    pub fn underlying_map(&self) -> Result<M, MapError> {
        self.roundtrip(|response| MapRequest::UnderlyingMap { response })
    }

    /// Copy of the backing map's raw storage, detached like [`Self::underlying_map`]
    pub fn underlying_storage(&self) -> Result<M::Storage, MapError> {
        self.roundtrip(|response| MapRequest::UnderlyingStorage { response })
    }

    pub fn clear(&self) -> Result<(), MapError> {
        self.roundtrip(|response| MapRequest::Clear { response })
    }

    pub fn contains(&self, key: M::Key) -> Result<bool, MapError> {
        self.roundtrip(|response| MapRequest::Contains { key, response })
    }

    /// Remove `key`, returning the length afterwards. Removing an absent key
    /// changes nothing.
    pub fn delete(&self, key: M::Key) -> Result<usize, MapError> {
        self.roundtrip(|response| MapRequest::Delete { key, response })
    }

    pub fn get(&self, key: M::Key) -> Result<Option<M::Value>, MapError> {
        self.roundtrip(|response| MapRequest::Get { key, response })
    }

    /// Like [`Self::get`], but yields `(value, found)` with the default value
    /// when the key is absent
    pub fn lookup(&self, key: M::Key) -> Result<(M::Value, bool), MapError>
    where
        M::Value: Default,
    {
        Ok(match self.get(key)? {
            Some(value) => (value, true),
            None => (M::Value::default(), false),
        })
    }

    /// `length() == 0`.
    ///
    /// Not atomic with respect to other clients: the map may change between
    /// the answer and its use.
    pub fn is_empty(&self) -> Result<bool, MapError> {
        Ok(self.length()? == 0)
    }

    pub fn length(&self) -> Result<usize, MapError> {
        self.roundtrip(|response| MapRequest::Length { response })
    }

    /// Insert or overwrite, returning the length afterwards
    pub fn set(&self, key: M::Key, value: M::Value) -> Result<usize, MapError> {
        self.roundtrip(|response| MapRequest::Set {
            key,
            value,
            response,
        })
    }

    /// Stop the dispatch loop. Requests still queued behind this one are
    /// dropped, and every later call fails with [`MapError::Closed`].
    pub fn close(&self) -> Result<(), MapError> {
        self.roundtrip(|response| MapRequest::Shutdown { response })
    }

    #[must_use]
    pub fn into_async(self) -> AsyncConcurrentMap<M> {
        AsyncConcurrentMap::new(self.request_tx, self.request_timeout)
    }
}
