//! Async client of the dispatch loop, for callers running inside tokio

use std::time::Duration;

use plainmap::Map;
use tokio::sync::oneshot;
use tracing::trace;

use crate::client::ConcurrentMap;
use crate::error::MapError;
use crate::request::{MapRequest, RequestSender};

/// Async twin of [`ConcurrentMap`].
///
/// With a request timeout set, a call that gets no reply in time fails with
/// [`MapError::Timeout`]. The request may still be executed by the loop; its
/// reply is then discarded.
pub struct AsyncConcurrentMap<M: Map> {
    request_tx: RequestSender<M>,
    request_timeout: Option<Duration>,
}

impl<M: Map> Clone for AsyncConcurrentMap<M> {
    fn clone(&self) -> Self {
        Self {
            request_tx: self.request_tx.clone(),
            request_timeout: self.request_timeout,
        }
    }
}

impl<M: Map> AsyncConcurrentMap<M> {
    pub(crate) fn new(request_tx: RequestSender<M>, request_timeout: Option<Duration>) -> Self {
        Self {
            request_tx,
            request_timeout,
        }
    }

    /// Override the deadline of this handle
    #[must_use]
    pub fn with_timeout(mut self, request_timeout: Option<Duration>) -> Self {
        self.request_timeout = request_timeout;
        self
    }

    async fn roundtrip<T>(
        &self,
        make_request: impl FnOnce(oneshot::Sender<T>) -> MapRequest<M>,
    ) -> Result<T, MapError> {
        let (tx, rx) = oneshot::channel();
        let request = make_request(tx);
        let kind = request.kind();

        let exchange = async {
            self.request_tx.send(request).await?;
            trace!(request = kind, "awaiting reply");
            rx.await.map_err(|_| MapError::Closed)
        };

        match self.request_timeout {
            Some(limit) => tokio::time::timeout(limit, exchange)
                .await
                .map_err(|_| MapError::Timeout(limit))?,
            None => exchange.await,
        }
    }

    /// Detached copy of the backing map
    pub async fn underlying_map(&self) -> Result<M, MapError> {
        self.roundtrip(|response| MapRequest::UnderlyingMap { response })
            .await
    }

    /// Detached copy of the backing map's raw storage
    pub async fn underlying_storage(&self) -> Result<M::Storage, MapError> {
        self.roundtrip(|response| MapRequest::UnderlyingStorage { response })
            .await
    }

    pub async fn clear(&self) -> Result<(), MapError> {
        self.roundtrip(|response| MapRequest::Clear { response })
            .await
    }

    pub async fn contains(&self, key: M::Key) -> Result<bool, MapError> {
        self.roundtrip(|response| MapRequest::Contains { key, response })
            .await
    }

    pub async fn delete(&self, key: M::Key) -> Result<usize, MapError> {
        self.roundtrip(|response| MapRequest::Delete { key, response })
            .await
    }

    pub async fn get(&self, key: M::Key) -> Result<Option<M::Value>, MapError> {
        self.roundtrip(|response| MapRequest::Get { key, response })
            .await
    }

    pub async fn lookup(&self, key: M::Key) -> Result<(M::Value, bool), MapError>
    where
        M::Value: Default,
    {
        Ok(match self.get(key).await? {
            Some(value) => (value, true),
            None => (M::Value::default(), false),
        })
    }

    /// `length() == 0`, not atomic: see [`ConcurrentMap::is_empty`]
    pub async fn is_empty(&self) -> Result<bool, MapError> {
        Ok(self.length().await? == 0)
    }

    pub async fn length(&self) -> Result<usize, MapError> {
        self.roundtrip(|response| MapRequest::Length { response })
            .await
    }

    pub async fn set(&self, key: M::Key, value: M::Value) -> Result<usize, MapError> {
        self.roundtrip(|response| MapRequest::Set {
            key,
            value,
            response,
        })
        .await
    }

    pub async fn close(&self) -> Result<(), MapError> {
        self.roundtrip(|response| MapRequest::Shutdown { response })
            .await
    }

    /// Blocking handle over the same queue. Use it from threads that are not
    /// driving an async runtime (or inside `spawn_blocking`).
    #[must_use]
    pub fn into_blocking(self) -> ConcurrentMap<M> {
        ConcurrentMap::new(self.request_tx, self.request_timeout)
    }
}
