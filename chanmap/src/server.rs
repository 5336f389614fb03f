//! Dispatch loop owning the backing map
//!
//! `MapServer` is the only code that touches the backing map. Clients never
//! see the map itself: they send a [`MapRequest`] and wait for the reply on
//! the request's own `oneshot` channel. Requests are handled one at a time,
//! so the map needs no lock.
//!
//! ```text
//!  ConcurrentMap ─┐
//!  ConcurrentMap ─┼─► request queue (mpsc) ─► MapServer::run ─► M: Map
//!  AsyncConc.Map ─┘                                │
//!        ▲                                         │
//!        └──────────── oneshot reply ◄─────────────┘
//! ```

use std::ops::ControlFlow;

use plainmap::Map;
use tokio::sync::oneshot;
use tracing::{debug, info, trace, warn};

use crate::client::ConcurrentMap;
use crate::config::MapConfig;
use crate::request::{request_channel, MapRequest, RequestReceiver};

pub struct MapServer<M: Map> {
    /// The backing map, never shared
    store: M,
    request_rx: RequestReceiver<M>,
    /// Number of requests handled so far
    served: u64,
}

impl<M: Map> MapServer<M> {
    /// Create the dispatch loop for `store` and the first client handle.
    ///
    /// The loop does nothing until [`MapServer::run`] is awaited. Until then,
    /// client calls wait (or time out, if the config sets a deadline).
    pub fn new(store: M, config: &MapConfig) -> (Self, ConcurrentMap<M>) {
        let (request_tx, request_rx) = request_channel(config.queue_capacity);
        let server = Self {
            store,
            request_rx,
            served: 0,
        };
        let client = ConcurrentMap::new(request_tx, config.request_timeout());
        (server, client)
    }

    /// Main loop: handle requests until shutdown or until every client is gone.
    ///
    /// Returns the backing map.
    pub async fn run(mut self) -> M {
        debug!(entries = self.store.length(), "dispatch loop started");

        while let Some(request) = self.request_rx.recv().await {
            trace!(request = request.kind(), "received request");
            if self.dispatch(request).is_break() {
                self.shut_down();
                return self.store;
            }
        }

        info!(served = self.served, "no more clients, exiting");
        self.store
    }

    /// Run one request against the map and send its reply
    fn dispatch(&mut self, request: MapRequest<M>) -> ControlFlow<()> {
        self.served += 1;

        match request {
            MapRequest::UnderlyingMap { response } => {
                reply("underlying_map", response, self.store.clone());
            }
            MapRequest::UnderlyingStorage { response } => {
                let storage = self.store.underlying_storage().clone();
                reply("underlying_storage", response, storage);
            }
            MapRequest::Clear { response } => {
                self.store.clear();
                reply("clear", response, ());
            }
            MapRequest::Contains { key, response } => {
                reply("contains", response, self.store.contains(&key));
            }
            MapRequest::Delete { key, response } => {
                reply("delete", response, self.store.delete(&key));
            }
            MapRequest::Length { response } => {
                reply("length", response, self.store.length());
            }
            MapRequest::Get { key, response } => {
                reply("get", response, self.store.get(&key));
            }
            MapRequest::Set {
                key,
                value,
                response,
            } => {
                reply("set", response, self.store.set(key, value));
            }
            MapRequest::Shutdown { response } => {
                reply("shutdown", response, ());
                return ControlFlow::Break(());
            }
        }

        ControlFlow::Continue(())
    }

    /// Refuse further requests and drop the ones already queued.
    /// Their callers observe a closed reply channel.
    fn shut_down(&mut self) {
        self.request_rx.close();

        let mut dropped = 0usize;
        while let Some(request) = self.request_rx.try_recv() {
            trace!(request = request.kind(), "dropping queued request");
            dropped += 1;
        }
        if dropped > 0 {
            warn!(dropped, "shutdown left queued requests unanswered");
        }

        debug!(served = self.served, "dispatch loop shut down");
    }
}

fn reply<T>(kind: &'static str, response: oneshot::Sender<T>, value: T) {
    if response.send(value).is_err() {
        trace!(request = kind, "caller went away, reply discarded");
    }
}
