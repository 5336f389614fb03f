//! Concurrent key/value map served by a single dispatch loop
//!
//! The backing map is moved into a [`MapServer`] and never shared. Clients
//! ([`ConcurrentMap`], [`AsyncConcurrentMap`]) send one [`MapRequest`] per
//! operation and wait for its reply, so callers on many threads see plain map
//! operations while the map itself runs without a lock.
//!
//! ```no_run
//! use chanmap::{ConcurrentMap, HashStorage, MapConfig};
//!
//! let store = HashStorage::<String, i32>::new();
//! let (map, worker) = ConcurrentMap::spawn(store, &MapConfig::default())?;
//! assert_eq!(map.set("a".to_string(), 1)?, 1);
//! assert_eq!(map.get("a".to_string())?, Some(1));
//! map.close()?;
//! let _store = worker.join()?;
//! # Ok::<(), chanmap::MapError>(())
//! ```

pub mod async_client;
pub mod client;
pub mod config;
pub mod error;
pub mod request;
pub mod server;
pub mod worker;

pub use async_client::AsyncConcurrentMap;
pub use client::ConcurrentMap;
pub use config::MapConfig;
pub use error::{MapConfigError, MapError};
pub use request::MapRequest;
pub use server::MapServer;
pub use worker::MapWorker;

// Re-export the backing map contract for convenience
pub use plainmap::{HashStorage, Map};
