//! Error types of the serialized map

use std::fmt;
use std::time::Duration;

/// Errors returned by map clients and the worker
#[derive(Debug)]
pub enum MapError {
    /// The dispatch loop is gone: the request could not be submitted,
    /// or it was dropped unanswered at shutdown
    Closed,

    /// No reply arrived within the configured deadline
    Timeout(Duration),

    /// The worker thread or its runtime could not be created
    Spawn(std::io::Error),

    /// The worker thread panicked
    WorkerPanicked,
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Closed => write!(f, "Map dispatch loop is closed"),
            Self::Timeout(limit) => write!(f, "No reply within {limit:?}"),
            Self::Spawn(e) => write!(f, "Failed to start map worker: {e}"),
            Self::WorkerPanicked => write!(f, "Map worker panicked"),
        }
    }
}

impl std::error::Error for MapError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Spawn(e) => Some(e),
            _ => None,
        }
    }
}

/// Errors that can occur while loading a [`MapConfig`](crate::MapConfig)
#[derive(Debug)]
pub enum MapConfigError {
    /// Input is not valid JSON or does not match the config shape
    Parse(serde_json::Error),

    /// `queue_capacity` must be at least one
    ZeroCapacity,
}

impl fmt::Display for MapConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(e) => write!(f, "Failed to parse map config: {e}"),
            Self::ZeroCapacity => write!(f, "queue_capacity must be at least 1"),
        }
    }
}

impl std::error::Error for MapConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(e) => Some(e),
            Self::ZeroCapacity => None,
        }
    }
}
