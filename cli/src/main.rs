//! Concurrent map demo
//!
//! Starts a map worker, lets many threads write to it at once, then prints
//! what the worker hands back after shutdown.
//!
//! Usage: `chanmap-demo [config.json] [callers]`

use std::path::PathBuf;

use chanmap::{ConcurrentMap, HashStorage, Map};
use cli::{load_config, run_callers};
use tracing::info;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let config = load_config(args.next().map(PathBuf::from).as_deref())?;
    let callers: usize = match args.next() {
        Some(n) => n.parse()?,
        None => 100,
    };
    info!(?config, callers, "starting");

    let (map, worker) = ConcurrentMap::spawn(HashStorage::<String, u64>::new(), &config)?;

    let longest = run_callers(&map, callers)?;
    let length = map.length()?;
    let empty = map.is_empty()?;
    info!(length, longest, empty, "all callers done");
    let (value, found) = map.lookup("caller-0".to_string())?;
    info!(value, found, "lookup caller-0");

    map.close()?;
    let store = worker.join()?;
    info!(entries = store.length(), "worker returned the map");

    Ok(())
}
