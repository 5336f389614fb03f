//! Pieces of the `chanmap-demo` binary

use std::error::Error;
use std::fs::File;
use std::path::Path;

use chanmap::{ConcurrentMap, HashStorage, MapConfig};

pub type DemoMap = ConcurrentMap<HashStorage<String, u64>>;

/// Load the config file, or the defaults without one
pub fn load_config(path: Option<&Path>) -> Result<MapConfig, Box<dyn Error>> {
    Ok(match path {
        Some(path) => MapConfig::from_reader(File::open(path)?)?,
        None => MapConfig::default(),
    })
}

/// Let `callers` threads each set their own key to 1.
///
/// Returns the largest length any caller saw after its write.
pub fn run_callers(map: &DemoMap, callers: usize) -> Result<usize, Box<dyn Error>> {
    let threads: Vec<_> = (0..callers)
        .map(|i| {
            let map = map.clone();
            std::thread::spawn(move || map.set(format!("caller-{i}"), 1))
        })
        .collect();

    let mut longest = 0;
    for thread in threads {
        let length = thread.join().map_err(|_| "caller thread panicked")??;
        longest = longest.max(length);
    }
    Ok(longest)
}
