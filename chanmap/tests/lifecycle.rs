//! Integration tests for starting and stopping the dispatch loop

use chanmap::{ConcurrentMap, HashStorage, Map, MapConfig, MapError, MapServer};
use std::thread;

type Store = HashStorage<u32, String>;

#[test]
fn test_close_returns_store_and_rejects_calls() {
    let (map, worker) = ConcurrentMap::spawn(Store::new(), &MapConfig::default()).unwrap();
    map.set(1, "one".to_string()).unwrap();
    map.set(2, "two".to_string()).unwrap();

    map.close().unwrap();

    assert!(matches!(map.get(1), Err(MapError::Closed)));
    assert!(matches!(map.set(3, "three".to_string()), Err(MapError::Closed)));
    assert!(matches!(map.close(), Err(MapError::Closed)));

    let store = worker.join().unwrap();
    assert_eq!(store.length(), 2);
    assert_eq!(store.get(&2), Some("two".to_string()));
}

#[test]
fn test_close_from_one_clone_stops_all() {
    let (map, worker) = ConcurrentMap::spawn(Store::new(), &MapConfig::default()).unwrap();
    let other = map.clone();

    other.close().unwrap();

    assert!(matches!(map.length(), Err(MapError::Closed)));
    worker.join().unwrap();
}

#[test]
fn test_dropping_all_handles_ends_worker() {
    let (map, worker) = ConcurrentMap::spawn(Store::new(), &MapConfig::default()).unwrap();
    let other = map.clone();
    thread::spawn(move || other.set(5, "five".to_string()).unwrap())
        .join()
        .unwrap();

    drop(map);

    let store = worker.join().unwrap();
    assert_eq!(store.get(&5), Some("five".to_string()));
}

#[test]
fn test_bounded_queue() {
    let config = MapConfig {
        queue_capacity: Some(1),
        ..MapConfig::default()
    };
    let (map, worker) = ConcurrentMap::spawn(Store::new(), &config).unwrap();

    let threads: Vec<_> = (0..16u32)
        .map(|i| {
            let map = map.clone();
            thread::spawn(move || {
                for j in 0..10u32 {
                    map.set(i * 100 + j, format!("{i}/{j}")).unwrap();
                }
            })
        })
        .collect();
    for t in threads {
        t.join().unwrap();
    }

    assert_eq!(map.length().unwrap(), 160);
    map.close().unwrap();
    assert_eq!(worker.join().unwrap().length(), 160);
}

#[test]
fn test_worker_thread_name() {
    let config = MapConfig {
        worker_name: "named-map".to_string(),
        ..MapConfig::default()
    };
    let (map, worker) = ConcurrentMap::spawn(Store::new(), &config).unwrap();
    assert_eq!(worker.thread_name(), Some("named-map"));

    map.close().unwrap();
    worker.join().unwrap();
}

#[tokio::test(flavor = "current_thread")]
async fn test_requests_queued_behind_shutdown_are_dropped() {
    let (server, map) = MapServer::new(Store::new(), &MapConfig::default());
    let map = map.into_async();

    // Queue a shutdown, then a get, before the loop runs
    let closer = map.clone();
    let close_task = tokio::spawn(async move { closer.close().await });
    tokio::task::yield_now().await;

    let getter = map.clone();
    let get_task = tokio::spawn(async move { getter.get(1).await });
    tokio::task::yield_now().await;

    let store = tokio::spawn(server.run()).await.unwrap();

    close_task.await.unwrap().unwrap();
    assert!(matches!(get_task.await.unwrap(), Err(MapError::Closed)));
    assert!(store.is_empty());
}
