use chanmap::{ConcurrentMap, HashStorage, Map, MapConfig};
use cli::{load_config, run_callers};
use std::io::Write;

#[test]
fn test_load_config_defaults_without_path() {
    assert_eq!(load_config(None).unwrap(), MapConfig::default());
}

#[test]
fn test_load_config_from_file() {
    let path = std::env::temp_dir().join(format!("chanmap-demo-{}.json", std::process::id()));
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(br#"{"worker_name": "demo", "queue_capacity": 4}"#)
        .unwrap();
    drop(file);

    let config = load_config(Some(&path)).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(config.worker_name, "demo");
    assert_eq!(config.queue_capacity, Some(4));
}

#[test]
fn test_load_config_missing_file() {
    let path = std::env::temp_dir().join("chanmap-demo-does-not-exist.json");
    assert!(load_config(Some(&path)).is_err());
}

#[test]
fn test_run_callers_fills_map() {
    let (map, worker) = ConcurrentMap::spawn(HashStorage::<String, u64>::new(), &MapConfig::default())
        .unwrap();

    let longest = run_callers(&map, 100).unwrap();

    assert_eq!(longest, 100);
    assert_eq!(map.lookup("caller-99".to_string()).unwrap(), (1, true));
    map.close().unwrap();
    assert_eq!(worker.join().unwrap().length(), 100);
}
