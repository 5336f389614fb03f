use std::collections::HashMap;
use std::hash::Hash;

use crate::Map;

/// [`Map`] backed by a `std` hash map.
#[derive(Debug, Clone)]
pub struct HashStorage<K, V> {
    storage: HashMap<K, V>,
}

impl<K, V> HashStorage<K, V> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            storage: HashMap::new(),
        }
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            storage: HashMap::with_capacity(capacity),
        }
    }

    /// Consume the wrapper and return the raw storage
    #[must_use]
    pub fn into_storage(self) -> HashMap<K, V> {
        self.storage
    }
}

impl<K, V> Default for HashStorage<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> From<HashMap<K, V>> for HashStorage<K, V> {
    fn from(storage: HashMap<K, V>) -> Self {
        Self { storage }
    }
}

impl<K, V> FromIterator<(K, V)> for HashStorage<K, V>
where
    K: Eq + Hash,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            storage: iter.into_iter().collect(),
        }
    }
}

impl<K, V> Map for HashStorage<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    type Key = K;
    type Value = V;
    type Storage = HashMap<K, V>;

    fn get(&self, key: &K) -> Option<V> {
        self.storage.get(key).cloned()
    }

    fn set(&mut self, key: K, value: V) -> usize {
        self.storage.insert(key, value);
        self.storage.len()
    }

    fn delete(&mut self, key: &K) -> usize {
        self.storage.remove(key);
        self.storage.len()
    }

    fn contains(&self, key: &K) -> bool {
        self.storage.contains_key(key)
    }

    fn length(&self) -> usize {
        self.storage.len()
    }

    fn clear(&mut self) {
        self.storage.clear();
    }

    fn underlying_storage(&self) -> &HashMap<K, V> {
        &self.storage
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_returns_length() {
        let mut map: HashStorage<&str, i32> = HashStorage::new();
        assert_eq!(map.set("a", 1), 1);
        assert_eq!(map.set("b", 2), 2);

        // Overwrite keeps the length
        assert_eq!(map.set("a", 10), 2);
        assert_eq!(map.get(&"a"), Some(10));
    }

    #[test]
    fn test_delete_absent_is_noop() {
        let mut map: HashStorage<&str, i32> = HashStorage::new();
        map.set("a", 1);

        assert_eq!(map.delete(&"missing"), 1);
        assert_eq!(map.delete(&"a"), 0);
        assert_eq!(map.delete(&"a"), 0);
    }

    #[test]
    fn test_clear() {
        let mut map: HashStorage<_, _> = [("a", 1), ("b", 2)].into_iter().collect();
        assert!(!map.is_empty());

        map.clear();
        assert!(map.is_empty());
        assert!(!map.contains(&"a"));
    }

    #[test]
    fn test_clone_is_detached() {
        let mut map: HashStorage<u32, String> = HashStorage::new();
        map.set(1, "one".to_string());

        let handle = map.clone();
        map.set(2, "two".to_string());

        assert_eq!(handle.length(), 1);
        assert_eq!(map.underlying_storage().len(), 2);
    }
}
