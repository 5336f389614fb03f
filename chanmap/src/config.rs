use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

use crate::error::MapConfigError;

/// Settings of a serialized map.
///
/// Every field has a default, so `{}` is a valid configuration.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct MapConfig {
    /// Name of the dedicated worker thread
    pub worker_name: String,
    /// Request queue bound, `None` for an unbounded queue
    pub queue_capacity: Option<usize>,
    /// Deadline for async client calls, `None` to wait forever.
    /// Blocking handles ignore it: their calls wait until the loop replies
    /// or shuts down.
    pub request_timeout_ms: Option<u64>,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            worker_name: "chanmap-worker".to_string(),
            queue_capacity: None,
            request_timeout_ms: None,
        }
    }
}

impl MapConfig {
    /// Read a JSON configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The JSON input is invalid or malformed, or reading it fails
    /// - `queue_capacity` is zero
    pub fn from_reader(reader: impl std::io::Read) -> Result<Self, MapConfigError> {
        let config: Self = serde_json::from_reader(reader).map_err(MapConfigError::Parse)?;
        config.validate()
    }

    /// Build a configuration from already-parsed JSON options.
    ///
    /// # Errors
    ///
    /// Same as [`MapConfig::from_reader`].
    pub fn from_map(opts: HashMap<String, serde_json::Value>) -> Result<Self, MapConfigError> {
        let object: serde_json::Map<String, serde_json::Value> = opts.into_iter().collect();
        let config: Self = serde_json::from_value(serde_json::Value::Object(object))
            .map_err(MapConfigError::Parse)?;
        config.validate()
    }

    #[must_use]
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_ms.map(Duration::from_millis)
    }

    fn validate(self) -> Result<Self, MapConfigError> {
        if self.queue_capacity == Some(0) {
            return Err(MapConfigError::ZeroCapacity);
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_gives_defaults() {
        let config = MapConfig::from_reader("{}".as_bytes()).unwrap();
        assert_eq!(config, MapConfig::default());
        assert_eq!(config.request_timeout(), None);
    }

    #[test]
    fn test_full_config() {
        let json = r#"{"worker_name": "kv", "queue_capacity": 8, "request_timeout_ms": 250}"#;
        let config = MapConfig::from_reader(json.as_bytes()).unwrap();

        assert_eq!(config.worker_name, "kv");
        assert_eq!(config.queue_capacity, Some(8));
        assert_eq!(config.request_timeout(), Some(Duration::from_millis(250)));
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let result = MapConfig::from_reader(r#"{"queue_capacity": 0}"#.as_bytes());
        assert!(matches!(result, Err(MapConfigError::ZeroCapacity)));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result = MapConfig::from_reader(r#"{"workers": 4}"#.as_bytes());
        assert!(matches!(result, Err(MapConfigError::Parse(_))));
    }

    #[test]
    fn test_from_map() {
        let mut opts = HashMap::new();
        opts.insert("request_timeout_ms".to_string(), serde_json::json!(10));

        let config = MapConfig::from_map(opts).unwrap();
        assert_eq!(config.request_timeout(), Some(Duration::from_millis(10)));
        assert_eq!(config.worker_name, "chanmap-worker");
    }
}
