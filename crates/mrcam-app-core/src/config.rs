// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Config service and storage port for mrcam tools.

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

/// Storage port for raw config blobs (keyed by logical name).
pub trait ConfigStore {
    /// Load a raw config blob. Returns `NotFound` when missing.
    fn load_raw(&self, key: &str) -> Result<Vec<u8>, ConfigError>;
    /// Persist a raw config blob.
    fn save_raw(&self, key: &str, data: &[u8]) -> Result<(), ConfigError>;
}

/// Error type for config operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Key not present in store.
    #[error("not found")]
    NotFound,
    /// I/O error while reading/writing.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Serialization/deserialization failure.
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
    /// Catch-all error variant.
    #[error("other: {0}")]
    Other(String),
}

/// Serializes config values as JSON and delegates storage to a [`ConfigStore`].
pub struct ConfigService<S> {
    store: S,
}

impl<S> ConfigService<S> {
    /// Create a new service using the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Borrow the inner store.
    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<S: ConfigStore> ConfigService<S> {
    /// Load and deserialize the value under `key`. `Ok(None)` if missing or empty.
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, ConfigError> {
        match self.store.load_raw(key) {
            Ok(bytes) if bytes.is_empty() => Ok(None),
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(ConfigError::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Serialize `value` as pretty JSON and persist it under `key`.
    pub fn save<T: Serialize>(&self, key: &str, value: &T) -> Result<(), ConfigError> {
        let data = serde_json::to_vec_pretty(value)?;
        self.store.save_raw(key, &data)
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::MemoryConfigStore;

    #[test]
    fn missing_and_empty_keys_load_as_none() {
        let store = MemoryConfigStore::new();
        store.save_raw("empty", b"").unwrap();
        let service = ConfigService::new(store);
        assert!(service.load::<u32>("absent").unwrap().is_none());
        assert!(service.load::<u32>("empty").unwrap().is_none());
    }

    #[test]
    fn save_writes_pretty_json() {
        let service = ConfigService::new(MemoryConfigStore::new());
        service.save("slots", &[1, 2]).unwrap();
        let raw = service.store().load_raw("slots").unwrap();
        assert_eq!(String::from_utf8(raw).unwrap(), "[\n  1,\n  2\n]");
        assert_eq!(service.load::<Vec<u32>>("slots").unwrap(), Some(vec![1, 2]));
    }

    #[test]
    fn malformed_blob_is_a_serde_error() {
        let store = MemoryConfigStore::new();
        store.save_raw("prefs", b"{not json").unwrap();
        let service = ConfigService::new(store);
        assert!(matches!(
            service.load::<u32>("prefs"),
            Err(ConfigError::Serde(_))
        ));
    }

    #[test]
    fn store_failures_propagate() {
        let store = MemoryConfigStore::new();
        store.set_fail_on_load(true);
        let service = ConfigService::new(store);
        assert!(matches!(
            service.load::<u32>("prefs"),
            Err(ConfigError::Other(_))
        ));
    }
}
