//! Best-effort key/value persistence.
//!
//! The host exposes whatever per-browser storage it has through
//! [`SaveStore`]. Reads tolerate absence and corruption (callers fall back
//! to defaults) and writes are fire-and-forget: a full or unavailable store
//! must never surface as an error to the player.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::Serialize;

/// Storage key for the shoot planner's saved state.
pub const PLANNER_SAVE_KEY: &str = "hf_game_v2";

/// A string key/value store (localStorage-shaped).
pub trait SaveStore {
    fn read(&self, key: &str) -> Option<String>;
    /// Returns whether the write was accepted.
    fn write(&mut self, key: &str, value: &str) -> bool;
}

/// In-memory store, used in tests and by hosts without real storage.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl SaveStore for MemoryStore {
    fn read(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn write(&mut self, key: &str, value: &str) -> bool {
        self.entries.insert(key.to_string(), value.to_string());
        true
    }
}

/// Reads and deserializes a value; `None` on absence or corruption.
pub fn load_json<T: DeserializeOwned>(store: &dyn SaveStore, key: &str) -> Option<T> {
    let raw = store.read(key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::debug!(key, %err, "discarding corrupt saved state");
            None
        }
    }
}

/// Serializes and writes a value, swallowing failures.
pub fn store_json<T: Serialize>(store: &mut dyn SaveStore, key: &str, value: &T) {
    match serde_json::to_string(value) {
        Ok(raw) => {
            if !store.write(key, &raw) {
                tracing::debug!(key, "save store rejected write");
            }
        }
        Err(err) => tracing::debug!(key, %err, "failed to serialize saved state"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        let mut store = MemoryStore::default();
        store_json(&mut store, "k", &vec![1, 2, 3]);
        assert_eq!(load_json::<Vec<i32>>(&store, "k"), Some(vec![1, 2, 3]));
    }

    #[test]
    fn test_absent_key_is_none() {
        let store = MemoryStore::default();
        assert_eq!(load_json::<Vec<i32>>(&store, "missing"), None);
    }

    #[test]
    fn test_corrupt_value_is_none() {
        let mut store = MemoryStore::default();
        store.write("k", "{not json");
        assert_eq!(load_json::<Vec<i32>>(&store, "k"), None);
    }
}
