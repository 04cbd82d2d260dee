//! Preference store adapter
//!
//! The host provides some string key/value store (`localStorage` in the
//! browser, a file on desktop). The player only ever calls `get` and
//! `set`; there are no transactions and no error channel, matching what
//! the underlying stores actually guarantee.

use std::collections::HashMap;

/// String key/value persistence provided by the host
pub trait PreferenceStore {
    /// Read a stored value, `None` when the key has never been written
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value; a failing host store may silently drop it
    fn set(&mut self, key: &str, value: &str);
}

/// In-memory store for tests and hosts without persistence
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("player.volume"), None);

        store.set("player.volume", "0.7");
        assert_eq!(store.get("player.volume").as_deref(), Some("0.7"));

        store.set("player.volume", "0.2");
        assert_eq!(store.get("player.volume").as_deref(), Some("0.2"));
    }
}
