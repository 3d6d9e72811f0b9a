//! Persisted high score
//!
//! Stored as a plain decimal string under `highScore`, so it stays readable by
//! anything else that looks at LocalStorage.

use std::collections::HashMap;

/// Minimal string key-value storage
pub trait KeyValueStore {
    /// Value stored under `key`, if any
    fn get(&self, key: &str) -> Option<String>;
    /// Store `value` under `key`
    fn set(&mut self, key: &str, value: &str);
}

/// In-memory store (native builds and tests)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }
}

/// Browser LocalStorage (WASM only)
///
/// A missing or blocked storage behaves as an empty store that drops writes.
#[cfg(target_arch = "wasm32")]
pub struct LocalStorage {
    storage: Option<web_sys::Storage>,
}

#[cfg(target_arch = "wasm32")]
impl LocalStorage {
    pub fn open() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();
        if storage.is_none() {
            log::warn!("LocalStorage unavailable, scores will not persist");
        }
        Self { storage }
    }
}

#[cfg(target_arch = "wasm32")]
impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) {
        if let Some(storage) = &self.storage {
            if let Err(e) = storage.set_item(key, value) {
                log::warn!("Failed to write {}: {:?}", key, e);
            }
        }
    }
}

/// The single persisted best score
#[derive(Debug)]
pub struct HighScores<K> {
    store: K,
}

impl<K: KeyValueStore> HighScores<K> {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "highScore";

    pub fn new(store: K) -> Self {
        Self { store }
    }

    /// Current best score; missing or malformed data counts as 0
    pub fn best(&self) -> u64 {
        let Some(raw) = self.store.get(Self::STORAGE_KEY) else {
            return 0;
        };
        match raw.trim().parse::<u64>() {
            Ok(score) => score,
            Err(_) => {
                log::info!("Ignoring malformed high score {:?}", raw);
                0
            }
        }
    }

    /// Record `score` if it beats the stored best
    ///
    /// Returns true when the stored value changed.
    pub fn submit(&mut self, score: u64) -> bool {
        if score <= self.best() {
            return false;
        }
        self.store.set(Self::STORAGE_KEY, &score.to_string());
        log::info!("New high score: {}", score);
        true
    }

    pub fn store(&self) -> &K {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut K {
        &mut self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with(raw: &str) -> HighScores<MemoryStore> {
        let mut store = MemoryStore::new();
        store.set("highScore", raw);
        HighScores::new(store)
    }

    #[test]
    fn test_empty_store_is_zero() {
        let board = HighScores::new(MemoryStore::new());
        assert_eq!(board.best(), 0);
    }

    #[test]
    fn test_malformed_is_zero() {
        assert_eq!(board_with("lots").best(), 0);
        assert_eq!(board_with("-5").best(), 0);
        assert_eq!(board_with("").best(), 0);
    }

    #[test]
    fn test_submit_higher_replaces() {
        let mut board = board_with("100");
        assert!(board.submit(150));
        assert_eq!(board.best(), 150);
        assert_eq!(board.store().get("highScore").as_deref(), Some("150"));
    }

    #[test]
    fn test_submit_lower_or_equal_keeps() {
        let mut board = board_with("100");
        assert!(!board.submit(50));
        assert!(!board.submit(100));
        assert_eq!(board.best(), 100);
    }

    #[test]
    fn test_submit_over_malformed() {
        let mut board = board_with("???");
        assert!(board.submit(30));
        assert_eq!(board.best(), 30);
    }
}
