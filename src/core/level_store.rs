//! Shared level stores
//!
//! A logger bound to a store keeps its threshold there, so every logger
//! sharing the store (and, for [`EnvLevelStore`], child processes started
//! afterwards) observes `set_level` changes.

use parking_lot::RwLock;
use std::collections::HashMap;

/// Key under which the shared level is stored
pub const SHARED_LEVEL_KEY: &str = "DSLOGGER_LEVEL";

/// Key-value capability backing a shared threshold
pub trait LevelStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
}

/// Process environment variables
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvLevelStore;

impl LevelStore for EnvLevelStore {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }

    fn set(&self, key: &str, value: &str) {
        std::env::set_var(key, value);
    }
}

/// In-memory store, useful to share a level between loggers in tests
#[derive(Debug, Default)]
pub struct MemoryLevelStore {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryLevelStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LevelStore for MemoryLevelStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.read().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.values.write().insert(key.to_string(), value.to_string());
    }
}
