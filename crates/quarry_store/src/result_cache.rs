//! The result-cache boundary.
//!
//! The build engine memoizes finished markup strings in a generic
//! key/value cache. TTL and eviction policy belong to the backend, not
//! to this crate.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

/// A key/value cache for built markup.
///
/// `get` and `set` must each be individually atomic; the engine adds no
/// locking around them.
pub trait ResultCache: Send + Sync {
    /// Returns the cached value for `key`, if present.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: String);
}

/// In-process memory cache, the default backend.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of cached entries.
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns `true` if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ResultCache for MemoryCache {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: String) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value);
    }
}

/// A cache that never hits. Selecting it disables memoization entirely.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullCache;

impl ResultCache for NullCache {
    fn get(&self, _key: &str) -> Option<String> {
        None
    }

    fn set(&self, _key: &str, _value: String) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_miss_then_hit() {
        let cache = MemoryCache::new();
        assert_eq!(cache.get("k"), None);
        cache.set("k", "v".to_string());
        assert_eq!(cache.get("k"), Some("v".to_string()));
    }

    #[test]
    fn memory_set_replaces() {
        let cache = MemoryCache::new();
        cache.set("k", "old".to_string());
        cache.set("k", "new".to_string());
        assert_eq!(cache.get("k"), Some("new".to_string()));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn memory_is_empty() {
        let cache = MemoryCache::new();
        assert!(cache.is_empty());
        cache.set("k", "v".to_string());
        assert!(!cache.is_empty());
    }

    #[test]
    fn null_never_hits() {
        let cache = NullCache;
        cache.set("k", "v".to_string());
        assert_eq!(cache.get("k"), None);
    }

    #[test]
    fn memory_shared_across_threads() {
        use std::sync::Arc;

        let cache = Arc::new(MemoryCache::new());
        let mut handles = Vec::new();
        for i in 0..8 {
            let cache = Arc::clone(&cache);
            handles.push(std::thread::spawn(move || {
                cache.set(&format!("k{i}"), format!("v{i}"));
            }));
        }
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(cache.len(), 8);
        assert_eq!(cache.get("k3"), Some("v3".to_string()));
    }
}
