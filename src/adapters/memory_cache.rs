//! Bounded in-memory response cache.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard};

use crate::config::DEFAULT_MAX_CACHE_SIZE;
use crate::error::CacheError;
use crate::traits::ResponseCache;

#[derive(Debug, Default)]
struct CacheInner {
    entries: HashMap<String, Value>,
    /// Insertion order, oldest first, used for eviction
    order: VecDeque<String>,
    capacity: usize,
}

impl CacheInner {
    fn evict_to_capacity(&mut self) {
        while self.entries.len() > self.capacity {
            match self.order.pop_front() {
                Some(oldest) => {
                    self.entries.remove(&oldest);
                }
                None => break,
            }
        }
    }
}

/// In-memory [`ResponseCache`] that evicts the oldest insertion once more
/// than `capacity` entries are held.
#[derive(Debug)]
pub struct MemoryCache {
    inner: Mutex<CacheInner>,
}

impl MemoryCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Mutex::new(CacheInner {
                capacity,
                ..CacheInner::default()
            }),
        }
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, key: &str) -> bool {
        self.lock().entries.contains_key(key)
    }

    fn lock(&self) -> MutexGuard<'_, CacheInner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CACHE_SIZE)
    }
}

#[async_trait]
impl ResponseCache for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<Value>, CacheError> {
        Ok(self.lock().entries.get(key).cloned())
    }

    fn add(&self, key: &str, value: Value) {
        let mut inner = self.lock();
        if inner.entries.insert(key.to_string(), value).is_none() {
            inner.order.push_back(key.to_string());
        }
        inner.evict_to_capacity();
    }

    fn remove(&self, key: &str) {
        let mut inner = self.lock();
        if inner.entries.remove(key).is_some() {
            inner.order.retain(|k| k != key);
        }
    }

    fn clear(&self) {
        let mut inner = self.lock();
        inner.entries.clear();
        inner.order.clear();
    }

    fn set_capacity(&self, capacity: usize) {
        let mut inner = self.lock();
        inner.capacity = capacity;
        inner.evict_to_capacity();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_add_get_remove() {
        let cache = MemoryCache::new(10);
        cache.add("photos.getInfo:1", json!({"id": "1"}));

        let hit = cache.get("photos.getInfo:1").await.unwrap();
        assert_eq!(hit, Some(json!({"id": "1"})));

        cache.remove("photos.getInfo:1");
        assert_eq!(cache.get("photos.getInfo:1").await.unwrap(), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_evicts_oldest_beyond_capacity() {
        let cache = MemoryCache::new(2);
        cache.add("a", json!(1));
        cache.add("b", json!(2));
        cache.add("c", json!(3));

        assert_eq!(cache.len(), 2);
        assert!(!cache.contains("a"));
        assert!(cache.contains("b"));
        assert!(cache.contains("c"));
    }

    #[test]
    fn test_replacing_value_keeps_single_entry() {
        let cache = MemoryCache::new(2);
        cache.add("a", json!(1));
        cache.add("a", json!(2));
        cache.add("b", json!(3));

        assert_eq!(cache.len(), 2);
        assert!(cache.contains("a"));
    }

    #[test]
    fn test_shrinking_capacity_evicts() {
        let cache = MemoryCache::new(3);
        cache.add("a", json!(1));
        cache.add("b", json!(2));
        cache.add("c", json!(3));

        cache.set_capacity(1);
        assert_eq!(cache.len(), 1);
        assert!(cache.contains("c"));

        cache.clear();
        assert!(cache.is_empty());
    }
}
