//! Response cache trait abstraction.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::CacheError;

/// Build the cache and retry key for a method call against one entity.
pub fn cache_key(method: &str, id: &str) -> String {
    format!("{}:{}", method, id)
}

/// Bounded key to value store for selected API results.
///
/// Keys are `method:entity_id` (see [`cache_key`]). Eviction policy is up to
/// the implementation; the only contract is that at most `capacity` entries
/// are retained. Implementations must tolerate reads interleaved with writes
/// from overlapping poll cycles.
#[async_trait]
pub trait ResponseCache: Send + Sync {
    /// Look up a cached value. `Ok(None)` is a miss.
    async fn get(&self, key: &str) -> Result<Option<Value>, CacheError>;

    /// Insert or replace a value.
    fn add(&self, key: &str, value: Value);

    /// Remove a single entry if present.
    fn remove(&self, key: &str);

    /// Remove all entries.
    fn clear(&self);

    /// Change the maximum number of retained entries.
    fn set_capacity(&self, capacity: usize);
}
