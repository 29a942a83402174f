// In-memory cache store using DashMap
use crate::domain::cache::{CacheEntry, Collection};
use crate::domain::error::CraftyError;
use crate::domain::traits::CacheStore;
use async_trait::async_trait;
use dashmap::DashMap;

/// Thread-safe in-memory document store. Contents are lost on restart.
pub struct MemoryStore {
    map: DashMap<(Collection, String), CacheEntry>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            map: DashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheStore for MemoryStore {
    async fn get(
        &self,
        collection: Collection,
        key: &str,
    ) -> Result<Option<CacheEntry>, CraftyError> {
        Ok(self
            .map
            .get(&(collection, key.to_string()))
            .map(|entry| entry.value().clone()))
    }

    async fn put(&self, collection: Collection, entry: CacheEntry) -> Result<(), CraftyError> {
        self.map.insert((collection, entry.key.clone()), entry);
        Ok(())
    }

    async fn count(&self, collection: Collection) -> Result<usize, CraftyError> {
        Ok(self.map.iter().filter(|e| e.key().0 == collection).count())
    }

    async fn prune_older_than(&self, cutoff_ms: i64) -> Result<usize, CraftyError> {
        let before = self.map.len();
        self.map.retain(|_, entry| entry.stored_at >= cutoff_ms);
        Ok(before - self.map.len())
    }
}
