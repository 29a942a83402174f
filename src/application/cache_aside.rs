use crate::domain::cache::{CacheEntry, Collection};
use crate::domain::error::CraftyError;
use crate::domain::model::{Fetched, Source};
use crate::domain::traits::{CacheStore, Clock};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// TTL cache in front of an upstream call.
///
/// The store is best-effort: read errors count as a miss, write errors are
/// logged and the fresh payload is still returned. There is no single-flight,
/// so concurrent misses on one key each call upstream and the last write wins.
#[derive(Clone)]
pub struct CacheAside {
    store: Arc<dyn CacheStore>,
    clock: Arc<dyn Clock>,
}

impl CacheAside {
    pub fn new(store: Arc<dyn CacheStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    pub fn store(&self) -> &Arc<dyn CacheStore> {
        &self.store
    }

    pub fn now_ms(&self) -> i64 {
        self.clock.now_ms()
    }

    /// Serve `key` from `collection` while younger than `ttl`, otherwise call
    /// `fetch`, reshape with `transform` and store the result. `query` is the
    /// caller's raw descriptor, logged when upstream fails.
    pub async fn fetch<Raw, T, F, Fut, X>(
        &self,
        collection: Collection,
        key: &str,
        query: &str,
        ttl: Duration,
        fetch: F,
        transform: X,
    ) -> Result<Fetched<T>, CraftyError>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Raw, CraftyError>>,
        X: FnOnce(Raw) -> T,
    {
        if let Some(payload) = self.lookup::<T>(collection, key, ttl).await {
            debug!(collection = collection.as_str(), key, "cache hit");
            return Ok(Fetched {
                payload,
                source: Source::Cache,
            });
        }

        let raw = fetch().await.inspect_err(|e| {
            warn!(
                collection = collection.as_str(),
                query = %query,
                key,
                status = ?e.upstream_status(),
                error = %e,
                "upstream fetch failed"
            );
        })?;
        let payload = transform(raw);
        self.save(collection, key, &payload).await;

        Ok(Fetched {
            payload,
            source: Source::Api,
        })
    }

    async fn lookup<T: DeserializeOwned>(
        &self,
        collection: Collection,
        key: &str,
        ttl: Duration,
    ) -> Option<T> {
        let entry = match self.store.get(collection, key).await {
            Ok(Some(entry)) => entry,
            Ok(None) => return None,
            Err(e) => {
                warn!(collection = collection.as_str(), key, error = %e, "cache read failed");
                return None;
            }
        };

        if !entry.is_fresh(self.clock.now_ms(), ttl) {
            debug!(collection = collection.as_str(), key, "cache entry stale");
            return None;
        }

        match serde_json::from_value(entry.payload) {
            Ok(payload) => Some(payload),
            Err(e) => {
                warn!(collection = collection.as_str(), key, error = %e, "cached payload has unexpected shape");
                None
            }
        }
    }

    async fn save<T: Serialize>(&self, collection: Collection, key: &str, payload: &T) {
        let payload = match serde_json::to_value(payload) {
            Ok(v) => v,
            Err(e) => {
                warn!(collection = collection.as_str(), key, error = %e, "payload not serializable, skipping cache");
                return;
            }
        };
        let entry = CacheEntry {
            key: key.to_string(),
            payload,
            stored_at: self.clock.now_ms(),
        };
        if let Err(e) = self.store.put(collection, entry).await {
            warn!(collection = collection.as_str(), key, error = %e, "cache write failed");
        }
    }
}
