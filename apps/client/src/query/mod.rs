//! Query cache: keyed results with explicit invalidation.
//!
//! Reads go through `QueryClient::fetch`: a fresh entry is served without
//! touching the network, a missing or stale one is fetched and stored.
//! Mutations mark keys stale with `invalidate`; the next read refetches.
//!
//! Stale-write protection uses one generation counter for the whole cache.
//! `invalidate` and `clear` both bump it; a touched entry is restamped with the
//! new generation. A response is stored as fresh only when its entry still
//! carries the generation it was fetched under. A response that began before
//! the last `clear` is dropped, so data from a previous session never returns.

pub mod key;

use std::any::Any;
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::debug;

use crate::errors::ClientError;

pub use key::QueryKey;

struct Entry {
    data: Option<Arc<dyn Any + Send + Sync>>,
    fresh: bool,
    generation: u64,
}

#[derive(Default)]
struct Cache {
    entries: HashMap<QueryKey, Entry>,
    generation: u64,
    cleared_at: u64,
}

#[derive(Default)]
pub struct QueryClient {
    cache: Mutex<Cache>,
}

impl QueryClient {
    fn cache(&self) -> MutexGuard<'_, Cache> {
        self.cache.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Serves `key` from cache when fresh, otherwise runs `fetcher` and caches its result.
    /// Errors are returned and never cached.
    pub async fn fetch<T, F, Fut>(&self, key: QueryKey, fetcher: F) -> Result<T, ClientError>
    where
        T: Clone + Send + Sync + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, ClientError>>,
    {
        let started = {
            let mut cache = self.cache();
            let generation = cache.generation;
            let entry = cache.entries.entry(key.clone()).or_insert(Entry {
                data: None,
                fresh: false,
                generation,
            });
            if entry.fresh {
                if let Some(hit) = entry.data.as_ref().and_then(|d| d.downcast_ref::<T>()) {
                    debug!("cache hit {key}");
                    return Ok(hit.clone());
                }
            }
            entry.generation
        };

        debug!("cache miss {key}, fetching");
        let value = fetcher().await?;

        let mut cache = self.cache();
        if started < cache.cleared_at {
            debug!("{key} was cleared while in flight; not cached");
            return Ok(value);
        }
        match cache.entries.get_mut(&key) {
            Some(entry) if entry.generation == started => {
                entry.data = Some(Arc::new(value.clone()));
                entry.fresh = true;
            }
            // A newer fetch already stored fresh data; keep it.
            Some(entry) if entry.fresh => {
                debug!("{key} already refreshed; dropping older response");
            }
            Some(entry) => {
                entry.data = Some(Arc::new(value.clone()));
                debug!("{key} was invalidated while in flight; stored as stale");
            }
            None => debug!("{key} was cleared while in flight; not cached"),
        }
        Ok(value)
    }

    /// Like `fetch`, but a disabled query resolves to `None` without fetching.
    pub async fn fetch_if<T, F, Fut>(
        &self,
        enabled: bool,
        key: QueryKey,
        fetcher: F,
    ) -> Result<Option<T>, ClientError>
    where
        T: Clone + Send + Sync + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, ClientError>>,
    {
        if !enabled {
            debug!("{key} disabled, skipping");
            return Ok(None);
        }
        self.fetch(key, fetcher).await.map(Some)
    }

    /// Marks every entry under `prefix` stale. Returns how many were marked.
    pub fn invalidate(&self, prefix: &QueryKey) -> usize {
        let mut cache = self.cache();
        cache.generation += 1;
        let generation = cache.generation;
        let mut marked = 0;
        for (key, entry) in cache.entries.iter_mut() {
            if key.starts_with(prefix) {
                entry.fresh = false;
                entry.generation = generation;
                marked += 1;
            }
        }
        debug!("invalidated {prefix} ({marked} entries)");
        marked
    }

    /// Drops every entry. Fetches still in flight will not be cached.
    pub fn clear(&self) {
        let mut cache = self.cache();
        cache.generation += 1;
        cache.cleared_at = cache.generation;
        cache.entries.clear();
        debug!("query cache cleared");
    }

    pub fn is_fresh(&self, key: &QueryKey) -> bool {
        self.cache().entries.get(key).is_some_and(|e| e.fresh)
    }

    /// The last stored value for `key`, fresh or not.
    #[cfg(test)]
    pub fn get<T: Clone + 'static>(&self, key: &QueryKey) -> Option<T> {
        self.cache()
            .entries
            .get(key)
            .and_then(|e| e.data.as_ref())
            .and_then(|d| d.downcast_ref::<T>())
            .cloned()
    }
}
