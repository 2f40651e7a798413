//! Request cache shared by the catalog client

use std::{
    collections::{BTreeMap, HashMap},
    future::Future,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use serde_json::Value;
use tokio::sync::OnceCell;

/// Cache key: endpoint plus its query parameters in sorted order
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    endpoint: String,
    params: BTreeMap<String, String>,
}

impl QueryKey {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            params: BTreeMap::new(),
        }
    }

    pub fn param(mut self, name: &str, value: impl ToString) -> Self {
        self.params.insert(name.to_string(), value.to_string());
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Parameters as `(name, value)` pairs, sorted by name
    pub fn params(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

type Slot = Arc<OnceCell<Value>>;

/// Cached JSON responses, one slot per [`QueryKey`].
///
/// Concurrent reads of the same key share a single fetch. A failed fetch
/// leaves the slot empty so the next read tries again.
#[derive(Debug, Default)]
pub struct QueryCache {
    entries: Mutex<HashMap<QueryKey, Slot>>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<QueryKey, Slot>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Return the cached value for `key`, running `fetch` when there is none
    pub async fn get_or_fetch<F, Fut, E>(&self, key: QueryKey, fetch: F) -> Result<Value, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Value, E>>,
    {
        let slot = self.entries().entry(key).or_default().clone();
        slot.get_or_try_init(fetch).await.cloned()
    }

    /// Drop every entry whose endpoint starts with `prefix`
    pub fn invalidate(&self, prefix: &str) {
        self.entries().retain(|key, _| !key.endpoint.starts_with(prefix));
    }

    pub fn clear(&self) {
        self.entries().clear();
    }

    /// Number of keys with a slot, filled or in flight
    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
