//! In-memory cache store

use crate::cache::traits::{CacheError, CacheResult, CacheStore};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// Cache store that lives only as long as the process
///
/// Used by tests and by callers that want cache-hit semantics within one run
/// without leaving files behind.
#[derive(Debug, Default)]
pub struct MemoryCacheStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryCacheStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `(url, content)` pairs
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let map = entries
            .into_iter()
            .map(|(url, content)| (url.into(), content.into()))
            .collect();
        Self {
            entries: Mutex::new(map),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|map| map.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl CacheStore for MemoryCacheStore {
    async fn has(&self, url: &str) -> bool {
        self.entries
            .lock()
            .map(|map| map.contains_key(url))
            .unwrap_or(false)
    }

    async fn read(&self, url: &str) -> CacheResult<String> {
        self.entries
            .lock()
            .ok()
            .and_then(|map| map.get(url).cloned())
            .ok_or_else(|| CacheError::Missing(url.to_string()))
    }

    async fn write(&self, url: &str, content: &str) -> CacheResult<()> {
        let mut map = self
            .entries
            .lock()
            .map_err(|e| CacheError::Unavailable(e.to_string()))?;
        map.insert(url.to_string(), content.to_string());
        Ok(())
    }
}
