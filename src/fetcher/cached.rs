//! Cache-aware fetching
//!
//! Wraps a [`PageFetcher`] with an injected [`CacheStore`]: cache hits never
//! reach the network, misses are fetched and written through.

use crate::cache::CacheStore;
use crate::fetcher::page::PageFetcher;
use crate::HarvestError;
use std::sync::Arc;

/// Fetcher that consults a cache store before going to the network
#[derive(Clone)]
pub struct CachedFetcher {
    fetcher: PageFetcher,
    store: Arc<dyn CacheStore>,
    ignore_cache: bool,
}

impl CachedFetcher {
    pub fn new(fetcher: PageFetcher, store: Arc<dyn CacheStore>) -> Self {
        Self {
            fetcher,
            store,
            ignore_cache: false,
        }
    }

    /// Sets the default used by [`CachedFetcher::fetch`]
    pub fn ignore_cache(mut self, ignore: bool) -> Self {
        self.ignore_cache = ignore;
        self
    }

    pub fn store(&self) -> &Arc<dyn CacheStore> {
        &self.store
    }

    /// Fetches `url` honouring the configured cache setting
    pub async fn fetch(&self, url: &str) -> Result<Option<String>, HarvestError> {
        self.fetch_with(url, self.ignore_cache).await
    }

    /// Fetches `url`, from the cache unless `ignore_cache` is set
    ///
    /// A present entry is trusted as is, even when empty. Fetched content is
    /// stored before it is returned unless the cache is ignored. Failures and
    /// empty responses are never stored.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(html))` - Page content, cached or fresh
    /// * `Ok(None)` - The server answered without content
    /// * `Err(HarvestError)` - The fetch or the cache read failed
    pub async fn fetch_with(
        &self,
        url: &str,
        ignore_cache: bool,
    ) -> Result<Option<String>, HarvestError> {
        if !ignore_cache && self.store.has(url).await {
            tracing::debug!("Cache hit: {}", url);
            return Ok(Some(self.store.read(url).await?));
        }

        tracing::debug!("Fetching: {}", url);
        let html = self.fetcher.fetch(url).await?;

        if let Some(content) = html.as_deref() {
            if !ignore_cache {
                if let Err(e) = self.store.write(url, content).await {
                    tracing::warn!("Failed to cache {}: {}", url, e);
                }
            }
        }

        Ok(html)
    }
}

impl std::fmt::Debug for CachedFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CachedFetcher")
            .field("fetcher", &self.fetcher)
            .field("ignore_cache", &self.ignore_cache)
            .finish_non_exhaustive()
    }
}
