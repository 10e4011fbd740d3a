//! Cache store trait and error types

use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during cache operations
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("No cache entry for {0}")]
    Missing(String),

    #[error("Cache store unavailable: {0}")]
    Unavailable(String),

    #[error("Cache IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for cache operations
pub type CacheResult<T> = Result<T, CacheError>;

/// Storage for fetched pages keyed by URL
///
/// Entries are created once and never updated or evicted by the crate; deleting
/// them by hand is the only invalidation. Implementations must be shareable
/// between the concurrent detail fetches of a page.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Returns true if an entry exists for `url`
    async fn has(&self, url: &str) -> bool;

    /// Reads the cached content for `url`
    async fn read(&self, url: &str) -> CacheResult<String>;

    /// Stores `content` for `url`
    async fn write(&self, url: &str, content: &str) -> CacheResult<()>;
}
