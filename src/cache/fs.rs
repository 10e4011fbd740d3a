//! Flat-directory cache store
//!
//! One `<cache_key>.html` file per URL under a single root directory. The root
//! is created on first write; reads and existence checks never create it.
//! Entries are written to a temporary sibling and renamed into place, so an
//! interrupted write leaves no entry rather than a truncated one.

use crate::cache::key::cache_key;
use crate::cache::traits::{CacheError, CacheResult, CacheStore};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::OnceCell;

/// Suffix of in-progress writes; never matched by `entry_path`
const TEMP_SUFFIX: &str = ".tmp";

/// Cache store backed by files in one directory
#[derive(Debug)]
pub struct FsCacheStore {
    root: PathBuf,
    root_ready: OnceCell<()>,
    next_temp: AtomicU64,
}

impl FsCacheStore {
    /// Creates a store rooted at `root`; nothing touches the disk until the
    /// first write
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            root_ready: OnceCell::new(),
            next_temp: AtomicU64::new(0),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file holding the entry for `url`
    pub fn entry_path(&self, url: &str) -> PathBuf {
        self.root.join(format!("{}.html", cache_key(url)))
    }

    /// Unique scratch path next to the entry for `url`
    fn temp_path(&self, url: &str) -> PathBuf {
        let n = self.next_temp.fetch_add(1, Ordering::Relaxed);
        self.root.join(format!(
            "{}.html.{}-{}{}",
            cache_key(url),
            std::process::id(),
            n,
            TEMP_SUFFIX
        ))
    }

    async fn ensure_root(&self) -> CacheResult<()> {
        self.root_ready
            .get_or_try_init(|| async {
                tokio::fs::create_dir_all(&self.root)
                    .await
                    .map_err(|source| CacheError::Io {
                        path: self.root.clone(),
                        source,
                    })
            })
            .await?;
        Ok(())
    }
}

#[async_trait]
impl CacheStore for FsCacheStore {
    async fn has(&self, url: &str) -> bool {
        // An unreadable entry counts as absent and gets refetched
        tokio::fs::try_exists(self.entry_path(url))
            .await
            .unwrap_or(false)
    }

    async fn read(&self, url: &str) -> CacheResult<String> {
        let path = self.entry_path(url);
        match tokio::fs::read_to_string(&path).await {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(CacheError::Missing(url.to_string()))
            }
            Err(source) => Err(CacheError::Io { path, source }),
        }
    }

    async fn write(&self, url: &str, content: &str) -> CacheResult<()> {
        self.ensure_root().await?;

        let temp = self.temp_path(url);
        if let Err(source) = tokio::fs::write(&temp, content.as_bytes()).await {
            let _ = tokio::fs::remove_file(&temp).await;
            return Err(CacheError::Io { path: temp, source });
        }

        let path = self.entry_path(url);
        if let Err(source) = tokio::fs::rename(&temp, &path).await {
            let _ = tokio::fs::remove_file(&temp).await;
            return Err(CacheError::Io { path, source });
        }

        Ok(())
    }
}
