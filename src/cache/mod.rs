//! Page cache
//!
//! This module maps URLs to previously fetched HTML:
//! - Key derivation that is safe to use as a file name
//! - The `CacheStore` trait injected into the cached fetcher
//! - A flat-directory store for real runs and an in-memory store for tests

mod fs;
mod key;
mod memory;
mod traits;

pub use fs::FsCacheStore;
pub use key::{cache_key, MAX_ENCODED_KEY_LEN};
pub use memory::MemoryCacheStore;
pub use traits::{CacheError, CacheResult, CacheStore};
