//! Listing-Harvest: archived listing page harvester
//!
//! This crate fetches archived real-estate search pages, extracts one record per
//! listing card, and accumulates the records (plus a ledger of failed pages) for
//! tabular export. Fetches go through an on-disk cache and are retried when the
//! archive rate-limits us.

pub mod cache;
pub mod config;
pub mod crawler;
pub mod fetcher;
pub mod layouts;
pub mod output;
pub mod record;

use thiserror::Error;

/// Main error type for Listing-Harvest operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("Cache error: {0}")]
    Cache(#[from] cache::CacheError),

    #[error("Extraction error: {0}")]
    Extract(#[from] layouts::ExtractError),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// A page could not be fetched.
///
/// Rate-limit exhaustion, network failures and error statuses all collapse into
/// this one kind; only the message tells them apart.
#[derive(Debug, Clone, Error)]
#[error("Failed to fetch {url}: {message}")]
pub struct FetchError {
    pub url: String,
    pub message: String,
}

impl FetchError {
    pub fn new(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            message: message.into(),
        }
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Listing-Harvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use cache::{cache_key, CacheStore, FsCacheStore, MemoryCacheStore};
pub use config::Config;
pub use crawler::{CrawlDriver, CrawlOptions, CrawlOutcome, ErrorLedger};
pub use fetcher::{CachedFetcher, PageFetcher};
pub use record::Record;
