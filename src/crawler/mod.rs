//! Crawler module for paginated listing crawls
//!
//! This module contains the crawl loop, including:
//! - Expanding seeds into their result pages
//! - Fetching and extracting each page, with detail pages fanned out per page
//! - Collecting failed pages into the error ledger

mod driver;
mod ledger;
mod pagination;

pub use driver::{CrawlDriver, CrawlOptions, CrawlOutcome};
pub use ledger::{ErrorLedger, PageFailure};
pub use pagination::{page_url, page_urls};

use crate::cache::FsCacheStore;
use crate::config::Config;
use crate::fetcher::{page_fetcher_from_config, CachedFetcher};
use crate::layouts::layout_for;
use crate::HarvestError;
use std::sync::Arc;

/// Builds a crawl driver from configuration
///
/// The cache lives in the configured directory; `ignore_cache` forces a
/// network-only run even when the config enables the cache.
///
/// # Returns
///
/// * `Ok(CrawlDriver)` - Driver ready to run
/// * `Err(HarvestError)` - The HTTP client or the layout could not be built
pub fn build_driver(config: &Config, ignore_cache: bool) -> Result<CrawlDriver, HarvestError> {
    let fetcher = page_fetcher_from_config(&config.fetcher)?;
    let store = Arc::new(FsCacheStore::new(&config.cache.directory));
    let cached = CachedFetcher::new(fetcher, store)
        .ignore_cache(ignore_cache || config.cache.ignore_cache);
    let layout = layout_for(config.crawl.layout, &config.crawl.detail_base_url)?;

    Ok(CrawlDriver::new(
        cached,
        layout,
        CrawlOptions::from(&config.crawl),
    ))
}
