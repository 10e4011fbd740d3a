//! Fetcher module for retrieving listing pages
//!
//! This module contains everything between a URL and its HTML:
//! - HTTP transport built on reqwest
//! - Bounded retry on rate-limiting with a pluggable delay strategy
//! - Cache-aware fetching backed by an injected `CacheStore`

mod cached;
mod page;
mod retry;
mod transport;

#[cfg(test)]
pub(crate) mod testing;

pub use cached::CachedFetcher;
pub use page::PageFetcher;
pub use retry::{ConstantDelay, DelayStrategy, RetryPolicy, Sleeper, TokioSleeper};
pub use transport::{build_http_client, ReqwestTransport, Transport, TransportError};

use crate::config::FetcherConfig;
use crate::HarvestError;

/// Builds a page fetcher from configuration using the reqwest transport
///
/// # Arguments
///
/// * `config` - The fetcher configuration
///
/// # Returns
///
/// * `Ok(PageFetcher)` - Fetcher ready to use
/// * `Err(HarvestError)` - The HTTP client could not be built
pub fn page_fetcher_from_config(config: &FetcherConfig) -> Result<PageFetcher, HarvestError> {
    let client = build_http_client(config)?;
    Ok(PageFetcher::new(ReqwestTransport::new(client))
        .with_policy(RetryPolicy::from_config(config)))
}
