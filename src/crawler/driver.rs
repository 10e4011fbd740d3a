//! Crawl driver - seeds × pages loop with per-page error accumulation
//!
//! Pages are processed strictly one after another. Within a page, the detail
//! pages of its listings are fetched concurrently and joined before the next
//! page starts, so record order always follows seed, page and card order.

use crate::config::CrawlConfig;
use crate::crawler::ledger::{ErrorLedger, PageFailure};
use crate::crawler::pagination::page_url;
use crate::fetcher::CachedFetcher;
use crate::layouts::{created_at_stamp, ExtractError, Layout, Listing};
use crate::record::Record;
use crate::HarvestError;
use chrono::Utc;
use futures::future::join_all;
use scraper::Html;
use std::sync::Arc;
use std::time::Instant;

/// Field stamped on every record with the time its page was extracted
pub const CREATED_AT_FIELD: &str = "createdAt";

/// Crawl job parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlOptions {
    /// Result pages visited per seed, page 1 included
    pub pages_per_seed: u32,

    /// Query parameter carrying the page number
    pub page_param: String,
}

impl Default for CrawlOptions {
    fn default() -> Self {
        Self {
            pages_per_seed: 7,
            page_param: "pagina".to_string(),
        }
    }
}

impl From<&CrawlConfig> for CrawlOptions {
    fn from(config: &CrawlConfig) -> Self {
        Self {
            pages_per_seed: config.pages_per_seed,
            page_param: config.page_param.clone(),
        }
    }
}

/// Everything a crawl job produced
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlOutcome {
    /// Records of every successful page, in crawl order
    pub records: Vec<Record>,

    /// Pages that failed
    pub error_pages: ErrorLedger,
}

/// Runs crawl jobs over a layout
pub struct CrawlDriver {
    fetcher: CachedFetcher,
    layout: Arc<dyn Layout>,
    options: CrawlOptions,
}

impl CrawlDriver {
    pub fn new(fetcher: CachedFetcher, layout: Arc<dyn Layout>, options: CrawlOptions) -> Self {
        Self {
            fetcher,
            layout,
            options,
        }
    }

    pub fn options(&self) -> &CrawlOptions {
        &self.options
    }

    /// Crawls every page of every seed
    ///
    /// A failing page is recorded in the ledger and the crawl moves on; the
    /// job always visits all `seeds.len() * pages_per_seed` pages and never
    /// retries a failed one.
    pub async fn run(&self, seeds: &[String]) -> CrawlOutcome {
        let mut outcome = CrawlOutcome::default();
        let started = Instant::now();

        tracing::info!(
            "Starting crawl: {} seeds × {} pages ({} layout)",
            seeds.len(),
            self.options.pages_per_seed,
            self.layout.name()
        );

        for (seed_index, seed) in seeds.iter().enumerate() {
            for page in 1..=self.options.pages_per_seed {
                let url = page_url(seed, page, &self.options.page_param);
                let page_started = Instant::now();

                match self.crawl_page(&url).await {
                    Ok(records) => {
                        tracing::info!(
                            "Finished page {} - {} after {:.2} seconds ({} records)",
                            seed_index,
                            page,
                            page_started.elapsed().as_secs_f64(),
                            records.len()
                        );
                        outcome.records.extend(records);
                    }
                    Err(e) => {
                        tracing::error!("Error processing page {} - {} ({}): {}", seed_index, page, url, e);
                        outcome.error_pages.record(PageFailure {
                            seed_index,
                            page,
                            url,
                            message: e.to_string(),
                        });
                    }
                }
            }
        }

        tracing::info!(
            "Crawl completed: {} records, {} failed pages in {:?}",
            outcome.records.len(),
            outcome.error_pages.len(),
            started.elapsed()
        );

        outcome
    }

    /// Fetches one result page and returns its completed records
    pub async fn crawl_page(&self, page_url: &str) -> Result<Vec<Record>, HarvestError> {
        let created_at = created_at_stamp(Utc::now());

        // No content parses like an empty document, cached or fresh
        let html = self.fetcher.fetch(page_url).await?.unwrap_or_default();
        let listings = self.extract_listings(&html, page_url)?;

        if listings.is_empty() {
            tracing::debug!("No listings on {}", page_url);
        }

        let records = join_all(
            listings
                .into_iter()
                .map(|listing| self.complete_listing(listing)),
        )
        .await;

        Ok(records
            .into_iter()
            .map(|mut record| {
                record.set(CREATED_AT_FIELD, Some(created_at.clone()));
                record
            })
            .collect())
    }

    fn extract_listings(&self, html: &str, page_url: &str) -> Result<Vec<Listing>, ExtractError> {
        let document = Html::parse_document(html);
        self.layout.listings(&document, page_url)
    }

    /// Merges the detail page fields into a card record
    async fn complete_listing(&self, listing: Listing) -> Record {
        let Listing {
            mut record,
            detail_url,
        } = listing;

        let details = match detail_url {
            Some(url) => self.fetch_details(&url).await,
            None => self.layout.blank_details(),
        };

        record.merge(details);
        record
    }

    /// Detail fields of one listing; any failure yields blank fields
    async fn fetch_details(&self, url: &str) -> Record {
        match self.fetcher.fetch(url).await {
            Ok(Some(html)) => {
                let document = Html::parse_document(&html);
                self.layout.details(&document)
            }
            Ok(None) => {
                tracing::debug!("Detail page {} has no content", url);
                self.layout.blank_details()
            }
            Err(e) => {
                tracing::debug!("Detail page {} unavailable: {}", url, e);
                self.layout.blank_details()
            }
        }
    }
}
