//! Export sink trait and error types

use crate::crawler::CrawlOutcome;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Destination of a finished crawl job
///
/// Called exactly once per job, after the crawl loop completes.
pub trait ExportSink {
    /// Persists the records and the error ledger of a crawl
    fn export(&self, outcome: &CrawlOutcome) -> OutputResult<()>;
}
