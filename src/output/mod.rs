//! Output module for exporting crawl results
//!
//! This module handles:
//! - The `ExportSink` interface the binary hands a finished crawl to
//! - CSV export of records and delimited export of the error ledger

mod csv_sink;
mod traits;

pub use csv_sink::{columns, write_error_pages, write_records, CsvExportSink};
pub use traits::{ExportSink, OutputError, OutputResult};

use crate::config::OutputConfig;

/// Builds the CSV sink for the configured output paths
pub fn sink_from_config(config: &OutputConfig) -> CsvExportSink {
    CsvExportSink::new(&config.records_path, &config.error_pages_path)
}
