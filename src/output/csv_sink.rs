//! CSV export
//!
//! Records go to one CSV file whose header is the union of all field names in
//! first-seen order; missing and empty values become empty cells. Failed page
//! indices go to a separate text file as a single comma-separated line.

use crate::crawler::{CrawlOutcome, ErrorLedger};
use crate::output::traits::{ExportSink, OutputResult};
use crate::record::Record;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Writes records as CSV and the error ledger as delimited text
#[derive(Debug, Clone)]
pub struct CsvExportSink {
    records_path: PathBuf,
    error_pages_path: PathBuf,
}

impl CsvExportSink {
    pub fn new(records_path: impl Into<PathBuf>, error_pages_path: impl Into<PathBuf>) -> Self {
        Self {
            records_path: records_path.into(),
            error_pages_path: error_pages_path.into(),
        }
    }

    pub fn records_path(&self) -> &Path {
        &self.records_path
    }

    pub fn error_pages_path(&self) -> &Path {
        &self.error_pages_path
    }
}

impl ExportSink for CsvExportSink {
    fn export(&self, outcome: &CrawlOutcome) -> OutputResult<()> {
        write_error_pages(&outcome.error_pages, std::fs::File::create(&self.error_pages_path)?)?;
        write_records(&outcome.records, std::fs::File::create(&self.records_path)?)?;

        tracing::info!(
            "Wrote {} records to {} and {} failed pages to {}",
            outcome.records.len(),
            self.records_path.display(),
            outcome.error_pages.len(),
            self.error_pages_path.display()
        );

        Ok(())
    }
}

/// Union of field names across records, in first-seen order
pub fn columns(records: &[Record]) -> Vec<String> {
    let mut columns: Vec<String> = Vec::new();
    for record in records {
        for name in record.field_names() {
            if !columns.iter().any(|column| column == name) {
                columns.push(name.to_string());
            }
        }
    }
    columns
}

/// Writes records as CSV; no records means an empty file
pub fn write_records<W: Write>(records: &[Record], writer: W) -> OutputResult<()> {
    let columns = columns(records);
    if columns.is_empty() {
        return Ok(());
    }

    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(&columns)?;
    for record in records {
        csv.write_record(
            columns
                .iter()
                .map(|column| record.get(column).unwrap_or("")),
        )?;
    }
    csv.flush()?;

    Ok(())
}

/// Writes the ledger's page indices as one comma-separated line
pub fn write_error_pages<W: Write>(ledger: &ErrorLedger, mut writer: W) -> OutputResult<()> {
    writer.write_all(ledger.to_delimited().as_bytes())?;
    writer.flush()?;
    Ok(())
}
