//! Error ledger of failed pages

/// One page that could not be fetched or extracted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageFailure {
    /// Position of the seed in the job's seed list
    pub seed_index: usize,

    /// Page index within the seed (1-based)
    pub page: u32,

    pub url: String,
    pub message: String,
}

/// Ordered, append-only list of page failures for one crawl job
///
/// The exported form is the bare per-seed page indices, so the same index may
/// appear once per seed; the seed position and URL are kept alongside.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorLedger {
    failures: Vec<PageFailure>,
}

impl ErrorLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, failure: PageFailure) {
        self.failures.push(failure);
    }

    pub fn failures(&self) -> &[PageFailure] {
        &self.failures
    }

    /// Per-seed page indices in failure order
    pub fn page_indices(&self) -> Vec<u32> {
        self.failures.iter().map(|failure| failure.page).collect()
    }

    /// Page indices joined with commas, e.g. `3,5,3`
    pub fn to_delimited(&self) -> String {
        self.failures
            .iter()
            .map(|failure| failure.page.to_string())
            .collect::<Vec<_>>()
            .join(",")
    }

    pub fn len(&self) -> usize {
        self.failures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }
}
