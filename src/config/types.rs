use serde::Deserialize;

/// Main configuration structure for Listing-Harvest
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub fetcher: FetcherConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    pub crawl: CrawlConfig,
    pub output: OutputConfig,
    #[serde(default)]
    pub seeds: Vec<SeedEntry>,
}

impl Config {
    /// Returns the seed URLs configured for the given year, in file order
    pub fn seeds_for_year(&self, year: u16) -> Option<&[String]> {
        self.seeds
            .iter()
            .find(|entry| entry.year == year)
            .map(|entry| entry.urls.as_slice())
    }
}

/// HTTP fetching behaviour
#[derive(Debug, Clone, Deserialize)]
pub struct FetcherConfig {
    /// Number of retries granted after an HTTP 429 response
    #[serde(rename = "max-retries", default = "default_max_retries")]
    pub max_retries: u32,

    /// Constant wait before each retry (seconds)
    #[serde(rename = "rate-limit-delay-secs", default = "default_rate_limit_delay")]
    pub rate_limit_delay_secs: u64,

    /// User agent sent with every request
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            rate_limit_delay_secs: default_rate_limit_delay(),
            user_agent: default_user_agent(),
        }
    }
}

/// Page cache configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// Directory holding one `.html` file per cached URL
    #[serde(default = "default_cache_dir")]
    pub directory: String,

    /// Bypass the cache entirely (no reads, no writes)
    #[serde(rename = "ignore-cache", default)]
    pub ignore_cache: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            directory: default_cache_dir(),
            ignore_cache: false,
        }
    }
}

/// Which extraction rules apply to the seed pages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutKind {
    Sale,
    Rent,
    /// Rent pages archived in 2018, before the card markup was renamed
    #[serde(rename = "rent-2018")]
    Rent2018,
}

/// Crawl job configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlConfig {
    pub layout: LayoutKind,

    /// Number of result pages visited per seed URL
    #[serde(rename = "pages-per-seed", default = "default_pages_per_seed")]
    pub pages_per_seed: u32,

    /// Query parameter carrying the page number on pages 2..N
    #[serde(rename = "page-param", default = "default_page_param")]
    pub page_param: String,

    /// Base that listing card links are resolved against
    #[serde(rename = "detail-base-url", default = "default_detail_base_url")]
    pub detail_base_url: String,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path to the CSV file receiving the records
    #[serde(rename = "records-path")]
    pub records_path: String,

    /// Path to the text file receiving the failed page indices
    #[serde(rename = "error-pages-path")]
    pub error_pages_path: String,
}

/// Seed URLs for one archive year
#[derive(Debug, Clone, Deserialize)]
pub struct SeedEntry {
    pub year: u16,
    pub urls: Vec<String>,
}

fn default_max_retries() -> u32 {
    3
}

fn default_rate_limit_delay() -> u64 {
    15
}

fn default_user_agent() -> String {
    format!("listing-harvest/{}", env!("CARGO_PKG_VERSION"))
}

fn default_cache_dir() -> String {
    ".cache".to_string()
}

fn default_pages_per_seed() -> u32 {
    7
}

fn default_page_param() -> String {
    "pagina".to_string()
}

fn default_detail_base_url() -> String {
    "https://web.archive.org".to_string()
}
