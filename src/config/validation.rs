use crate::config::types::{CacheConfig, Config, CrawlConfig, FetcherConfig, OutputConfig, SeedEntry};
use crate::ConfigError;
use std::collections::HashSet;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_fetcher_config(&config.fetcher)?;
    validate_cache_config(&config.cache)?;
    validate_crawl_config(&config.crawl)?;
    validate_output_config(&config.output)?;
    validate_seeds(&config.seeds)?;
    Ok(())
}

fn validate_fetcher_config(config: &FetcherConfig) -> Result<(), ConfigError> {
    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    if config.rate_limit_delay_secs > 3600 {
        return Err(ConfigError::Validation(format!(
            "rate_limit_delay_secs must be at most 3600, got {}",
            config.rate_limit_delay_secs
        )));
    }

    Ok(())
}

fn validate_cache_config(config: &CacheConfig) -> Result<(), ConfigError> {
    if config.directory.is_empty() {
        return Err(ConfigError::Validation(
            "cache directory cannot be empty".to_string(),
        ));
    }

    Ok(())
}

fn validate_crawl_config(config: &CrawlConfig) -> Result<(), ConfigError> {
    if config.pages_per_seed < 1 {
        return Err(ConfigError::Validation(format!(
            "pages_per_seed must be >= 1, got {}",
            config.pages_per_seed
        )));
    }

    // The page parameter is appended verbatim to the query string
    if config.page_param.is_empty()
        || !config
            .page_param
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "page_param must be a non-empty ASCII identifier, got '{}'",
            config.page_param
        )));
    }

    validate_http_url("detail_base_url", &config.detail_base_url)?;

    Ok(())
}

fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.records_path.is_empty() {
        return Err(ConfigError::Validation(
            "records_path cannot be empty".to_string(),
        ));
    }

    if config.error_pages_path.is_empty() {
        return Err(ConfigError::Validation(
            "error_pages_path cannot be empty".to_string(),
        ));
    }

    if config.records_path == config.error_pages_path {
        return Err(ConfigError::Validation(format!(
            "records_path and error_pages_path must differ, both are '{}'",
            config.records_path
        )));
    }

    Ok(())
}

fn validate_seeds(seeds: &[SeedEntry]) -> Result<(), ConfigError> {
    let mut years = HashSet::new();

    for entry in seeds {
        if !years.insert(entry.year) {
            return Err(ConfigError::Validation(format!(
                "Seed year {} is configured more than once",
                entry.year
            )));
        }

        if entry.urls.is_empty() {
            return Err(ConfigError::Validation(format!(
                "Seed year {} must have at least one URL",
                entry.year
            )));
        }

        for seed in &entry.urls {
            validate_http_url("seed URL", seed)?;
        }
    }

    Ok(())
}

/// Checks that `value` parses as an absolute http(s) URL
fn validate_http_url(what: &str, value: &str) -> Result<(), ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid {} '{}': {}", what, value, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "{} '{}' must use http or https",
            what, value
        )));
    }

    Ok(())
}
