//! Listing-Harvest main entry point
//!
//! This is the command-line interface for the archived listing harvester.

use anyhow::{anyhow, Context};
use clap::Parser;
use listing_harvest::config::{load_config_with_hash, Config};
use listing_harvest::crawler::{build_driver, page_urls};
use listing_harvest::output::{sink_from_config, ExportSink};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Listing-Harvest: archived listing page harvester
///
/// Crawls the configured seed pages of one archive year, extracts one record
/// per listing card and writes them as CSV next to a list of failed pages.
#[derive(Parser, Debug)]
#[command(name = "listing-harvest")]
#[command(version)]
#[command(about = "Harvests archived real-estate listings into CSV", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Archive year whose seed URLs are crawled
    #[arg(short, long, required_unless_present = "dry_run")]
    year: Option<u16>,

    /// Fetch everything from the network without reading or writing the cache
    #[arg(long)]
    ignore_cache: bool,

    /// Validate config and show what would be crawled without actually crawling
    #[arg(long)]
    dry_run: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("Failed to load configuration {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", hash);

    if cli.dry_run {
        handle_dry_run(&config, cli.year);
        return Ok(());
    }

    let year = cli
        .year
        .ok_or_else(|| anyhow!("--year is required to run a crawl"))?;
    handle_crawl(&config, year, cli.ignore_cache).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("listing_harvest=info,warn"),
            1 => EnvFilter::new("listing_harvest=debug,info"),
            2 => EnvFilter::new("listing_harvest=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: shows the pages a crawl would visit
fn handle_dry_run(config: &Config, year: Option<u16>) {
    println!("=== Listing-Harvest Dry Run ===\n");

    println!("Fetcher:");
    println!("  User agent: {}", config.fetcher.user_agent);
    println!(
        "  Rate-limit retries: {} ({}s apart)",
        config.fetcher.max_retries, config.fetcher.rate_limit_delay_secs
    );

    println!("\nCache:");
    println!("  Directory: {}", config.cache.directory);
    println!("  Ignored: {}", config.cache.ignore_cache);

    println!("\nCrawl:");
    println!("  Layout: {:?}", config.crawl.layout);
    println!("  Pages per seed: {}", config.crawl.pages_per_seed);

    println!("\nOutput:");
    println!("  Records: {}", config.output.records_path);
    println!("  Error pages: {}", config.output.error_pages_path);

    for entry in &config.seeds {
        if year.is_some_and(|year| year != entry.year) {
            continue;
        }
        println!("\nSeeds for {} ({}):", entry.year, entry.urls.len());
        for seed in &entry.urls {
            for url in page_urls(seed, config.crawl.pages_per_seed, &config.crawl.page_param) {
                println!("  * {}", url);
            }
        }
    }

    println!("\n✓ Configuration is valid");
}

/// Handles the main crawl operation
async fn handle_crawl(config: &Config, year: u16, ignore_cache: bool) -> anyhow::Result<()> {
    let seeds = config
        .seeds_for_year(year)
        .ok_or_else(|| anyhow!("No seed URLs configured for year {}", year))?;

    tracing::info!("Total seed URLs for {}: {}", year, seeds.len());
    if ignore_cache || config.cache.ignore_cache {
        tracing::info!("Cache disabled for this run");
    }

    let driver = build_driver(config, ignore_cache).context("Failed to set up the crawler")?;
    let outcome = driver.run(seeds).await;

    sink_from_config(&config.output)
        .export(&outcome)
        .context("Failed to export crawl results")?;

    if !outcome.error_pages.is_empty() {
        tracing::warn!(
            "{} pages failed: {}",
            outcome.error_pages.len(),
            outcome.error_pages.to_delimited()
        );
    }

    Ok(())
}
