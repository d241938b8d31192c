//! llms-sitemap main entry point
//!
//! This is the command-line interface for discovering and ranking the pages
//! of a site.

use anyhow::Context;
use clap::Parser;
use llms_sitemap::classify::{
    apply_group_limits, apply_group_profile, apply_max_pages, Classifier,
};
use llms_sitemap::config::{load_config_with_hash, Config, SourceKind};
use llms_sitemap::crawler::build_http_client;
use llms_sitemap::output::{log_summary, print_summary, RunSummary};
use llms_sitemap::SourceCollector;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// llms-sitemap: page discovery for llms.txt manifests
///
/// Reads sitemaps, crawls politely and merges static URL lists, then
/// groups and scores the pages it found.
#[derive(Parser, Debug)]
#[command(name = "llms-sitemap")]
#[command(version)]
#[command(about = "Discovers and ranks the pages of a site", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show the sources without any network access
    #[arg(long)]
    dry_run: bool,

    /// Named profile from filters.profiles selecting the groups to keep
    #[arg(long)]
    profile: Option<String>,

    /// Groups to keep, overriding --profile (repeatable or comma-separated)
    #[arg(long = "only-group", value_name = "GROUP", value_delimiter = ',')]
    only_groups: Vec<String>,

    /// Keep at most this many pages
    #[arg(long)]
    max_pages: Option<usize>,

    /// List every URL that failed to fetch
    #[arg(long)]
    failed: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("Failed to load {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    // Compile rules up front so a bad pattern fails before any request
    let classifier = Classifier::new(&config)?;

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    run(&cli, &config, &classifier).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("llms_sitemap=info,warn"),
            1 => EnvFilter::new("llms_sitemap=debug,info"),
            2 => EnvFilter::new("llms_sitemap=trace,debug"),
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

/// Handles the --dry-run mode: shows the sources and limits of the run
fn handle_dry_run(config: &Config) {
    println!("=== llms-sitemap Dry Run ===\n");

    println!("Site:");
    println!("  Base URL: {}", config.base_url());
    println!("  Default language: {}", config.site.default_language);
    println!("  Allowed hosts: {}", config.allowed_hosts().join(", "));

    println!("\nSources ({}):", config.sources.len());
    for source in &config.sources {
        match source.kind {
            SourceKind::Static => println!("  - static ({} URLs)", source.urls.len()),
            SourceKind::Crawl => println!(
                "  - crawl {} (max depth {}, max urls {})",
                source.url, source.max_depth, source.max_urls
            ),
            SourceKind::Sitemap => println!("  - sitemap {}", source.url),
        }
    }

    println!("\nFilters:");
    println!("  Global URL budget: {}", config.filters.max_urls);
    println!("  Include rules: {}", config.filters.include.len());
    println!("  Exclude rules: {}", config.filters.exclude.len());
    println!("  Default excludes: {}", config.filters.use_default_excludes);
    println!("  Auto group: {}", config.filters.auto_group);

    println!("\nCrawler:");
    println!("  Polite: {} ({}ms)", config.crawler.polite, config.crawler.request_delay_ms);
    println!("  Max retries: {}", config.crawler.max_retries);
    println!("  Respect robots.txt: {}", config.crawler.respect_robots);
    println!("  Auto subdomains: {}", config.discovery.auto_subdomains);
    println!("  User agent: {}", config.user_agent.header_value());

    println!("\n✓ Configuration is valid");
}

/// Collects, classifies and prints the summary
async fn run(cli: &Cli, config: &Config, classifier: &Classifier) -> anyhow::Result<()> {
    let client = build_http_client(&config.user_agent).context("Failed to build HTTP client")?;

    let collection = SourceCollector::new(config, &client).collect().await;

    let pages = classifier.classify(&collection.urls);
    let pages = apply_group_profile(
        pages,
        &config.filters,
        cli.profile.as_deref(),
        &cli.only_groups,
    );
    let pages = apply_group_limits(pages, &config.filters);
    let pages = apply_max_pages(pages, cli.max_pages);

    let summary = RunSummary::new(&collection, &pages);
    log_summary(&summary);
    print_summary(&summary);

    if cli.failed && !collection.failures.is_empty() {
        println!("\nFailed URLs ({}):", collection.failures.len());
        for failure in collection.failures.entries() {
            match failure.status {
                Some(status) => println!("  - {} [{}] {}", failure.url, status, failure.error),
                None => println!("  - {} {}", failure.url, failure.error),
            }
        }
    }

    Ok(())
}
