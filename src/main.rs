//! Guide-Crawler main entry point
//!
//! This is the command-line interface for the Guide-Crawler restaurant
//! harvester.

use anyhow::Context;
use clap::Parser;
use guide_crawler::config::{load_config_with_hash, Config};
use guide_crawler::crawler::crawl;
use guide_crawler::output::{
    format_preview_table, generate_summary, print_statistics, write_outcome, CsvOutputHandler,
    MarkdownOutputHandler, OutputHandler,
};
use guide_crawler::url::parse_start_url;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Guide-Crawler: a paginated restaurant guide harvester
///
/// Guide-Crawler walks a restaurant listing page by page, extracts one record
/// per card, optionally enriches it from the restaurant's detail page, and
/// writes the results as CSV.
#[derive(Parser, Debug)]
#[command(name = "guide-crawler")]
#[command(version = "1.0.0")]
#[command(about = "A paginated restaurant guide harvester", long_about = None)]
struct Cli {
    /// First listing page to crawl (overrides the config file)
    #[arg(value_name = "START_URL")]
    start_url: Option<String>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Path of the CSV file to write
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Path of the markdown summary to write
    #[arg(long, value_name = "FILE")]
    summary: Option<PathBuf>,

    /// Restaurant name to skip (repeatable)
    #[arg(long = "exclude", value_name = "NAME")]
    exclude: Vec<String>,

    /// Do not visit detail pages
    #[arg(long)]
    no_details: bool,

    /// Stop after this many listing pages
    #[arg(long, value_name = "N")]
    max_pages: Option<u32>,

    /// Number of records to print after the crawl
    #[arg(long, value_name = "N", default_value_t = 10)]
    preview: usize,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Show the resolved configuration without crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let (config, config_hash) = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (cfg, hash) = load_config_with_hash(path)
                .with_context(|| format!("failed to load {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            (cfg, Some(hash))
        }
        None => (Config::default(), None),
    };

    let config = apply_overrides(config, &cli);
    guide_crawler::config::validate(&config)?;

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    handle_crawl(config, config_hash, cli.preview, cli.quiet).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("guide_crawler=info,warn"),
            1 => EnvFilter::new("guide_crawler=debug,info"),
            2 => EnvFilter::new("guide_crawler=trace,debug"),
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

/// Applies command-line flags on top of the loaded configuration
fn apply_overrides(mut config: Config, cli: &Cli) -> Config {
    if let Some(start_url) = &cli.start_url {
        config.crawler.start_url = Some(start_url.clone());
    }
    if let Some(output) = &cli.output {
        config.output.csv_path = output.display().to_string();
    }
    if let Some(summary) = &cli.summary {
        config.output.summary_path = Some(summary.display().to_string());
    }
    if cli.no_details {
        config.crawler.fetch_details = false;
    }
    if cli.max_pages.is_some() {
        config.crawler.max_pages = cli.max_pages;
    }
    config.exclusions.names.extend(cli.exclude.iter().cloned());
    config
}

/// Handles the --dry-run mode: shows what would be crawled
fn handle_dry_run(config: &Config) {
    println!("=== Guide-Crawler Dry Run ===\n");

    println!("Crawler Configuration:");
    println!(
        "  Start URL: {}",
        config.crawler.start_url.as_deref().unwrap_or("(none)")
    );
    println!(
        "  Politeness delay: {}ms",
        config.crawler.politeness_delay_ms
    );
    println!("  Fetch details: {}", config.crawler.fetch_details);
    println!(
        "  Detail concurrency: {}",
        config.crawler.detail_concurrency
    );
    println!("  Detail delay: {}ms", config.crawler.detail_delay_ms);
    match config.crawler.max_pages {
        Some(max) => println!("  Max pages: {}", max),
        None => println!("  Max pages: unlimited"),
    }
    println!("  Dedupe names: {}", config.crawler.dedupe_names);

    println!("\nClient:");
    println!("  User-Agent: {}", config.client.user_agent);
    println!("  Accept-Language: {}", config.client.accept_language);
    println!("  Timeout: {}s", config.client.timeout_secs);

    let exclusions = config.exclusion_set();
    println!("\nExcluded Names ({}):", exclusions.len());
    for name in exclusions.sorted_names() {
        println!("  - {}", name);
    }

    println!("\nOutput:");
    println!("  CSV: {}", config.output.csv_path);
    if let Some(summary) = &config.output.summary_path {
        println!("  Summary: {}", summary);
    }

    println!("\n✓ Configuration is valid");
}

/// Handles the main crawl operation
async fn handle_crawl(
    config: Config,
    config_hash: Option<String>,
    preview: usize,
    quiet: bool,
) -> anyhow::Result<()> {
    let start_url = config
        .crawler
        .start_url
        .as_deref()
        .context("no start URL given on the command line or in the config file")?;
    let start_url = parse_start_url(start_url)?;

    tracing::info!(
        "Excluded names: {}, fetch details: {}",
        config.exclusions.names.len(),
        config.crawler.fetch_details
    );

    let outcome = crawl(&config, start_url).await?;
    let summary = generate_summary(&outcome, config_hash);

    let mut handlers: Vec<Box<dyn OutputHandler>> = vec![Box::new(
        CsvOutputHandler::create(Path::new(&config.output.csv_path))
            .with_context(|| format!("failed to create {}", config.output.csv_path))?,
    )];
    if let Some(summary_path) = &config.output.summary_path {
        handlers.push(Box::new(MarkdownOutputHandler::new(
            summary_path,
            config.output.preview_rows,
        )));
    }
    write_outcome(&mut handlers, &outcome, &summary)?;

    if !quiet {
        if outcome.records.is_empty() {
            println!("\nNo data extracted.");
        } else {
            println!(
                "\n=== FINAL RESULTS: Found {} Total Restaurants ===\n",
                outcome.records.len()
            );
            let shown = preview.min(outcome.records.len());
            if shown > 0 {
                println!("{}", format_preview_table(&outcome.records[..shown]));
            }
            print_statistics(&summary.statistics);
        }
        println!("\n✓ Records written to: {}", config.output.csv_path);
    }

    if !outcome.is_success() {
        anyhow::bail!(
            "crawl failed: {} ({})",
            outcome.reason.description(),
            outcome.reason
        );
    }

    tracing::info!("Crawl completed successfully ({})", outcome.reason);
    Ok(())
}
