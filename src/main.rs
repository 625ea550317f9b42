//! Site-Corpus main entry point
//!
//! This is the command-line interface for the Site-Corpus text harvester.

use clap::Parser;
use site_corpus::config::{load_config_with_hash, Config};
use site_corpus::crawler::crawl_site;
use site_corpus::output::{print_statistics, write_outputs};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Site-Corpus: a polite single-domain text harvester
///
/// Site-Corpus walks one web site breadth-first from a seed URL, keeps the
/// readable text of each distinct page and writes the corpus out for
/// keyword analysis.
#[derive(Parser, Debug)]
#[command(name = "site-corpus")]
#[command(version = "0.1.0")]
#[command(about = "A polite single-domain text harvester", long_about = None)]
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

    /// Validate config and show what would be crawled without actually crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let config = match load_config_with_hash(&cli.config) {
        Ok((cfg, hash)) => {
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            cfg
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    if cli.dry_run {
        handle_dry_run(&config);
    } else {
        handle_crawl(&config, cli.quiet).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("site_corpus=info,warn"),
            1 => EnvFilter::new("site_corpus=debug,info"),
            2 => EnvFilter::new("site_corpus=trace,debug"),
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

/// Handles the --dry-run mode: shows the effective settings
fn handle_dry_run(config: &Config) {
    let crawler = &config.crawler;

    println!("=== Site-Corpus Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Seed URL: {}", crawler.seed_url);
    println!("  Page budget: {}", crawler.page_budget);
    println!("  Request delay: {}ms", crawler.request_delay_ms);
    println!("  Request timeout: {}s", crawler.request_timeout_secs);
    println!(
        "  Minimum content length: {} chars",
        crawler.min_content_length
    );
    println!("  Retry attempts: {}", crawler.retry_attempts);
    println!(
        "  Follow boilerplate links: {}",
        crawler.follow_boilerplate_links
    );
    println!("  Skipped extensions: {}", crawler.skip_extensions.join(" "));

    println!("\nUser Agent:");
    println!("  {}", config.user_agent.value);

    println!("\nOutput:");
    println!(
        "  Corpus CSV: {}",
        config.output.corpus_path.as_deref().unwrap_or("(none)")
    );
    println!(
        "  Summary: {}",
        config.output.summary_path.as_deref().unwrap_or("(none)")
    );
    println!("  Excerpt length: {} chars", config.output.excerpt_chars);

    println!("\n✓ Configuration is valid");
    println!(
        "✓ Would crawl at most {} pages starting from {}",
        crawler.page_budget, crawler.seed_url
    );
}

/// Handles the main crawl operation
async fn handle_crawl(config: &Config, quiet: bool) -> Result<(), Box<dyn std::error::Error>> {
    let output = match crawl_site(config).await {
        Ok(output) => output,
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            return Err(e.into());
        }
    };

    if output.is_empty() {
        tracing::warn!("No page passed the content filters; the corpus is empty");
    }

    let excerpt = output.excerpt(config.output.excerpt_chars);
    tracing::info!(
        "Corpus excerpt ready: {} characters from {} pages",
        excerpt.chars().count(),
        output.corpus().len()
    );

    let written = write_outputs(&output, &config.output)?;
    tracing::debug!("{} output files written", written);

    if !quiet {
        print_statistics(&output.stats);
    }

    Ok(())
}
