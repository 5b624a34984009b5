//! Linkwalk main entry point
//!
//! This is the command-line interface for the Linkwalk broken link crawler.

use anyhow::Context;
use clap::Parser;
use linkwalk::config::{load_config_with_hash, validate, Config};
use linkwalk::crawler::{self, event_channel, CrawlEvent, EventReceiver};
use linkwalk::output::{render_text, write_report};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Linkwalk: a broken link crawler
///
/// Linkwalk starts at a seed address, follows every same-host link and image
/// it finds, and writes a report of the references that failed, grouped by
/// the page they were found on.
#[derive(Parser, Debug)]
#[command(name = "linkwalk")]
#[command(version)]
#[command(about = "Crawls a website and reports broken links", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Address to start crawling from
    #[arg(long, value_name = "URL")]
    seed: Option<String>,

    /// Maximum number of pages to visit
    #[arg(long, value_name = "N")]
    max_pages: Option<usize>,

    /// Also follow absolute links to other hosts
    #[arg(long)]
    allow_external: bool,

    /// Per-request timeout in seconds
    #[arg(long, value_name = "SECONDS")]
    timeout: Option<u64>,

    /// Directory the report file is written to
    #[arg(long, value_name = "DIR")]
    report_dir: Option<String>,

    /// Print the report instead of writing it to a file
    #[arg(long)]
    stdout: bool,

    /// Increase logging verbosity and print crawl progress (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    match run(cli).await {
        Ok(false) => ExitCode::SUCCESS,
        Ok(true) => ExitCode::from(1),
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::from(2)
        }
    }
}

/// Runs the crawl and reports whether broken links were found
async fn run(cli: Cli) -> anyhow::Result<bool> {
    let (config, config_hash) = load_settings(&cli)?;

    let (events, printer) = if cli.verbose > 0 {
        let (tx, rx) = event_channel();
        (Some(tx), Some(tokio::spawn(print_events(rx))))
    } else {
        (None, None)
    };

    let report = crawler::crawl(&config, config_hash.as_deref(), events)
        .await
        .context("Crawl failed")?;

    if let Some(printer) = printer {
        // The sender is gone with the crawler, so this drains and exits
        let _ = printer.await;
    }

    if cli.stdout {
        print!("{}", render_text(&report));
    } else {
        let path = write_report(&report, Path::new(&config.output.report_dir))
            .context("Failed to write report")?;
        tracing::info!("Report written to {}", path.display());
    }

    Ok(report.has_broken())
}

/// Loads the optional config file and applies command-line overrides
fn load_settings(cli: &Cli) -> anyhow::Result<(Config, Option<String>)> {
    let (mut config, hash) = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load config file {}", path.display()))?;
            tracing::info!("Configuration loaded (hash: {})", hash);
            (config, Some(hash))
        }
        None => (Config::default(), None),
    };

    if let Some(seed) = &cli.seed {
        config.crawler.seed = Some(seed.clone());
    }
    if let Some(max_pages) = cli.max_pages {
        config.crawler.max_pages = max_pages;
    }
    if cli.allow_external {
        config.crawler.allow_external = true;
    }
    if let Some(timeout) = cli.timeout {
        config.crawler.request_timeout = timeout;
    }
    if let Some(dir) = &cli.report_dir {
        config.output.report_dir = dir.clone();
    }

    validate(&config).context("Invalid configuration")?;
    Ok((config, hash))
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("linkwalk=info,warn"),
            1 => EnvFilter::new("linkwalk=debug,info"),
            2 => EnvFilter::new("linkwalk=trace,debug"),
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

/// Prints crawl events until the controller drops its sender
async fn print_events(mut rx: EventReceiver) {
    while let Some(event) = rx.recv().await {
        match event {
            CrawlEvent::Started { seed, max_pages } => {
                println!("Crawling {} (up to {} pages)", seed, max_pages);
            }
            CrawlEvent::PageVisited {
                target,
                visited,
                pending,
            } => {
                println!("{:>5} [online] {} ({} queued)", visited, target, pending);
            }
            CrawlEvent::PageBroken {
                origin,
                target,
                reason,
            } => {
                println!("      [broken] {} on {}: {}", target, origin, reason);
            }
            CrawlEvent::Finished {
                visited,
                unchecked,
                broken,
            } => {
                println!(
                    "Done: {} pages crawled, {} unchecked, {} broken",
                    visited, unchecked, broken
                );
            }
        }
    }
}
