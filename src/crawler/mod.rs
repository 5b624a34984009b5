//! Crawler module for fetching pages and following their references
//!
//! This module contains the core crawling logic, including:
//! - The FIFO frontier and the broken-reference collection
//! - HTML parsing, base-tag resolution and reference extraction
//! - HTTP fetching with outcome classification
//! - The controller that drives a crawl to completion

mod base;
mod broken;
mod controller;
mod events;
mod extractor;
mod fetcher;
mod frontier;
mod parser;
mod record;

pub use base::{resolve_base, with_trailing_separator, BaseResolution, MULTIPLE_BASE_TARGET};
pub use broken::{BrokenLink, BrokenSet, FailureReason};
pub use controller::{Completion, Crawler};
pub use events::{event_channel, CrawlEvent, EventReceiver, EventSender};
pub use extractor::{extract, Extraction};
pub use fetcher::{build_http_client, fetch_url, FetchOutcome, HttpFetcher, PageFetcher, TransportError};
pub use frontier::Frontier;
pub use parser::{parse_document, Element, ParsedDocument};
pub use record::{LinkRecord, SEED_ORIGIN, UNDEFINED_TARGET};

use crate::config::Config;
use crate::output::CrawlReport;
use crate::Result;

/// Runs a complete crawl over HTTP as described by `config`
///
/// The seed, page limit and external-link policy come from the `[crawler]`
/// section; the report carries `config_hash` when given.
///
/// # Returns
///
/// * `Ok(CrawlReport)` - The finished run's report
/// * `Err(LinkwalkError)` - The client could not be built or the seed is invalid
pub async fn crawl(
    config: &Config,
    config_hash: Option<&str>,
    events: Option<EventSender>,
) -> Result<CrawlReport> {
    let seed = config.crawler.seed.as_deref().ok_or_else(|| {
        crate::LinkwalkError::InvalidStart("no seed address configured".to_string())
    })?;

    let mut crawler = Crawler::new(HttpFetcher::new(config)?);
    if let Some(hash) = config_hash {
        crawler = crawler.with_config_hash(hash);
    }
    if let Some(events) = events {
        crawler = crawler.with_events(events);
    }

    let report = crawler
        .crawl(seed, config.crawler.max_pages, config.crawler.allow_external)
        .await?;
    Ok(report.clone())
}
