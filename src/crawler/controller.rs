//! Crawl controller - main crawl orchestration logic
//!
//! This module drives a crawl one fetch at a time:
//! - Seeding the frontier and resetting per-run state
//! - Popping the next record and fetching its target
//! - Resolving the base address and extracting references from 200 pages
//! - Recording broken entries for failed fetches and malformed markup
//! - Building the report and signalling completion exactly once

use crate::crawler::base::{resolve_base, with_trailing_separator};
use crate::crawler::broken::{BrokenSet, FailureReason};
use crate::crawler::events::{CrawlEvent, EventSender};
use crate::crawler::extractor::extract;
use crate::crawler::fetcher::{FetchOutcome, PageFetcher};
use crate::crawler::frontier::Frontier;
use crate::crawler::parser::parse_document;
use crate::crawler::record::LinkRecord;
use crate::output::CrawlReport;
use crate::state::{CrawlState, Phase};
use crate::url::LinkClassifier;
use crate::{LinkwalkError, Result};
use tokio::sync::watch;

/// Handle that resolves once a crawl reaches [`Phase::Done`]
#[derive(Debug, Clone)]
pub struct Completion {
    rx: watch::Receiver<Phase>,
}

impl Completion {
    /// Waits until the crawl is done
    ///
    /// Returns the last observed phase, which is `Done` unless the controller
    /// was dropped before finishing.
    pub async fn wait(&mut self) -> Phase {
        let reached = self.rx.wait_for(Phase::is_done).await.is_ok();
        if reached {
            Phase::Done
        } else {
            *self.rx.borrow()
        }
    }

    /// The phase as of now, without waiting
    pub fn phase(&self) -> Phase {
        *self.rx.borrow()
    }
}

/// Main crawl controller
///
/// Exactly one fetch is in flight at any time, so the frontier and the broken
/// set are owned outright and never locked.
pub struct Crawler<F> {
    fetcher: F,
    state: CrawlState,
    classifier: Option<LinkClassifier>,
    frontier: Frontier,
    broken: BrokenSet,
    report: Option<CrawlReport>,
    phase_tx: watch::Sender<Phase>,
    events: Option<EventSender>,
    config_hash: Option<String>,
}

impl<F: PageFetcher> Crawler<F> {
    /// Creates an idle controller around `fetcher`
    pub fn new(fetcher: F) -> Self {
        let (phase_tx, _) = watch::channel(Phase::Idle);

        Self {
            fetcher,
            state: CrawlState::default(),
            classifier: None,
            frontier: Frontier::new(),
            broken: BrokenSet::new(),
            report: None,
            phase_tx,
            events: None,
            config_hash: None,
        }
    }

    /// Emits [`CrawlEvent`]s on `events` for every run
    pub fn with_events(mut self, events: EventSender) -> Self {
        self.events = Some(events);
        self
    }

    /// Configuration hash copied into every report
    pub fn with_config_hash(mut self, hash: impl Into<String>) -> Self {
        self.config_hash = Some(hash.into());
        self
    }

    /// Starts a fresh run from `seed`
    ///
    /// All state from a previous run is discarded. Fails without touching the
    /// current state if `max_pages` is zero or the seed is not an absolute
    /// `http(s)` address with a host.
    ///
    /// Only the seed is queued here; drive the run with [`run`](Self::run)
    /// or repeated [`step`](Self::step) calls.
    pub fn start(&mut self, seed: &str, max_pages: usize, allow_external: bool) -> Result<()> {
        if max_pages == 0 {
            return Err(LinkwalkError::InvalidStart(
                "max pages must be at least 1".to_string(),
            ));
        }

        let seed = seed.trim();
        let classifier = LinkClassifier::for_seed(seed, allow_external)?;

        self.state = CrawlState::running(seed, classifier.hostname(), max_pages, allow_external);
        self.classifier = Some(classifier);
        self.frontier.clear();
        self.broken.clear();
        self.report = None;
        self.frontier.enqueue(LinkRecord::seed(seed));

        tracing::info!(
            "Starting crawl of {} (max {} pages, external links {})",
            seed,
            max_pages,
            if allow_external { "allowed" } else { "skipped" }
        );
        self.emit(CrawlEvent::Started {
            seed: seed.to_string(),
            max_pages,
        });
        self.phase_tx.send_replace(Phase::Running);

        Ok(())
    }

    /// Performs one step of the crawl loop and returns the resulting phase
    ///
    /// Does nothing unless the controller is running.
    pub async fn step(&mut self) -> Phase {
        if !self.state.phase.is_running() {
            return self.state.phase;
        }

        if self.state.limit_reached() {
            self.finish();
            return self.state.phase;
        }

        let Some(record) = self.frontier.dequeue() else {
            self.finish();
            return self.state.phase;
        };

        let outcome = self.fetcher.fetch(&record.target).await;
        match outcome {
            FetchOutcome::Response { status: 200, body } => self.process_page(&record, &body),
            FetchOutcome::Response { status, .. } => {
                self.record_broken(record, FailureReason::Http(status))
            }
            FetchOutcome::Failure(error) => {
                self.record_broken(record, FailureReason::Transport(error))
            }
        }

        self.state.phase
    }

    /// Drives the current run to completion and returns its report
    pub async fn run(&mut self) -> Result<&CrawlReport> {
        if self.state.phase == Phase::Idle {
            return Err(LinkwalkError::InvalidStart(
                "crawl has not been started".to_string(),
            ));
        }

        while self.step().await.is_running() {}

        self.report.as_ref().ok_or_else(|| {
            LinkwalkError::InvalidStart("crawl finished without a report".to_string())
        })
    }

    /// Starts a run from `seed` and drives it to completion
    pub async fn crawl(
        &mut self,
        seed: &str,
        max_pages: usize,
        allow_external: bool,
    ) -> Result<&CrawlReport> {
        self.start(seed, max_pages, allow_external)?;
        self.run().await
    }

    /// Handle that resolves when the current or next run is done
    pub fn completion(&self) -> Completion {
        Completion {
            rx: self.phase_tx.subscribe(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn state(&self) -> &CrawlState {
        &self.state
    }

    pub fn frontier(&self) -> &Frontier {
        &self.frontier
    }

    pub fn broken(&self) -> &BrokenSet {
        &self.broken
    }

    /// The report of the last run, available once it is done
    pub fn report(&self) -> Option<&CrawlReport> {
        self.report.as_ref()
    }

    /// Handles a page that answered with status 200
    fn process_page(&mut self, record: &LinkRecord, body: &str) {
        self.state.record_visit();
        tracing::debug!("{} [online] {}", self.state.visited_count, record.target);

        let page_address = with_trailing_separator(&record.target);
        let doc = parse_document(body);
        let base = resolve_base(&doc.bases, &page_address);

        if let Some((target, reason)) = base.problem {
            self.record_broken(LinkRecord::new(page_address.as_str(), target), reason);
        }

        let extraction = match &self.classifier {
            Some(classifier) => extract(&doc, &base.address, classifier),
            None => return,
        };

        for malformed in extraction.malformed {
            self.record_broken(malformed, FailureReason::MalformedReference);
        }
        for accepted in extraction.accepted {
            self.offer(accepted);
        }

        self.emit(CrawlEvent::PageVisited {
            target: record.target.clone(),
            visited: self.state.visited_count,
            pending: self.frontier.pending(),
        });

        if self.state.visited_count % 10 == 0 {
            tracing::info!(
                "Progress: {} pages crawled, {} in frontier, {} broken",
                self.state.visited_count,
                self.frontier.pending(),
                self.broken.len()
            );
        }
    }

    /// Hands an accepted record to the frontier
    ///
    /// A target that already failed in this run is recorded again under the
    /// new origin instead of being fetched a second time.
    fn offer(&mut self, record: LinkRecord) {
        if let Some(reason) = self.broken.known_reason(&record.target).cloned() {
            self.record_broken(record, reason);
        } else {
            self.frontier.enqueue(record);
        }
    }

    fn record_broken(&mut self, record: LinkRecord, reason: FailureReason) {
        tracing::warn!(
            "Broken {} on {}: {}",
            record.target,
            record.origin,
            reason
        );
        self.emit(CrawlEvent::PageBroken {
            origin: record.origin.clone(),
            target: record.target.clone(),
            reason: reason.clone(),
        });
        self.broken.push(record, reason);
    }

    /// The single `Running -> Done` transition
    fn finish(&mut self) {
        if !self.state.phase.is_running() {
            return;
        }

        let mut report = CrawlReport::build(
            &self.state,
            &self.frontier,
            &self.broken,
            chrono::Local::now(),
        );
        if let Some(hash) = &self.config_hash {
            report = report.with_config_hash(hash.clone());
        }

        tracing::info!(
            "Crawl complete: {} pages crawled, {} unchecked, {} broken",
            report.pages_crawled,
            report.pages_unchecked,
            report.broken_count
        );
        self.emit(CrawlEvent::Finished {
            visited: report.pages_crawled,
            unchecked: report.pages_unchecked,
            broken: report.broken_count,
        });

        self.report = Some(report);
        self.state.phase = Phase::Done;
        self.phase_tx.send_replace(Phase::Done);
    }

    fn emit(&self, event: CrawlEvent) {
        if let Some(events) = &self.events {
            let _ = events.send(event);
        }
    }
}
