//! Report builder
//!
//! Turns the final state of a crawl into a summary: counts plus every broken
//! entry grouped by the page that referenced it.

use crate::crawler::{BrokenLink, BrokenSet, Frontier};
use crate::state::CrawlState;
use crate::url::canonical_key;
use chrono::{DateTime, Local};
use std::collections::BTreeMap;

/// Broken entries that share an origin
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OriginGroup {
    /// The origin as first recorded
    pub origin: String,

    /// Entries sorted by target
    pub entries: Vec<BrokenLink>,
}

/// Summary of a finished crawl
#[derive(Debug, Clone)]
pub struct CrawlReport {
    /// When the report was built
    pub generated_at: DateTime<Local>,

    /// Address the crawl started from
    pub seed: String,

    /// SHA-256 of the configuration file, when one was used
    pub config_hash: Option<String>,

    /// Pages fetched with status 200
    pub pages_crawled: usize,

    /// Discovered targets never fetched because the page limit was hit
    pub pages_unchecked: usize,

    /// Total number of broken entries
    pub broken_count: usize,

    /// Broken entries grouped by origin, ordered by canonical origin key
    pub groups: Vec<OriginGroup>,
}

impl CrawlReport {
    /// Builds the report for a finished run
    ///
    /// The unchecked count is the records still waiting in the frontier,
    /// which is only non-zero when the page limit stopped the run. Grouping
    /// uses the canonical key of each origin; ties between equal targets
    /// keep the order in which they were recorded.
    pub fn build(
        state: &CrawlState,
        frontier: &Frontier,
        broken: &BrokenSet,
        generated_at: DateTime<Local>,
    ) -> Self {
        let mut grouped: BTreeMap<String, OriginGroup> = BTreeMap::new();
        for entry in broken.entries() {
            grouped
                .entry(canonical_key(&entry.record.origin))
                .or_insert_with(|| OriginGroup {
                    origin: entry.record.origin.clone(),
                    entries: Vec::new(),
                })
                .entries
                .push(entry.clone());
        }

        let groups = grouped
            .into_values()
            .map(|mut group| {
                group
                    .entries
                    .sort_by(|a, b| a.record.target.cmp(&b.record.target));
                group
            })
            .collect();

        Self {
            generated_at,
            seed: state.seed.clone(),
            config_hash: None,
            pages_crawled: state.visited_count,
            pages_unchecked: frontier.pending(),
            broken_count: broken.len(),
            groups,
        }
    }

    /// Attaches the configuration hash shown in the report header
    pub fn with_config_hash(mut self, hash: impl Into<String>) -> Self {
        self.config_hash = Some(hash.into());
        self
    }

    /// Returns true if any broken entry was recorded
    pub fn has_broken(&self) -> bool {
        self.broken_count > 0
    }
}
