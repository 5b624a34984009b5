//! Accumulated broken references of a crawl run

use crate::crawler::fetcher::TransportError;
use crate::crawler::record::LinkRecord;
use crate::url::canonical_key;
use std::collections::HashMap;
use std::fmt;

/// Why a reference ended up in the broken set
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    /// A response other than 200 was received, redirects included
    Http(u16),

    /// No response could be obtained
    Transport(TransportError),

    /// An anchor or image with a missing or empty reference
    MalformedReference,

    /// A single `<base>` element without `href`
    MalformedBase,

    /// More than one `<base>` element on a page
    MultipleBase,
}

impl FailureReason {
    /// Returns true for failures observed while fetching the target itself
    pub fn is_fetch_failure(&self) -> bool {
        matches!(self, Self::Http(_) | Self::Transport(_))
    }
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(status) => write!(f, "HTTP status {}", status),
            Self::Transport(error) => write!(f, "no response: {}", error),
            Self::MalformedReference => f.write_str("malformed reference"),
            Self::MalformedBase => f.write_str("malformed base tag"),
            Self::MultipleBase => f.write_str("multiple base tags"),
        }
    }
}

/// A broken reference together with its failure reason
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrokenLink {
    pub record: LinkRecord,
    pub reason: FailureReason,
}

/// Append-only collection of broken references
///
/// Targets that failed to fetch are also indexed by canonical key so that a
/// later reference to the same target can be recorded without fetching it
/// again.
#[derive(Debug, Default)]
pub struct BrokenSet {
    entries: Vec<BrokenLink>,
    known: HashMap<String, FailureReason>,
}

impl BrokenSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a broken entry
    pub fn push(&mut self, record: LinkRecord, reason: FailureReason) {
        if reason.is_fetch_failure() {
            self.known
                .entry(canonical_key(&record.target))
                .or_insert_with(|| reason.clone());
        }
        self.entries.push(BrokenLink { record, reason });
    }

    /// The reason `target` failed to fetch earlier in this run, if it did
    pub fn known_reason(&self, target: &str) -> Option<&FailureReason> {
        self.known.get(&canonical_key(target))
    }

    pub fn entries(&self) -> &[BrokenLink] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.known.clear();
    }
}
