//! FIFO queue of pending link records
//!
//! The frontier hands out records in discovery order and refuses any record
//! whose target has already been enqueued during the current run, whether or
//! not it has been dequeued since.

use crate::crawler::record::LinkRecord;
use crate::url::canonical_key;
use std::collections::{HashSet, VecDeque};

/// Ordered, deduplicated queue of records waiting to be fetched
#[derive(Debug, Default)]
pub struct Frontier {
    /// Records not yet dequeued, in discovery order
    queue: VecDeque<LinkRecord>,

    /// Canonical keys of every target ever enqueued
    seen: HashSet<String>,
}

impl Frontier {
    /// Creates an empty frontier
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a record unless its target was enqueued before
    ///
    /// Returns true if the record was added.
    pub fn enqueue(&mut self, record: LinkRecord) -> bool {
        if !self.seen.insert(canonical_key(&record.target)) {
            return false;
        }
        self.queue.push_back(record);
        true
    }

    /// Removes and returns the oldest pending record
    pub fn dequeue(&mut self) -> Option<LinkRecord> {
        self.queue.pop_front()
    }

    /// Returns true if `target` has been enqueued during this run
    pub fn contains(&self, target: &str) -> bool {
        self.seen.contains(&canonical_key(target))
    }

    /// Number of records waiting to be fetched
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Number of distinct targets enqueued during this run
    pub fn discovered(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Forgets every pending record and every seen target
    pub fn clear(&mut self) {
        self.queue.clear();
        self.seen.clear();
    }
}
