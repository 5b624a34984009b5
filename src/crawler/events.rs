use crate::crawler::broken::FailureReason;
use tokio::sync::mpsc;

/// Structured progress events emitted by the crawl controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrawlEvent {
    /// A run started at `seed`
    Started { seed: String, max_pages: usize },

    /// A page answered with status 200 and was scanned for references
    PageVisited {
        target: String,
        visited: usize,
        pending: usize,
    },

    /// A reference was recorded as broken
    PageBroken {
        origin: String,
        target: String,
        reason: FailureReason,
    },

    /// The run reached its end
    Finished {
        visited: usize,
        unchecked: usize,
        broken: usize,
    },
}

/// Sending half handed to the controller
pub type EventSender = mpsc::UnboundedSender<CrawlEvent>;

/// Receiving half for consumers of crawl events
pub type EventReceiver = mpsc::UnboundedReceiver<CrawlEvent>;

/// Creates a channel for crawl events
pub fn event_channel() -> (EventSender, EventReceiver) {
    mpsc::unbounded_channel()
}
