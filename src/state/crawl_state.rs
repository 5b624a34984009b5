//! Crawl lifecycle and per-run counters

use std::fmt;

/// Lifecycle phase of a crawl controller
///
/// `Done` is terminal for a run. A new `start` from any phase returns the
/// controller to a fresh `Running`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    /// No crawl has been started yet
    #[default]
    Idle,

    /// A crawl is in progress
    Running,

    /// The frontier drained or the page limit was reached
    Done,
}

impl Phase {
    /// Returns true once the run has finished
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Returns true while pages are being visited
    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Counters and policy of a single crawl run
///
/// One instance lives inside each controller and is replaced wholesale on
/// every `start`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlState {
    /// Pages fetched with status 200
    pub visited_count: usize,

    /// Upper bound on `visited_count`
    pub max_pages: usize,

    /// Whether absolute links to other hosts are followed
    pub allow_external: bool,

    /// Hostname of the seed, fixed at start
    pub hostname: String,

    /// The seed address this run started from
    pub seed: String,

    /// Current lifecycle phase
    pub phase: Phase,
}

impl CrawlState {
    /// Creates the state for a freshly started run
    pub fn running(
        seed: impl Into<String>,
        hostname: impl Into<String>,
        max_pages: usize,
        allow_external: bool,
    ) -> Self {
        Self {
            visited_count: 0,
            max_pages,
            allow_external,
            hostname: hostname.into(),
            seed: seed.into(),
            phase: Phase::Running,
        }
    }

    /// Returns true once `max_pages` successful fetches have happened
    pub fn limit_reached(&self) -> bool {
        self.visited_count >= self.max_pages
    }

    /// Records one successful fetch
    pub fn record_visit(&mut self) {
        self.visited_count += 1;
    }
}
