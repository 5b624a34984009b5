//! State module for tracking crawl progress
//!
//! This module provides the controller's lifecycle phase and the per-run
//! counters that drive termination.
//!
//! # Components
//!
//! - `Phase`: Lifecycle of a crawl (idle, running, done)
//! - `CrawlState`: Visit counter, page limit and same-host policy of one run

mod crawl_state;

// Re-export main types
pub use crawl_state::{CrawlState, Phase};
