//! URL handling module for Linkwalk
//!
//! This module provides relative reference resolution, the canonical key used
//! for deduplication, hostname helpers, and the link classifier that decides
//! which discovered references get visited.

mod classify;
mod domain;
mod normalize;
mod resolve;

// Re-export main functions
pub use classify::{Classification, LinkClassifier, SKIPPED_EXTENSIONS, SKIPPED_PREFIXES};
pub use domain::{extract_hostname, host_portion, seed_hostname};
pub use normalize::canonical_key;
pub use resolve::resolve;
