//! Configuration module for Linkwalk
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use linkwalk::config::{load_config_with_hash, validate};
//! use std::path::Path;
//!
//! let (config, _hash) = load_config_with_hash(Path::new("linkwalk.toml")).unwrap();
//! validate(&config).unwrap();
//! println!("Crawler will visit at most {} pages", config.crawler.max_pages);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CrawlerConfig, OutputConfig, UserAgentConfig, DEFAULT_MAX_PAGES,
    DEFAULT_REQUEST_TIMEOUT,
};

// Re-export parser functions
pub use parser::{hash_content, load_config_with_hash, parse_config};
pub use validation::validate;
