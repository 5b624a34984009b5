//! Output module for building and writing crawl reports
//!
//! This module handles:
//! - Building the report from the final crawl state
//! - Rendering it as plain text
//! - Writing it to a timestamped file

mod report;
mod text;

pub use report::{CrawlReport, OriginGroup};
pub use text::{render_text, report_file_name, write_report};

use thiserror::Error;

/// Output-specific errors
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write report: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for output operations
pub type OutputResult<T> = Result<T, OutputError>;
