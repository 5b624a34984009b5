//! Plain-text report rendering
//!
//! This module renders a [`CrawlReport`] as the human-readable text file
//! written at the end of a run.

use crate::output::report::CrawlReport;
use crate::output::OutputResult;
use chrono::{DateTime, Local};
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

const SEPARATOR: &str = "---------------------------------------------------------";

/// Writes the rendered report into `dir`
///
/// The directory is created if needed; the file is named after the report
/// timestamp, e.g. `03-05-2024 14-07.txt`.
///
/// # Returns
///
/// * `Ok(PathBuf)` - Path of the written file
/// * `Err(OutputError)` - Failed to create the directory or write the file
pub fn write_report(report: &CrawlReport, dir: &Path) -> OutputResult<PathBuf> {
    fs::create_dir_all(dir)?;

    let path = dir.join(report_file_name(&report.generated_at));
    let mut file = File::create(&path)?;
    file.write_all(render_text(report).as_bytes())?;

    Ok(path)
}

/// File name for a report generated at `timestamp`
pub fn report_file_name(timestamp: &DateTime<Local>) -> String {
    format!("{}.txt", timestamp.format("%m-%d-%Y %H-%M"))
}

/// Renders a crawl report as plain text
pub fn render_text(report: &CrawlReport) -> String {
    let mut text = String::new();

    // Header
    text.push_str(&format!(
        "Linkwalk Report from {}\n",
        report.generated_at.format("%Y-%m-%d %H:%M:%S %:z")
    ));
    text.push_str(&format!("Seed: {}\n", report.seed));
    if let Some(hash) = &report.config_hash {
        text.push_str(&format!("Config hash: {}\n", hash));
    }
    text.push('\n');

    // Summary
    text.push_str(&format!(
        "Crawling completed. {} pages crawled.\n",
        report.pages_crawled
    ));
    text.push_str(&format!(
        "{} pages unchecked because the page limit was reached.\n",
        report.pages_unchecked
    ));
    text.push_str(&format!("{} broken pages found.\n", report.broken_count));

    for group in &report.groups {
        text.push('\n');
        text.push_str(SEPARATOR);
        text.push('\n');
        text.push_str(&group.origin);
        text.push('\n');
        text.push_str(SEPARATOR);
        text.push('\n');

        for entry in &group.entries {
            text.push_str(&format!("  target: {}\n", entry.record.target));
            if !entry.record.text.is_empty() {
                text.push_str(&format!("  text: {}\n", entry.record.text));
            }
            if !entry.record.attributes.is_empty() {
                text.push_str(&format!(
                    "  attributes: {}\n",
                    format_attributes(&entry.record.attributes)
                ));
            }
            text.push_str(&format!("  reason: {}\n\n", entry.reason));
        }
    }

    text
}

fn format_attributes(attributes: &BTreeMap<String, String>) -> String {
    attributes
        .iter()
        .map(|(name, value)| format!("{}=\"{}\"", name, value))
        .collect::<Vec<_>>()
        .join(" ")
}
