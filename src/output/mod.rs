//! Output writers for trace logs and reports.
//!
//! This module handles writing data to disk in various formats:
//! - Compressed trace logs
//! - CSV reports
//! - JSON reports

pub mod csv;
pub mod json;
pub mod trace_log;

// Re-export main functions
pub use self::csv::{read_csv_report, write_csv_report};
pub use json::{read_json_report, write_json_report};
pub use trace_log::persist_trace_log;

use crate::aggregator::ReportRow;
use crate::utils::error::OutputError;
use log::debug;
use std::path::Path;

/// Tabular report format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ReportFormat {
    #[default]
    Csv,
    Json,
}

impl ReportFormat {
    /// File extension used for reports of this format
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Csv => "csv",
            ReportFormat::Json => "json",
        }
    }
}

/// Write report rows in the requested format
pub fn write_report(
    rows: &[ReportRow],
    output_path: impl AsRef<Path>,
    format: ReportFormat,
) -> Result<(), OutputError> {
    match format {
        ReportFormat::Csv => write_csv_report(rows, output_path),
        ReportFormat::Json => write_json_report(rows, output_path),
    }
}

/// Validate that output path is writable
///
/// **Public** - shared by all writers
pub fn validate_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    // Check if we're trying to overwrite a directory
    if path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}

/// Create the parent directories of `path` if needed
fn ensure_parent_dir(path: &Path) -> Result<(), OutputError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }
    Ok(())
}
