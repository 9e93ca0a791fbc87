//! JSON report writer.
//!
//! Writes report rows as a pretty-printed JSON array using the same field
//! names as the CSV header.

use super::{ensure_parent_dir, validate_path};
use crate::aggregator::ReportRow;
use crate::utils::error::OutputError;
use log::{debug, info};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write report rows to a JSON file
///
/// **Public** - alternate rendering of the tracing report
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::SerializationFailed` - JSON serialization error
/// * `OutputError::InvalidPath` - Path cannot be created or is invalid
pub fn write_json_report(rows: &[ReportRow], output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing JSON report to: {}", output_path.display());

    validate_path(output_path)?;
    ensure_parent_dir(output_path)?;

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, rows).map_err(OutputError::SerializationFailed)?;
    writer.flush().map_err(OutputError::WriteFailed)?;

    info!("JSON report written successfully ({} bytes)", calculate_file_size(output_path));

    Ok(())
}

/// Read report rows from a JSON file
///
/// **Public** - useful for validation and testing
pub fn read_json_report(input_path: impl AsRef<Path>) -> Result<Vec<ReportRow>, OutputError> {
    let input_path = input_path.as_ref();

    debug!("Reading JSON report from: {}", input_path.display());

    let file = File::open(input_path).map_err(OutputError::WriteFailed)?;
    let rows: Vec<ReportRow> =
        serde_json::from_reader(file).map_err(OutputError::SerializationFailed)?;

    Ok(rows)
}

/// Calculate file size in bytes
///
/// **Private** - internal utility
fn calculate_file_size(path: &Path) -> u64 {
    std::fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}
