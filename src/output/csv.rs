//! CSV report writer.

use super::{ensure_parent_dir, validate_path};
use crate::aggregator::ReportRow;
use crate::utils::config::REPORT_HEADER;
use crate::utils::error::OutputError;
use log::{debug, info};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Write report rows as CSV
///
/// **Public** - the header is always written, values containing newlines
/// or commas are quoted
///
/// # Errors
/// * `OutputError::InvalidPath` - Path is invalid
/// * `OutputError::Csv` - Serialization or I/O error from the CSV writer
pub fn write_csv_report(rows: &[ReportRow], output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing CSV report to: {}", output_path.display());

    validate_path(output_path)?;
    ensure_parent_dir(output_path)?;

    let file = File::create(output_path)?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(BufWriter::new(file));

    writer.write_record(REPORT_HEADER)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    info!("CSV report written successfully ({} rows)", rows.len());

    Ok(())
}

/// Read report rows back from a CSV file
///
/// **Public** - useful for validation and testing
pub fn read_csv_report(input_path: impl AsRef<Path>) -> Result<Vec<ReportRow>, OutputError> {
    let input_path = input_path.as_ref();

    debug!("Reading CSV report from: {}", input_path.display());

    let mut reader = csv::Reader::from_path(input_path)?;
    let rows = reader.deserialize().collect::<Result<Vec<ReportRow>, _>>()?;

    Ok(rows)
}
