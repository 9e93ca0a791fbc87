//! Trace log parser.
//!
//! Reads a gzip-compressed trace log and rebuilds call frequencies and
//! distinct return values in a single pass. A return value whose text starts
//! with the composite-object marker spans several physical lines: every
//! following line that is neither a call nor a return is trimmed and joined
//! to it with `\n`, and the first record line after the block is pushed back
//! onto the cursor.

use super::cursor::LineCursor;
use super::patterns::{classify_line, TraceLine};
use super::schema::TraceAggregates;
use crate::utils::config::COMPOSITE_OBJECT_MARKER;
use crate::utils::error::ReadError;
use flate2::read::MultiGzDecoder;
use log::{debug, info};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Parse a compressed trace log
///
/// **Public** - main entry point for parsing
///
/// # Arguments
/// * `input_path` - gzip-compressed trace log
///
/// # Returns
/// Aggregates for the whole file; nothing partial is returned on failure
///
/// # Errors
/// * `ReadError::NotFound` - no file at `input_path` (soft)
/// * `ReadError::Empty` - zero-byte file (soft)
/// * `ReadError::Corrupt` - unreadable, not gzip, truncated or not UTF-8
pub fn parse_trace_log(input_path: impl AsRef<Path>) -> Result<TraceAggregates, ReadError> {
    let input_path = input_path.as_ref();
    let corrupt = |source| ReadError::Corrupt {
        path: input_path.to_path_buf(),
        source,
    };

    let metadata = match std::fs::metadata(input_path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(ReadError::NotFound(input_path.to_path_buf()));
        }
        Err(e) => return Err(corrupt(e)),
    };

    if metadata.len() == 0 {
        return Err(ReadError::Empty(input_path.to_path_buf()));
    }

    info!("Parsing trace log: {}", input_path.display());

    let file = File::open(input_path).map_err(corrupt)?;
    let decoder = MultiGzDecoder::new(BufReader::new(file));
    let aggregates = parse_trace_lines(BufReader::new(decoder).lines()).map_err(corrupt)?;

    debug!(
        "Parsed {} distinct call keys, {} functions with return values",
        aggregates.call_frequency.len(),
        aggregates.return_values.len()
    );

    Ok(aggregates)
}

/// Parse already-decompressed trace lines
///
/// **Public** - the first read error aborts the whole parse
pub fn parse_trace_lines<I>(lines: I) -> io::Result<TraceAggregates>
where
    I: IntoIterator<Item = io::Result<String>>,
{
    let mut cursor = LineCursor::new(lines.into_iter());
    let mut aggregates = TraceAggregates::new();

    while let Some(line) = cursor.next() {
        let line = line?;

        match classify_line(&line) {
            TraceLine::Call {
                function_name,
                source_file,
            } => aggregates.record_call(source_file, function_name),

            TraceLine::Return {
                function_name,
                value,
            } => {
                let value = if value.starts_with(COMPOSITE_OBJECT_MARKER) {
                    absorb_continuation(&mut cursor, value)?
                } else {
                    value.to_string()
                };
                aggregates.record_return(function_name, value);
            }

            TraceLine::Other => {}
        }
    }

    Ok(aggregates)
}

/// Parse an in-memory trace log
///
/// **Public** - convenience for logs that were never compressed
pub fn parse_trace_text(text: &str) -> TraceAggregates {
    let lines = text.lines().map(|line| Ok(line.to_string()));
    // Infallible: every item is Ok
    parse_trace_lines(lines).unwrap_or_default()
}

/// Join the continuation lines of a multi-line return value
///
/// **Private** - consumes lines until the next record line, which is pushed
/// back, or the end of the stream
fn absorb_continuation<I>(cursor: &mut LineCursor<I>, first: &str) -> io::Result<String>
where
    I: Iterator<Item = io::Result<String>>,
{
    let mut parts = vec![first.to_string()];

    while let Some(next) = cursor.next() {
        let next = next?;
        if classify_line(&next).is_record() {
            cursor.push_back(Ok(next));
            break;
        }
        parts.push(next.trim().to_string());
    }

    Ok(parts.join("\n"))
}
