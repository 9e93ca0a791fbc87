//! Trace log writer.
//!
//! Persists a window's trace buffer as gzip-compressed UTF-8 text, one
//! event per line.

use super::{ensure_parent_dir, validate_path};
use crate::recorder::TraceBuffer;
use crate::utils::error::OutputError;
use flate2::write::GzEncoder;
use flate2::Compression;
use log::{debug, info};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write a trace buffer to a compressed trace log
///
/// **Public** - main entry point for trace persistence
///
/// # Arguments
/// * `buffer` - Lines recorded during one window
/// * `output_path` - Destination `.gz` file
///
/// # Returns
/// `true` if a file was written, `false` for an empty buffer (no file is created)
///
/// # Errors
/// * `OutputError::InvalidPath` - Path is empty, a directory, or its parent cannot be created
/// * `OutputError::WriteFailed` - I/O error while writing or compressing
pub fn persist_trace_log(
    buffer: TraceBuffer,
    output_path: impl AsRef<Path>,
) -> Result<bool, OutputError> {
    let output_path = output_path.as_ref();

    if buffer.is_empty() {
        debug!("Trace buffer is empty, nothing written to {}", output_path.display());
        return Ok(false);
    }

    info!("Writing trace log to: {}", output_path.display());

    validate_path(output_path)?;
    ensure_parent_dir(output_path)?;

    let file = File::create(output_path)?;
    let mut encoder = GzEncoder::new(BufWriter::new(file), Compression::default());

    let line_count = buffer.len();
    for line in buffer.into_lines() {
        encoder.write_all(line.as_bytes())?;
    }

    let mut writer = encoder.finish()?;
    writer.flush()?;

    info!("Trace log written successfully ({} lines)", line_count);

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::GzDecoder;
    use std::io::Read;

    #[test]
    fn test_empty_buffer_creates_no_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("calls.gz");

        let written = persist_trace_log(TraceBuffer::new(), &path).unwrap();

        assert!(!written);
        assert!(!path.exists());
    }

    #[test]
    fn test_writes_gzip_lines() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("nested/run-0/calls.gz");
        let buffer = TraceBuffer::from(vec![
            "> f in a.py\n".to_string(),
            " f returned: 'é'\n".to_string(),
        ]);

        assert!(persist_trace_log(buffer, &path).unwrap());

        let mut text = String::new();
        GzDecoder::new(File::open(&path).unwrap())
            .read_to_string(&mut text)
            .unwrap();
        assert_eq!(text, "> f in a.py\n f returned: 'é'\n");
    }

    #[test]
    fn test_directory_destination_fails() {
        let temp_dir = tempfile::tempdir().unwrap();
        let buffer = TraceBuffer::from(vec!["> f in a.py\n".to_string()]);

        let result = persist_trace_log(buffer, temp_dir.path());
        assert!(matches!(result, Err(OutputError::InvalidPath(_))));
    }
}
