//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while deciding whether a frame belongs to the project
///
/// These never leave the recorder: a frame that fails to resolve is simply
/// not kept.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    #[error("Source path cannot be resolved: {0}")]
    Unresolvable(String),

    #[error("Source path is outside the project root: {}", .0.display())]
    OutsideRoot(PathBuf),

    #[error("Source path cannot be written to a trace line: {}", .0.display())]
    Unrepresentable(PathBuf),
}

/// Errors raised while rendering a return value to text
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("Value rendering failed: {0}")]
    Failed(String),

    #[error("Value rendering panicked")]
    Panicked,
}

/// Errors raised when arming a recorder
#[derive(Error, Debug)]
pub enum RecordError {
    #[error("Invalid project root {path}: {source}")]
    InvalidProjectRoot {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to write CSV report: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}

/// Errors that can occur while reading a trace artifact
#[derive(Error, Debug)]
pub enum ReadError {
    #[error("Trace artifact not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Trace artifact is empty: {}", .0.display())]
    Empty(PathBuf),

    #[error("Trace artifact {} is corrupt: {source}", .path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ReadError {
    /// Missing and empty artifacts mean "no data", not a failure
    pub fn is_soft(&self) -> bool {
        matches!(self, ReadError::NotFound(_) | ReadError::Empty(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_error_softness() {
        assert!(ReadError::NotFound(PathBuf::from("a.gz")).is_soft());
        assert!(ReadError::Empty(PathBuf::from("a.gz")).is_soft());

        let corrupt = ReadError::Corrupt {
            path: PathBuf::from("a.gz"),
            source: std::io::Error::new(std::io::ErrorKind::InvalidData, "bad header"),
        };
        assert!(!corrupt.is_soft());
    }
}
