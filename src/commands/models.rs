use crate::output::ReportFormat;
use std::path::PathBuf;

/// Arguments for the parse command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct ParseArgs {
    /// Compressed trace log to read
    pub input_file: PathBuf,

    /// Report file to write
    pub output_file: PathBuf,

    /// Report format
    pub format: ReportFormat,
}

impl Default for ParseArgs {
    fn default() -> Self {
        Self {
            input_file: PathBuf::from("calls.gz"),
            output_file: PathBuf::from("tracing.csv"),
            format: ReportFormat::Csv,
        }
    }
}

/// Arguments for the batch command
#[derive(Debug, Clone, Default)]
pub struct BatchArgs {
    /// Compressed trace logs, parsed independently
    pub inputs: Vec<PathBuf>,

    /// Directory receiving one report per input
    pub output_dir: PathBuf,

    pub format: ReportFormat,
}

/// Arguments for finishing an execution window
#[derive(Debug, Clone)]
pub struct WindowArgs {
    /// Directory of this run's artifacts
    pub output_dir: PathBuf,

    /// Test node id or name; sanitized before use in file names
    pub test_name: String,

    /// Whether the test body actually ran during the window
    pub test_was_run: bool,

    pub format: ReportFormat,
}

/// Result of parsing one trace log
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    /// A report was written
    Written { path: PathBuf, rows: usize },

    /// The trace held nothing to report; no file was written
    NoData { reason: String },
}

/// Result of a batch run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Reports written
    pub written: Vec<PathBuf>,

    /// Inputs without data
    pub no_data: Vec<PathBuf>,

    /// Inputs that failed hard
    pub failed: Vec<PathBuf>,
}

impl BatchSummary {
    pub fn total(&self) -> usize {
        self.written.len() + self.no_data.len() + self.failed.len()
    }

    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }
}

/// Result of finishing an execution window
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WindowOutcome {
    /// No test ran; post-processing skipped
    NotRun,

    /// Nothing was recorded; no trace log written
    NoTrace,

    /// The trace log could not be written
    PersistFailed { error: String },

    /// The trace log was written and parsed
    Reported {
        trace_log: PathBuf,
        outcome: ParseOutcome,
    },
}
