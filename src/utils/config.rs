//! Configuration and constants for tracing and reporting.

/// Maximum number of characters kept from a rendered return value
pub const MAX_RETURN_REPR_LEN: usize = 150;

/// Appended to a return value that was cut at `MAX_RETURN_REPR_LEN`
pub const TRUNCATION_SUFFIX: &str = "...";

/// Substituted when a return value cannot be rendered
pub const UNREPRESENTABLE_PLACEHOLDER: &str = "[Unrepresentable object]";

// A return value starting with this marker was rendered over several lines;
// the parser keeps absorbing lines until the next call/return line.
pub const COMPOSITE_OBJECT_MARKER: &str = "Class <";

/// Separator between source file and function name in a call key
pub const CALL_KEY_SEPARATOR: &str = "::";

/// Separator between distinct return values in a report cell
pub const RETURN_VALUE_SEPARATOR: &str = " | ";

/// Report column names, in order
pub const REPORT_HEADER: [&str; 3] = ["Function", "Call_Frequency", "Unique_Return_Values"];

/// File name of the trace artifact written at the end of a window
pub const TRACE_ARTIFACT_NAME: &str = "calls.gz";

/// Suffix appended to a test or artifact name to form the report file name
pub const TRACE_REPORT_SUFFIX: &str = "-tracing";

// Indentation markers for call and return lines
pub const CALL_INDENT: char = '>';
pub const RETURN_INDENT: char = '<';
