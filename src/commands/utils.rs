use crate::output::ReportFormat;
use crate::utils::config::TRACE_REPORT_SUFFIX;
use std::path::{Path, PathBuf};

/// Turn a test node id into a file-name-safe name
///
/// Only the part after the last `::` is kept; characters other than ASCII
/// letters, digits, `_` and `-` become `_`.
pub fn sanitize_test_name(test_node: &str) -> String {
    let name = test_node.rsplit("::").next().unwrap_or(test_node);
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Report path for a trace log in a batch: `<dir>/<stem>-tracing.<ext>`
pub fn report_path_for(input: &Path, output_dir: &Path, format: ReportFormat) -> PathBuf {
    let file_name = input
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "trace".to_string());
    let stem = file_name.strip_suffix(".gz").unwrap_or(&file_name);
    let stem = Path::new(stem)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| stem.to_string());

    output_dir.join(format!("{}{}.{}", stem, TRACE_REPORT_SUFFIX, format.extension()))
}

/// Display version information
pub fn display_version() {
    println!("Call Trace Studio v{}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Hierarchical call tracing and trace-log reporting for test runs.");
}
