//! Batch command implementation.
//!
//! Parses several trace logs independently; a failure on one input is
//! logged and does not stop the others.

use super::models::{BatchArgs, BatchSummary, ParseArgs, ParseOutcome};
use super::parse::execute_parse;
use super::utils::report_path_for;
use anyhow::Result;
use log::{error, info};

/// Execute the batch command
///
/// **Public** - main entry point called from main.rs
///
/// # Returns
/// Per-input outcomes; the caller decides how failures affect the exit code
pub fn execute_batch(args: &BatchArgs) -> Result<BatchSummary> {
    if args.inputs.is_empty() {
        anyhow::bail!("No trace logs given");
    }

    let mut summary = BatchSummary::default();

    for (index, input) in args.inputs.iter().enumerate() {
        info!("[{}/{}] {}", index + 1, args.inputs.len(), input.display());

        let parse_args = ParseArgs {
            input_file: input.clone(),
            output_file: report_path_for(input, &args.output_dir, args.format),
            format: args.format,
        };

        match execute_parse(&parse_args) {
            Ok(ParseOutcome::Written { path, .. }) => summary.written.push(path),
            Ok(ParseOutcome::NoData { .. }) => summary.no_data.push(input.clone()),
            Err(e) => {
                error!("{:#}", e);
                summary.failed.push(input.clone());
            }
        }
    }

    info!(
        "Batch finished: {} written, {} without data, {} failed",
        summary.written.len(),
        summary.no_data.len(),
        summary.failed.len()
    );

    Ok(summary)
}
