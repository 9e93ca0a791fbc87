//! Parse command implementation.
//!
//! The parse command:
//! 1. Reads and decompresses the trace log
//! 2. Rebuilds call frequencies and return values
//! 3. Renders the sorted report
//! 4. Writes the report file

use super::models::{ParseArgs, ParseOutcome};
use crate::aggregator::{calculate_call_summary, render_report};
use crate::output::write_report;
use crate::parser::parse_trace_log;
use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::time::Instant;

/// Execute the parse command
///
/// **Public** - main entry point called from main.rs
///
/// # Returns
/// `ParseOutcome::NoData` for a missing, empty or call-free trace log;
/// no report file is created in that case
///
/// # Errors
/// * Corrupt or unreadable trace log
/// * Report write errors
pub fn execute_parse(args: &ParseArgs) -> Result<ParseOutcome> {
    let start_time = Instant::now();

    info!("Processing trace log: {}", args.input_file.display());

    let aggregates = match parse_trace_log(&args.input_file) {
        Ok(aggregates) => aggregates,
        Err(e) if e.is_soft() => {
            warn!("{}", e);
            return Ok(ParseOutcome::NoData {
                reason: e.to_string(),
            });
        }
        Err(e) => {
            return Err(e).context(format!(
                "Failed to parse trace log {}",
                args.input_file.display()
            ));
        }
    };

    if aggregates.is_empty() {
        warn!("No function calls extracted; report not written");
        return Ok(ParseOutcome::NoData {
            reason: "trace log contains no function calls".to_string(),
        });
    }

    let summary = calculate_call_summary(&aggregates);
    info!("Trace summary: {}", summary.summary());

    let rows = render_report(&aggregates);
    debug!("First rows:");
    for row in rows.iter().take(3) {
        debug!("  {} x{}", row.function, row.call_frequency);
    }

    write_report(&rows, &args.output_file, args.format).context("Failed to write tracing report")?;

    info!(
        "✓ Report written to {} in {:.2}s",
        args.output_file.display(),
        start_time.elapsed().as_secs_f64()
    );

    Ok(ParseOutcome::Written {
        path: args.output_file.clone(),
        rows: rows.len(),
    })
}

/// Validate parse arguments
///
/// **Public** - can be called before execute_parse for early validation
pub fn validate_parse_args(args: &ParseArgs) -> Result<()> {
    if args.input_file.as_os_str().is_empty() {
        anyhow::bail!("Input file cannot be empty");
    }

    if args.output_file.as_os_str().is_empty() {
        anyhow::bail!("Output file cannot be empty");
    }

    if args.output_file.is_dir() {
        anyhow::bail!("Output file is a directory: {}", args.output_file.display());
    }

    if args.input_file == args.output_file {
        anyhow::bail!("Output file must differ from the input file");
    }

    Ok(())
}
