//! End-of-window processing.
//!
//! When an execution window closes, its trace buffer is persisted as
//! `<output_dir>/calls.gz` and immediately parsed into
//! `<output_dir>/<test name>-tracing.csv`.

use super::models::{ParseArgs, WindowArgs, WindowOutcome};
use super::parse::execute_parse;
use super::utils::sanitize_test_name;
use crate::output::persist_trace_log;
use crate::recorder::TraceBuffer;
use crate::utils::config::{TRACE_ARTIFACT_NAME, TRACE_REPORT_SUFFIX};
use anyhow::{Context, Result};
use log::{info, warn};

/// Persist and report the trace of one finished window
///
/// **Public** - a persist failure is returned as an outcome, not an error,
/// so the owning run carries on
///
/// # Errors
/// * The written trace log cannot be parsed or the report cannot be written
pub fn finish_window(buffer: TraceBuffer, args: &WindowArgs) -> Result<WindowOutcome> {
    if !args.test_was_run {
        warn!("No test was executed, skipping trace post-processing");
        return Ok(WindowOutcome::NotRun);
    }

    let trace_log = args.output_dir.join(TRACE_ARTIFACT_NAME);

    match persist_trace_log(buffer, &trace_log) {
        Ok(true) => {}
        Ok(false) => {
            info!("No frames recorded for {}", args.test_name);
            return Ok(WindowOutcome::NoTrace);
        }
        Err(e) => {
            warn!("Failed to write trace log {}: {}", trace_log.display(), e);
            return Ok(WindowOutcome::PersistFailed {
                error: e.to_string(),
            });
        }
    }

    let report_name = format!(
        "{}{}.{}",
        sanitize_test_name(&args.test_name),
        TRACE_REPORT_SUFFIX,
        args.format.extension()
    );
    let parse_args = ParseArgs {
        input_file: trace_log.clone(),
        output_file: args.output_dir.join(report_name),
        format: args.format,
    };

    let outcome = execute_parse(&parse_args)
        .with_context(|| format!("Failed to report trace of {}", args.test_name))?;

    Ok(WindowOutcome::Reported { trace_log, outcome })
}
