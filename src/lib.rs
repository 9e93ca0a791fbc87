//! Call Trace Studio
//!
//! Hierarchical call tracing for test runs, and reporting on the
//! resulting trace logs.
//!
//! The pieces, in data-flow order:
//!
//! - [`recorder`] keeps call/return events of the project's own code during
//!   one execution window and renders them as indented lines
//! - [`output::persist_trace_log`] writes those lines as a gzip trace log
//! - [`parser`] rebuilds call frequencies and distinct return values from a
//!   trace log, absorbing multi-line return values
//! - [`aggregator`] and [`output`] turn the aggregates into a sorted report
//!
//! ## Getting Started
//!
//! ```bash
//! call-trace parse --input-file calls.gz --output-file test_x-tracing.csv
//! ```

pub mod aggregator;
pub mod commands;
pub mod output;
pub mod parser;
pub mod recorder;
pub mod utils;
