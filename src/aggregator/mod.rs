//! Aggregation of parsed trace data into report rows and statistics.
//!
//! This module transforms trace aggregates into:
//! - Sorted report rows (one per call key)
//! - Call summary statistics

pub mod metrics;
pub mod report;

// Re-export main types and functions
pub use metrics::{calculate_call_summary, CallSummary};
pub use report::{render_report, ReportRow};
