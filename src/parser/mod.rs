//! Trace log parsing.
//!
//! This module handles:
//! - Decompressing trace log artifacts
//! - Classifying call, return and continuation lines
//! - Rebuilding call frequencies and distinct return values

pub mod cursor;
pub mod patterns;
pub mod schema;
pub mod trace_log;

// Re-export main types
pub use cursor::LineCursor;
pub use patterns::{classify_line, TraceLine};
pub use schema::{CallKey, TraceAggregates};
pub use trace_log::{parse_trace_lines, parse_trace_log, parse_trace_text};
