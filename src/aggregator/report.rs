//! Build report rows from trace aggregates.

use crate::parser::schema::TraceAggregates;
use crate::utils::config::RETURN_VALUE_SEPARATOR;
use log::debug;
use serde::{Deserialize, Serialize};

/// One row of the tracing report
///
/// **Public** - serialized as `Function, Call_Frequency, Unique_Return_Values`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    /// Call key (`source_file::function_name`)
    #[serde(rename = "Function")]
    pub function: String,

    /// Number of recorded calls
    #[serde(rename = "Call_Frequency")]
    pub call_frequency: u64,

    /// Sorted distinct return values joined with `" | "`
    #[serde(rename = "Unique_Return_Values")]
    pub unique_return_values: String,
}

/// Render aggregates into report rows
///
/// **Public** - main entry point for report building
///
/// # Returns
/// One row per call key, sorted by key
///
/// Return values are looked up by function name only, because return lines
/// carry no source file. Same-named functions from different files therefore
/// show the same return-value column.
pub fn render_report(aggregates: &TraceAggregates) -> Vec<ReportRow> {
    let mut keys: Vec<_> = aggregates.call_frequency.iter().collect();
    keys.sort_by(|a, b| a.0.cmp(b.0));

    let rows: Vec<ReportRow> = keys
        .into_iter()
        .map(|(key, count)| ReportRow {
            function: key.to_string(),
            call_frequency: *count,
            unique_return_values: aggregates
                .sorted_returns(key.function_name())
                .join(RETURN_VALUE_SEPARATOR),
        })
        .collect();

    debug!("Rendered {} report rows", rows.len());

    rows
}
