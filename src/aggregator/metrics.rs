//! Summary statistics over trace aggregates.
//!
//! Used for logging at the end of a parse; the report itself does not
//! include them.

use crate::parser::schema::TraceAggregates;

/// Call statistics of one trace log
///
/// **Public** - returned from calculate_call_summary
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallSummary {
    /// Number of distinct call keys
    pub distinct_keys: usize,

    /// Sum of all call frequencies
    pub total_calls: u64,

    /// Functions with at least one recorded return value
    pub functions_with_returns: usize,

    /// Most frequently called key and its count
    pub busiest: Option<(String, u64)>,
}

impl CallSummary {
    /// Get human-readable summary
    ///
    /// **Public** - for logging and debugging
    pub fn summary(&self) -> String {
        let busiest = match &self.busiest {
            Some((key, count)) => format!("{} ({} calls)", key, count),
            None => "-".to_string(),
        };
        format!(
            "Keys: {} | Calls: {} | Functions with returns: {} | Busiest: {}",
            self.distinct_keys, self.total_calls, self.functions_with_returns, busiest
        )
    }
}

/// Calculate call statistics
///
/// **Public** - ties on the busiest key resolve to the smallest key
pub fn calculate_call_summary(aggregates: &TraceAggregates) -> CallSummary {
    let busiest = aggregates
        .call_frequency
        .iter()
        .max_by(|a, b| a.1.cmp(b.1).then_with(|| b.0.cmp(a.0)))
        .map(|(key, count)| (key.to_string(), *count));

    CallSummary {
        distinct_keys: aggregates.call_frequency.len(),
        total_calls: aggregates.total_calls(),
        functions_with_returns: aggregates.return_values.len(),
        busiest,
    }
}
