//! Aggregates reconstructed from a trace log.

use crate::utils::config::CALL_KEY_SEPARATOR;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// File-qualified function identity: `source_file::function_name`
///
/// Two files defining a same-named function give two distinct keys. The
/// recorder never writes a source file containing the separator, so the
/// function name is everything after the first one (`a.py::Foo::bar`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CallKey(String);

impl CallKey {
    pub fn new(source_file: &str, function_name: &str) -> Self {
        Self(format!("{}{}{}", source_file, CALL_KEY_SEPARATOR, function_name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Function-name portion of the key (text after the first separator)
    pub fn function_name(&self) -> &str {
        self.0
            .split_once(CALL_KEY_SEPARATOR)
            .map(|(_, function)| function)
            .unwrap_or(&self.0)
    }
}

impl fmt::Display for CallKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Call frequencies and distinct return values of one trace log
///
/// Set members have no defined order here; ordering is applied when the
/// report is rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TraceAggregates {
    /// Number of call lines per call key
    pub call_frequency: HashMap<CallKey, u64>,

    /// Distinct return-value texts per function name
    pub return_values: HashMap<String, HashSet<String>>,
}

impl TraceAggregates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one call of `function_name` defined in `source_file`
    pub fn record_call(&mut self, source_file: &str, function_name: &str) {
        *self
            .call_frequency
            .entry(CallKey::new(source_file, function_name))
            .or_insert(0) += 1;
    }

    /// Add a return value to the function's bucket (duplicates collapse)
    pub fn record_return(&mut self, function_name: &str, value: String) {
        self.return_values
            .entry(function_name.to_string())
            .or_default()
            .insert(value);
    }

    /// A trace without any call line carries no reportable data
    pub fn is_empty(&self) -> bool {
        self.call_frequency.is_empty()
    }

    /// Sum of all call frequencies
    pub fn total_calls(&self) -> u64 {
        self.call_frequency.values().sum()
    }

    /// Distinct return values of `function_name`, sorted
    pub fn sorted_returns(&self, function_name: &str) -> Vec<&str> {
        let mut values: Vec<&str> = self
            .return_values
            .get(function_name)
            .map(|set| set.iter().map(String::as_str).collect())
            .unwrap_or_default();
        values.sort_unstable();
        values
    }
}
