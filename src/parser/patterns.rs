//! Line grammars of the trace log.
//!
//! ```text
//! Call:   "{'>' * depth} {function} in {relative source file}"
//! Return: "{'<' * depth} {function} returned: {value text}"
//! ```
//!
//! The call grammar is always tried first. A function name is one token
//! without whitespace; if it starts with `<` it must also end with `>`
//! (`<lambda>`), so indentation markers are never read as part of a name.
//! The source file runs to the end of the line and may contain spaces.

use once_cell::sync::Lazy;
use regex::Regex;

static CALL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*>*\s*([^\s<>]\S*|<\S*>)\s+in\s+(.+?)\s*$").unwrap()
});
static RETURN_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?:<+\s+)?([^\s<>]\S*|<\S*>)\s+returned:\s*(.*)").unwrap()
});

/// Classification of one physical trace line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceLine<'a> {
    Call {
        function_name: &'a str,
        source_file: &'a str,
    },
    Return {
        function_name: &'a str,
        /// First-line value text, surrounding whitespace removed
        value: &'a str,
    },
    /// Continuation text or noise
    Other,
}

impl TraceLine<'_> {
    /// Whether the line starts a new call or return record
    pub fn is_record(&self) -> bool {
        !matches!(self, TraceLine::Other)
    }
}

/// Classify `line` against the call grammar, then the return grammar
pub fn classify_line(line: &str) -> TraceLine<'_> {
    if let Some(caps) = CALL_PATTERN.captures(line) {
        if let (Some(function), Some(file)) = (caps.get(1), caps.get(2)) {
            return TraceLine::Call {
                function_name: function.as_str(),
                source_file: file.as_str(),
            };
        }
    }

    if let Some(caps) = RETURN_PATTERN.captures(line) {
        if let (Some(function), Some(value)) = (caps.get(1), caps.get(2)) {
            return TraceLine::Return {
                function_name: function.as_str(),
                value: value.as_str().trim(),
            };
        }
    }

    TraceLine::Other
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_call() {
        assert_eq!(
            classify_line("> foo in a/b.py"),
            TraceLine::Call {
                function_name: "foo",
                source_file: "a/b.py"
            }
        );
        assert_eq!(
            classify_line(">>> <lambda> in pkg/util-x.py"),
            TraceLine::Call {
                function_name: "<lambda>",
                source_file: "pkg/util-x.py"
            }
        );
    }

    #[test]
    fn test_classify_return() {
        assert_eq!(
            classify_line("<< foo returned: 42  "),
            TraceLine::Return {
                function_name: "foo",
                value: "42"
            }
        );
        // Depth zero returns have no markers at all
        assert_eq!(
            classify_line(" main returned: None"),
            TraceLine::Return {
                function_name: "main",
                value: "None"
            }
        );
        assert_eq!(
            classify_line("< <genexpr> returned: "),
            TraceLine::Return {
                function_name: "<genexpr>",
                value: ""
            }
        );
    }

    #[test]
    fn test_classify_qualified_names_and_spaced_paths() {
        assert_eq!(
            classify_line("> Foo::bar in my dir/a.py"),
            TraceLine::Call {
                function_name: "Foo::bar",
                source_file: "my dir/a.py"
            }
        );
        assert_eq!(
            classify_line(">> run in docs in progress/x.py \r"),
            TraceLine::Call {
                function_name: "run",
                source_file: "docs in progress/x.py"
            }
        );
        assert_eq!(
            classify_line("< Foo::bar returned: 2"),
            TraceLine::Return {
                function_name: "Foo::bar",
                value: "2"
            }
        );
    }

    #[test]
    fn test_markers_are_not_part_of_names() {
        assert_eq!(
            classify_line(" <lambda> returned: 1"),
            TraceLine::Return {
                function_name: "<lambda>",
                value: "1"
            }
        );
        // A function called `in` still returns rather than calls
        assert_eq!(
            classify_line("< in returned: 5"),
            TraceLine::Return {
                function_name: "in",
                value: "5"
            }
        );
        assert_eq!(
            classify_line("> in in a.py"),
            TraceLine::Call {
                function_name: "in",
                source_file: "a.py"
            }
        );
    }

    #[test]
    fn test_return_value_mentioning_in_is_not_a_call() {
        assert!(matches!(
            classify_line("< lookup returned: 'x' in table"),
            TraceLine::Return { .. }
        ));
    }

    #[test]
    fn test_classify_other() {
        assert_eq!(classify_line("  x=1"), TraceLine::Other);
        assert_eq!(classify_line(""), TraceLine::Other);
        assert!(!classify_line("garbage line").is_record());
    }
}
