//! `Plan: N to add, M to change, K to destroy` extraction.

use regex::Regex;
use std::sync::LazyLock;

static SUMMARY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Plan:\s*(\d+)\s*to add,\s*(\d+)\s*to change,\s*(\d+)\s*to destroy")
        .expect("static regex")
});

/// Totals from the summary line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlanSummary {
    /// The matching line, verbatim
    pub line: String,
    pub add: usize,
    pub change: usize,
    pub destroy: usize,
}

/// Find the first summary line. Returns `None` when the report has none.
#[must_use]
pub fn parse_summary(lines: &[&str]) -> Option<PlanSummary> {
    lines.iter().find_map(|line| {
        let caps = SUMMARY.captures(line)?;
        let count = |i: usize| {
            caps.get(i)
                .and_then(|m| m.as_str().parse::<usize>().ok())
                .unwrap_or(0)
        };
        Some(PlanSummary {
            line: (*line).to_string(),
            add: count(1),
            change: count(2),
            destroy: count(3),
        })
    })
}
