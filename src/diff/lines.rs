//! LCS line diff with a prefix/suffix guard for large inputs.

use serde::{Deserialize, Serialize};

/// Combined line count above which the exact LCS table is not built for the
/// whole input.
pub const MAX_LCS_LINES: usize = 800;

/// Operation tag of a diff line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiffOp {
    Equal,
    /// Present only in the new text
    Insert,
    /// Present only in the old text
    Delete,
    /// Stands in for a collapsed run of equal lines
    Separator,
}

/// One line of diff output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffLine {
    pub op: DiffOp,
    pub text: String,
}

impl DiffLine {
    pub fn new(op: DiffOp, text: impl Into<String>) -> Self {
        Self {
            op,
            text: text.into(),
        }
    }

    #[must_use]
    pub fn is_change(&self) -> bool {
        matches!(self.op, DiffOp::Insert | DiffOp::Delete)
    }
}

/// Diff two line sequences.
///
/// Ties between equally long solutions favor emitting the insert first
/// during backtracking, which after reversal puts deletes ahead of inserts
/// for a replaced line. Output is deterministic for a given input.
#[must_use]
pub fn compute_diff<S: AsRef<str>>(old: &[S], new: &[S]) -> Vec<DiffLine> {
    if old.len() + new.len() > MAX_LCS_LINES {
        return diff_large(old, new);
    }
    lcs_diff(old, new)
}

fn lcs_diff<S: AsRef<str>>(old: &[S], new: &[S]) -> Vec<DiffLine> {
    let m = old.len();
    let n = new.len();
    let width = n + 1;

    // table[i * width + j] = LCS length of old[..i] and new[..j]
    let mut table = vec![0u32; (m + 1) * width];
    for i in 1..=m {
        for j in 1..=n {
            table[i * width + j] = if old[i - 1].as_ref() == new[j - 1].as_ref() {
                table[(i - 1) * width + (j - 1)] + 1
            } else {
                let up = table[(i - 1) * width + j];
                let left = table[i * width + (j - 1)];
                up.max(left)
            };
        }
    }

    let mut result = Vec::with_capacity(m.max(n));
    let (mut i, mut j) = (m, n);
    while i > 0 || j > 0 {
        if i > 0 && j > 0 && old[i - 1].as_ref() == new[j - 1].as_ref() {
            result.push(DiffLine::new(DiffOp::Equal, old[i - 1].as_ref()));
            i -= 1;
            j -= 1;
        } else if j > 0 && (i == 0 || table[i * width + (j - 1)] >= table[(i - 1) * width + j]) {
            result.push(DiffLine::new(DiffOp::Insert, new[j - 1].as_ref()));
            j -= 1;
        } else {
            result.push(DiffLine::new(DiffOp::Delete, old[i - 1].as_ref()));
            i -= 1;
        }
    }
    result.reverse();
    result
}

fn diff_large<S: AsRef<str>>(old: &[S], new: &[S]) -> Vec<DiffLine> {
    let m = old.len();
    let n = new.len();
    let limit = m.min(n);

    let prefix = old
        .iter()
        .zip(new)
        .take_while(|(a, b)| a.as_ref() == b.as_ref())
        .count();

    let mut suffix = 0;
    while suffix < limit - prefix && old[m - 1 - suffix].as_ref() == new[n - 1 - suffix].as_ref() {
        suffix += 1;
    }

    let old_core = &old[prefix..m - suffix];
    let new_core = &new[prefix..n - suffix];
    tracing::debug!(
        prefix,
        suffix,
        core = old_core.len() + new_core.len(),
        "large diff input"
    );

    let mut result = Vec::with_capacity(m + n);
    result.extend(
        old[..prefix]
            .iter()
            .map(|l| DiffLine::new(DiffOp::Equal, l.as_ref())),
    );

    if old_core.len() + new_core.len() <= MAX_LCS_LINES {
        result.extend(lcs_diff(old_core, new_core));
    } else {
        result.extend(
            old_core
                .iter()
                .map(|l| DiffLine::new(DiffOp::Delete, l.as_ref())),
        );
        result.extend(
            new_core
                .iter()
                .map(|l| DiffLine::new(DiffOp::Insert, l.as_ref())),
        );
    }

    result.extend(
        old[m - suffix..]
            .iter()
            .map(|l| DiffLine::new(DiffOp::Equal, l.as_ref())),
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ops(diff: &[DiffLine]) -> Vec<DiffOp> {
        diff.iter().map(|l| l.op).collect()
    }

    #[test]
    fn test_identical_is_all_equal() {
        let lines = ["one", "two", "three"];
        let diff = compute_diff(&lines, &lines);
        assert_eq!(diff.len(), 3);
        assert!(diff.iter().all(|l| l.op == DiffOp::Equal));
    }

    #[test]
    fn test_single_replacement() {
        let diff = compute_diff(&["a", "b", "c"], &["a", "x", "c"]);
        assert_eq!(
            diff,
            vec![
                DiffLine::new(DiffOp::Equal, "a"),
                DiffLine::new(DiffOp::Delete, "b"),
                DiffLine::new(DiffOp::Insert, "x"),
                DiffLine::new(DiffOp::Equal, "c"),
            ]
        );
    }

    #[test]
    fn test_empty_sides() {
        let empty: [&str; 0] = [];
        assert!(compute_diff(&empty, &empty).is_empty());
        assert_eq!(ops(&compute_diff(&empty, &["a", "b"])), [DiffOp::Insert; 2]);
        assert_eq!(ops(&compute_diff(&["a", "b"], &empty)), [DiffOp::Delete; 2]);
    }

    #[test]
    fn test_pure_insert_in_middle() {
        let diff = compute_diff(&["a", "c"], &["a", "b", "c"]);
        assert_eq!(ops(&diff), [DiffOp::Equal, DiffOp::Insert, DiffOp::Equal]);
        assert_eq!(diff[1].text, "b");
    }

    #[test]
    fn test_tie_break_is_stable() {
        // Two equally long LCS solutions; output must not vary between runs.
        let first = compute_diff(&["a", "b"], &["b", "a"]);
        let second = compute_diff(&["a", "b"], &["b", "a"]);
        assert_eq!(first, second);
        assert_eq!(ops(&first), [DiffOp::Delete, DiffOp::Equal, DiffOp::Insert]);
    }

    #[test]
    fn test_large_input_keeps_prefix_and_suffix() {
        let mut old: Vec<String> = (0..500).map(|i| format!("line {i}")).collect();
        let mut new = old.clone();
        old[250] = "old middle".to_string();
        new[250] = "new middle".to_string();
        new.insert(251, "extra".to_string());

        let diff = compute_diff(&old, &new);
        assert!(diff[..250].iter().all(|l| l.op == DiffOp::Equal));
        assert_eq!(diff[250], DiffLine::new(DiffOp::Delete, "old middle"));
        assert_eq!(diff[251], DiffLine::new(DiffOp::Insert, "new middle"));
        assert_eq!(diff[252], DiffLine::new(DiffOp::Insert, "extra"));
        assert_eq!(diff.len(), 502);
        for (k, line) in diff[253..].iter().enumerate() {
            assert_eq!(line.op, DiffOp::Equal);
            assert_eq!(line.text, format!("line {}", 251 + k));
        }
    }

    #[test]
    fn test_large_core_falls_back_to_block() {
        let old: Vec<String> = (0..500).map(|i| format!("old {i}")).collect();
        let new: Vec<String> = (0..500).map(|i| format!("new {i}")).collect();
        let diff = compute_diff(&old, &new);
        assert_eq!(diff.len(), 1000);
        assert!(diff[..500].iter().all(|l| l.op == DiffOp::Delete));
        assert!(diff[500..].iter().all(|l| l.op == DiffOp::Insert));
        assert_eq!(diff[0].text, "old 0");
        assert_eq!(diff[500].text, "new 0");
    }
}
