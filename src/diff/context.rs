//! Context collapsing for display.

use super::{DiffLine, DiffOp};

/// Lines of context kept on each side of a change unless configured otherwise.
pub const DEFAULT_CONTEXT_LINES: usize = 3;

/// Largest context the viewer will use; larger configured values are clamped.
pub const MAX_CONTEXT_LINES: usize = 50;

/// Marker text carried by separator lines.
const SEPARATOR_TEXT: &str = "@@";

/// Keep only the lines within `context` of a change.
///
/// Each run of dropped equal lines that is followed by a kept line becomes a
/// single [`DiffOp::Separator`]. Returns `None` when the diff has no inserts
/// or deletes.
#[must_use]
pub fn context_diff(diff: &[DiffLine], context: usize) -> Option<Vec<DiffLine>> {
    if !diff.iter().any(DiffLine::is_change) {
        return None;
    }

    let mut keep = vec![false; diff.len()];
    for (i, line) in diff.iter().enumerate() {
        if line.is_change() {
            let lo = i.saturating_sub(context);
            let hi = i.saturating_add(context).min(diff.len() - 1);
            keep[lo..=hi].iter_mut().for_each(|k| *k = true);
        }
    }

    let mut result = Vec::new();
    let mut in_gap = false;
    for (line, kept) in diff.iter().zip(&keep) {
        if *kept {
            if in_gap {
                result.push(DiffLine::new(DiffOp::Separator, SEPARATOR_TEXT));
                in_gap = false;
            }
            result.push(line.clone());
        } else {
            in_gap = true;
        }
    }
    Some(result)
}
