//! Line-level diff for decoded embedded content.
//!
//! It compares two short sequences of lines, such as a decoded `user_data`
//! script or a heredoc body, so the viewer can show what changed inside a
//! single attribute value. It is not a general file diff.
//!
//! - [`compute_diff`] produces a full edit script of equal/insert/delete lines.
//!   Small inputs get an exact LCS diff. Inputs above [`MAX_LCS_LINES`] keep
//!   their common prefix and suffix and only diff the middle; if the middle is
//!   still too large it is emitted as a block of deletes followed by inserts.
//! - [`context_diff`] collapses long equal runs into a single separator line
//!   and returns `None` when nothing changed.
//!
//! ```
//! use planscope::diff::{compute_diff, context_diff, DiffOp};
//!
//! let diff = compute_diff(&["a", "b", "c"], &["a", "x", "c"]);
//! let ops: Vec<DiffOp> = diff.iter().map(|l| l.op).collect();
//! assert_eq!(ops, [DiffOp::Equal, DiffOp::Delete, DiffOp::Insert, DiffOp::Equal]);
//!
//! assert!(context_diff(&compute_diff(&["same"], &["same"]), 3).is_none());
//! ```

mod context;
mod lines;

pub use context::{context_diff, DEFAULT_CONTEXT_LINES, MAX_CONTEXT_LINES};
pub use lines::{compute_diff, DiffLine, DiffOp, MAX_LCS_LINES};
