//! **A terminal viewer for Terraform and OpenTofu plans.**
//!
//! `planscope` reads the human-readable output of `terraform plan` or
//! `tofu plan`, in either the modern (`# addr will be created`) or the legacy
//! (`+ addr`) report format, and turns it into a structured [`Plan`]. The
//! plan can then be browsed in a full-screen viewer with filtering, sorting,
//! fuzzy search and decoded, diffed views of embedded content such as
//! base64 or gzip encoded `user_data`.
//!
//! ## Key Features
//!
//! - **Dual-format parsing**: format detection, ANSI stripping and a total
//!   parser that never fails on malformed input.
//! - **Content decoding**: base64, gzip and hex values are decoded for
//!   display, failing closed when the result is not readable text.
//! - **Line diffing**: an LCS diff with common prefix/suffix trimming and a
//!   context view that collapses unchanged runs.
//! - **Interactive viewer**: a terminal-independent state machine driven by
//!   [`tui::ViewerEvent`]s, rendered with `ratatui`.
//! - **Collaborators**: plain-text output, a history of captured runs, a
//!   release check and a runner for the provisioning tool.
//!
//! ## Core Modules
//!
//! - **[`model`]**: [`Plan`], [`Resource`], [`Attribute`] and [`Action`].
//! - **[`parsers`]**: [`parse_plan`] and the per-format parsers.
//! - **[`decode`]**: [`try_decode`].
//! - **[`diff`]**: [`compute_diff`] and [`context_diff`].
//! - **[`tui`]**: the viewer state machine and terminal front end.
//! - **[`reports`]**: non-interactive output via [`render_plan`].
//!
//! ## Getting Started
//!
//! ```
//! use planscope::{parse_plan, Action};
//!
//! let report = "\
//!   ## aws_s3_bucket.logs will be created
//!   + resource \"aws_s3_bucket\" \"logs\" {
//!       + bucket = \"logs\"
//!     }
//!
//! Plan: 1 to add, 0 to change, 0 to destroy.
//! ";
//!
//! let plan = parse_plan(report);
//! assert_eq!(plan.resources.len(), 1);
//! assert_eq!(plan.resources[0].action, Action::Create);
//! assert_eq!(plan.total_add, 1);
//! ```
//!
//! ### Diffing Decoded Content
//!
//! ```
//! use planscope::{compute_diff, diff::DiffOp};
//!
//! let old = ["a", "b", "c"];
//! let new = ["a", "x", "c"];
//! let ops: Vec<DiffOp> = compute_diff(&old, &new).iter().map(|l| l.op).collect();
//! assert_eq!(ops, [DiffOp::Equal, DiffOp::Delete, DiffOp::Insert, DiffOp::Equal]);
//! ```
//!
//! ## Feature Flags
//!
//! - `update-check` (default): background check for a newer release. Adds
//!   `reqwest` as a dependency.

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
// Pedantic lints: allow categories that are design choices for this codebase
#![allow(
    // Cast safety: usize and u16 conversions are pervasive in layout math,
    // and every value is bounded by the terminal size
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_possible_wrap,
    // Doc completeness: # Errors / # Panics sections are not required here
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    // Render and dispatch functions read better as one match
    clippy::too_many_lines,
    // Config and state structs carry several independent toggles
    clippy::struct_excessive_bools,
    clippy::fn_params_excessive_bools,
    // self is kept for API consistency across the impl-split viewer files
    clippy::unused_self,
    // Variable names like `old`/`new` are clear in context
    clippy::similar_names
)]

pub mod config;
pub mod decode;
pub mod diff;
pub mod error;
pub mod history;
pub mod model;
pub mod parsers;
pub mod reports;
pub mod runner;
pub mod tui;
pub mod update;
pub mod utils;

// Re-export main types for convenience
pub use config::{AppConfig, ConfigError, Validatable};
pub use decode::try_decode;
pub use diff::{compute_diff, context_diff, DiffLine, DiffOp};
pub use error::{ErrorContext, OptionContext, PlanscopeError, Result};
pub use history::{HistoryCommand, HistoryEntry, HistoryStatus, HistoryStore};
pub use model::{Action, Attribute, Plan, Resource};
pub use parsers::{parse_plan, strip_ansi, PlanParser};
pub use reports::{render_plan, PrintReporter};
pub use runner::Tool;
pub use tui::{Effect, Mode, Theme, ThemeChoice, ViewerApp, ViewerEvent, ViewerOptions};
