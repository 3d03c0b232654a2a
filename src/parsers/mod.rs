//! Plan text parsers.
//!
//! Terraform has printed plans in two incompatible layouts over its life:
//!
//! - **Modern** (0.12 and later, and every OpenTofu release): each resource is
//!   announced by a `# <address> will be created` comment followed by a
//!   brace-delimited HCL body.
//! - **Legacy** (0.11 and earlier): each resource is a single line starting
//!   with `+`, `-`, `~`, `-/+` or `+/-`, followed by indented `name: value`
//!   attribute lines.
//!
//! [`parse_plan`] detects the layout, runs the matching parser, and then scans
//! for the `Plan: N to add, ...` summary line. Parsing is total: unrecognized
//! input produces a plan with fewer resources or fewer attributes, never an
//! error.
//!
//! ```
//! use planscope::parsers::parse_plan;
//! use planscope::model::Action;
//!
//! let plan = parse_plan(
//!     "  # aws_instance.web will be created\n  + resource \"aws_instance\" \"web\" {\n      + ami = \"ami-123\"\n    }\n\nPlan: 1 to add, 0 to change, 0 to destroy.\n",
//! );
//! assert_eq!(plan.resources.len(), 1);
//! assert_eq!(plan.resources[0].action, Action::Create);
//! assert_eq!(plan.total_add, 1);
//! ```

mod detection;
mod legacy;
mod modern;
mod summary;

pub use detection::{detect_format, PlanFormat};
pub use legacy::LegacyParser;
pub use modern::{action_from_header, ModernParser};
pub use summary::{parse_summary, PlanSummary};

use crate::model::{Plan, Resource};
use regex::Regex;
use std::sync::LazyLock;

/// A parser for one plan layout.
pub trait PlanParser {
    /// Extract resources, in plan order, from pre-split lines.
    fn parse_resources(&self, lines: &[&str]) -> Vec<Resource>;

    /// Human-readable layout name, used in logs.
    fn name(&self) -> &'static str;
}

static ANSI_ESCAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1b\[[0-9;?]*[A-Za-z]").expect("static regex"));

/// Parse plan text into a [`Plan`].
#[must_use]
pub fn parse_plan(input: &str) -> Plan {
    let cleaned = strip_ansi(input);
    let lines: Vec<&str> = cleaned.lines().collect();

    let format = detect_format(&lines);
    let resources = match format {
        PlanFormat::Modern => ModernParser.parse_resources(&lines),
        PlanFormat::Legacy => LegacyParser.parse_resources(&lines),
    };
    tracing::debug!(
        format = format.name(),
        resources = resources.len(),
        "parsed plan"
    );

    let summary = parse_summary(&lines).unwrap_or_default();
    Plan {
        resources,
        summary: summary.line,
        total_add: summary.add,
        total_change: summary.change,
        total_destroy: summary.destroy,
    }
}

/// Remove terminal color sequences so colored plan output parses the same as
/// `-no-color` output.
#[must_use]
pub fn strip_ansi(input: &str) -> std::borrow::Cow<'_, str> {
    ANSI_ESCAPE.replace_all(input, "")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Action;

    #[test]
    fn test_empty_input() {
        let plan = parse_plan("");
        assert!(plan.resources.is_empty());
        assert!(!plan.has_summary());
        assert_eq!(plan.total_add, 0);
    }

    #[test]
    fn test_colored_input_parses() {
        let input = "\x1b[1m  # aws_instance.web\x1b[0m will be \x1b[1m\x1b[31mdestroyed\x1b[0m\n  \x1b[31m-\x1b[0m resource \"aws_instance\" \"web\" {\n    }\n";
        let plan = parse_plan(input);
        assert_eq!(plan.resources.len(), 1);
        assert_eq!(plan.resources[0].address, "aws_instance.web");
        assert_eq!(plan.resources[0].action, Action::Destroy);
    }

    #[test]
    fn test_crlf_input() {
        let input = "  # aws_instance.web will be created\r\n  + resource \"aws_instance\" \"web\" {\r\n      + ami = \"x\"\r\n    }\r\n";
        let plan = parse_plan(input);
        assert_eq!(plan.resources.len(), 1);
        assert_eq!(plan.resources[0].attributes[1].name, "ami");
    }
}
