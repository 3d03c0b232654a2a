//! Non-interactive plan output.
//!
//! Used by `--print` and whenever stdout is not a terminal. One block per
//! resource: a colored header followed by its body lines as they appeared in
//! the report.

use crate::model::{Action, Plan, Resource};
use std::io::IsTerminal;

/// Apply ANSI color formatting if colored output is enabled.
fn ansi_color(text: &str, color: &str, colored: bool) -> String {
    if colored {
        match color {
            "red" => format!("\x1b[31m{text}\x1b[0m"),
            "green" => format!("\x1b[32m{text}\x1b[0m"),
            "yellow" => format!("\x1b[33m{text}\x1b[0m"),
            "magenta" => format!("\x1b[35m{text}\x1b[0m"),
            "cyan" => format!("\x1b[36m{text}\x1b[0m"),
            "bold" => format!("\x1b[1m{text}\x1b[0m"),
            "dim" => format!("\x1b[2m{text}\x1b[0m"),
            _ => text.to_string(),
        }
    } else {
        text.to_string()
    }
}

const fn action_color(action: Action) -> &'static str {
    match action {
        Action::Create => "green",
        Action::Destroy => "red",
        Action::Update => "yellow",
        Action::Replace | Action::DeleteCreate | Action::CreateDelete => "magenta",
        Action::Read => "cyan",
        Action::NoOp => "dim",
    }
}

/// Decide whether to emit color: not disabled by flag or `NO_COLOR`, and
/// stdout is a terminal.
#[must_use]
pub fn should_use_color(no_color_flag: bool) -> bool {
    if no_color_flag {
        return false;
    }
    if std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty()) {
        return false;
    }
    std::io::stdout().is_terminal()
}

/// Plain-text plan renderer.
pub struct PrintReporter {
    /// Use colored output
    colored: bool,
}

impl PrintReporter {
    #[must_use]
    pub const fn new() -> Self {
        Self { colored: true }
    }

    /// Disable colored output
    #[must_use]
    pub const fn no_color(mut self) -> Self {
        self.colored = false;
        self
    }

    fn color(&self, text: &str, color: &str) -> String {
        ansi_color(text, color, self.colored)
    }

    #[must_use]
    pub fn render(&self, plan: &Plan) -> String {
        let mut lines = Vec::new();

        lines.push(self.color("planscope: Terraform plan", "bold"));
        lines.push(String::new());

        if plan.has_summary() {
            lines.push(format!(
                "Plan: {} to add, {} to change, {} to destroy",
                self.color(&plan.total_add.to_string(), "green"),
                self.color(&plan.total_change.to_string(), "yellow"),
                self.color(&plan.total_destroy.to_string(), "red"),
            ));
        } else {
            lines.push(plan.headline());
        }
        lines.push(String::new());

        for resource in &plan.resources {
            self.render_resource(resource, &mut lines);
            lines.push(String::new());
        }

        let mut out = lines.join("\n");
        out.push('\n');
        out
    }

    fn render_resource(&self, resource: &Resource, lines: &mut Vec<String>) {
        let color = action_color(resource.action);
        lines.push(format!(
            "{} {} {}",
            self.color(resource.action.glyph(), color),
            self.color(&resource.address, color),
            self.color(resource.action.description(), "dim"),
        ));

        for line in resource.body_lines() {
            lines.push(self.render_body_line(line));
        }
    }

    fn render_body_line(&self, line: &str) -> String {
        let trimmed = line.trim_start();
        let color = if trimmed.starts_with("+ ") {
            "green"
        } else if trimmed.starts_with("- ") {
            "red"
        } else if trimmed.starts_with("~ ") {
            "yellow"
        } else if trimmed.contains("(known after apply)") {
            "dim"
        } else {
            return line.to_string();
        };
        self.color(line, color)
    }
}

impl Default for PrintReporter {
    fn default() -> Self {
        Self::new()
    }
}

/// Render a plan as text, with ANSI colors when `colored`.
#[must_use]
pub fn render_plan(plan: &Plan, colored: bool) -> String {
    let reporter = PrintReporter::new();
    if colored {
        reporter.render(plan)
    } else {
        reporter.no_color().render(plan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan() -> Plan {
        let mut web = Resource::new("aws_instance.web", Action::Create);
        web.raw_lines = vec![
            "  # aws_instance.web will be created".to_string(),
            "  + resource \"aws_instance\" \"web\" {".to_string(),
            "      + ami = \"ami-123\"".to_string(),
            "    }".to_string(),
        ];
        Plan {
            resources: vec![web],
            summary: "Plan: 1 to add, 0 to change, 0 to destroy.".to_string(),
            total_add: 1,
            ..Plan::default()
        }
    }

    #[test]
    fn test_plain_output_has_no_escapes() {
        let out = render_plan(&plan(), false);
        assert!(!out.contains('\x1b'));
        assert!(out.contains("Plan: 1 to add, 0 to change, 0 to destroy"));
        assert!(out.contains("+ aws_instance.web will be created"));
        assert!(out.contains("      + ami = \"ami-123\""));
    }

    #[test]
    fn test_colored_output() {
        let out = render_plan(&plan(), true);
        assert!(out.contains("\x1b[32maws_instance.web\x1b[0m"));
        assert!(out.contains("\x1b[32m      + ami = \"ami-123\"\x1b[0m"));
    }

    #[test]
    fn test_no_summary_headline() {
        let mut plan = plan();
        plan.summary.clear();
        let out = render_plan(&plan, false);
        assert!(out.contains("1 resources with changes"));
    }

    #[test]
    fn test_flag_disables_color() {
        assert!(!should_use_color(true));
    }
}
