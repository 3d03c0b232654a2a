//! Parser for the modern `# address will be ...` plan layout.

use super::PlanParser;
use crate::model::{Action, Attribute, Resource};
use regex::Regex;
use std::sync::LazyLock;

static HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*#\s+(.+?)\s+(will be|must be|has been|is tainted)").expect("static regex")
});

/// `+ name = value`, name optionally quoted
static ASSIGNMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^\s+([~+\-])\s+"?([^"=]+)"?\s*=\s*(.*)"#).expect("static regex")
});

/// `+ anything`, for nested blocks and list items
static FREEFORM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s+([~+\-])\s+(.+)$").expect("static regex"));

/// Parses the layout printed by Terraform 0.12+ and OpenTofu.
#[derive(Debug, Default, Clone, Copy)]
pub struct ModernParser;

impl PlanParser for ModernParser {
    fn parse_resources(&self, lines: &[&str]) -> Vec<Resource> {
        let mut resources = Vec::new();
        let mut current: Option<Resource> = None;
        let mut in_block = false;
        let mut depth: i64 = 0;

        for &line in lines {
            if let Some(caps) = HEADER.captures(line) {
                if let Some(done) = current.take() {
                    resources.push(done);
                }
                let address = caps.get(1).map_or("", |m| m.as_str()).trim();
                let mut resource = Resource::new(address, action_from_header(line));
                resource.raw_lines.push(line.to_string());
                current = Some(resource);
                in_block = true;
                depth = 0;
                continue;
            }

            if !in_block {
                continue;
            }
            let Some(resource) = current.as_mut() else {
                continue;
            };

            resource.raw_lines.push(line.to_string());
            depth += brace_delta(line);

            if let Some(attr) = parse_attribute(line) {
                resource.attributes.push(attr);
            }

            if depth <= 0 && line.trim() == "}" {
                in_block = false;
            }
        }

        if let Some(done) = current {
            resources.push(done);
        }
        resources
    }

    fn name(&self) -> &'static str {
        "modern"
    }
}

fn brace_delta(line: &str) -> i64 {
    line.chars().fold(0, |acc, c| match c {
        '{' => acc + 1,
        '}' => acc - 1,
        _ => acc,
    })
}

fn symbol_action(symbol: &str) -> Action {
    match symbol {
        "+" => Action::Create,
        "-" => Action::Destroy,
        _ => Action::Update,
    }
}

fn parse_attribute(line: &str) -> Option<Attribute> {
    if let Some(caps) = ASSIGNMENT.captures(line) {
        let symbol = caps.get(1).map_or("", |m| m.as_str());
        let name = caps.get(2).map_or("", |m| m.as_str()).trim();
        let value = caps.get(3).map_or("", |m| m.as_str()).trim();

        let action = symbol_action(symbol);
        let mut attr = Attribute::new(name, action);
        match action {
            Action::Create => attr.new_value = Some(value.to_string()),
            Action::Destroy => attr.old_value = Some(value.to_string()),
            _ => {
                if let Some((old, new)) = value.split_once(" -> ") {
                    attr.old_value = Some(old.trim().to_string());
                    attr.new_value = Some(new.trim().to_string());
                } else {
                    attr.new_value = Some(value.to_string());
                }
            }
        }
        attr.computed = value.contains("(known after apply)");
        attr.sensitive = value.contains("(sensitive");
        return Some(attr);
    }

    let caps = FREEFORM.captures(line)?;
    let symbol = caps.get(1).map_or("", |m| m.as_str());
    let content = caps.get(2).map_or("", |m| m.as_str()).trim();
    Some(Attribute::new(content, symbol_action(symbol)))
}

/// Map a header line's phrase to an [`Action`].
///
/// The two-step replacement phrases are checked before the single verbs,
/// since "destroyed and then created" also contains "destroyed".
#[must_use]
pub fn action_from_header(line: &str) -> Action {
    let lower = line.to_lowercase();
    let has = |needle: &str| lower.contains(needle);

    if has("destroyed and then created") || has("-/+ ") {
        Action::DeleteCreate
    } else if has("created and then destroyed") || has("+/- ") {
        Action::CreateDelete
    } else if has("is tainted") || has("must be replaced") || has("will be replaced") {
        Action::Replace
    } else if has("will be read") {
        Action::Read
    } else if has("will be created") || has("has been created") {
        Action::Create
    } else if has("will be destroyed") || has("must be destroyed") || has("has been deleted") {
        Action::Destroy
    } else {
        // "will be updated", "has been changed" and anything unrecognized
        Action::Update
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Vec<Resource> {
        let lines: Vec<&str> = text.lines().collect();
        ModernParser.parse_resources(&lines)
    }

    #[test]
    fn test_action_from_header() {
        let cases = [
            ("  # a.b will be created", Action::Create),
            ("  # a.b will be destroyed", Action::Destroy),
            ("  # a.b must be destroyed", Action::Destroy),
            ("  # a.b will be updated in-place", Action::Update),
            ("  # a.b has been changed", Action::Update),
            ("  # a.b must be replaced", Action::Replace),
            ("  # a.b is tainted, so must be replaced", Action::Replace),
            ("  # data.a.b will be read during apply", Action::Read),
            ("  # a.b will be destroyed and then created", Action::DeleteCreate),
            ("  # a.b will be created and then destroyed", Action::CreateDelete),
            ("  # a.b has moved somewhere", Action::Update),
        ];
        for (line, expected) in cases {
            assert_eq!(action_from_header(line), expected, "{line}");
        }
    }

    #[test]
    fn test_update_attribute_split() {
        let resources = parse(
            "  # aws_instance.web will be updated in-place\n  ~ resource \"aws_instance\" \"web\" {\n      ~ instance_type = \"t2.micro\" -> \"t3.small\"\n        id            = \"i-1\"\n    }\n",
        );
        assert_eq!(resources.len(), 1);
        let attr = resources[0]
            .attributes
            .iter()
            .find(|a| a.name == "instance_type")
            .unwrap();
        assert_eq!(attr.action, Action::Update);
        assert_eq!(attr.old_value.as_deref(), Some("\"t2.micro\""));
        assert_eq!(attr.new_value.as_deref(), Some("\"t3.small\""));
    }

    #[test]
    fn test_attribute_markers() {
        let resources = parse(
            "  # aws_db_instance.db will be created\n  + resource \"aws_db_instance\" \"db\" {\n      + arn      = (known after apply)\n      + password = (sensitive value)\n    }\n",
        );
        let attrs = &resources[0].attributes;
        let arn = attrs.iter().find(|a| a.name == "arn").unwrap();
        assert!(arn.computed);
        assert!(!arn.sensitive);
        let pw = attrs.iter().find(|a| a.name == "password").unwrap();
        assert!(pw.sensitive);
        assert_eq!(pw.new_value.as_deref(), Some("(sensitive value)"));
    }

    #[test]
    fn test_attribute_action_differs_from_resource() {
        let resources = parse(
            "  # aws_instance.web will be updated in-place\n  ~ resource \"aws_instance\" \"web\" {\n      + monitoring = true\n      - ebs_optimized = false -> null\n    }\n",
        );
        let attrs = &resources[0].attributes;
        let monitoring = attrs.iter().find(|a| a.name == "monitoring").unwrap();
        assert_eq!(monitoring.action, Action::Create);
        let ebs = attrs.iter().find(|a| a.name == "ebs_optimized").unwrap();
        assert_eq!(ebs.action, Action::Destroy);
        assert_eq!(ebs.old_value.as_deref(), Some("false -> null"));
    }

    #[test]
    fn test_block_closes_on_matching_brace() {
        let resources = parse(
            "  # a.b will be created\n  + resource \"a\" \"b\" {\n      + tags = {\n          + \"Name\" = \"x\"\n        }\n    }\n\nstray text after block\n",
        );
        assert_eq!(resources.len(), 1);
        let raw = &resources[0].raw_lines;
        assert_eq!(raw.last().map(String::as_str), Some("    }"));
        assert!(!raw.iter().any(|l| l.contains("stray")));
        let tag = resources[0].attributes.iter().find(|a| a.name == "Name");
        assert!(tag.is_some());
    }

    #[test]
    fn test_duplicate_addresses_kept() {
        let resources = parse(
            "  # a.b will be created\n  + resource \"a\" \"b\" {\n    }\n  # a.b will be destroyed\n  - resource \"a\" \"b\" {\n    }\n",
        );
        assert_eq!(resources.len(), 2);
        assert_eq!(resources[0].address, resources[1].address);
        assert_eq!(resources[1].action, Action::Destroy);
    }

    #[test]
    fn test_freeform_lines() {
        let resources = parse(
            "  # a.b will be updated in-place\n  ~ resource \"a\" \"b\" {\n      ~ ports = [\n          + 443,\n        ]\n    }\n",
        );
        assert!(resources[0]
            .attributes
            .iter()
            .any(|a| a.name == "443," && a.action == Action::Create));
    }
}
