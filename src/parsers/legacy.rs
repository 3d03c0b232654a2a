//! Parser for the legacy (Terraform 0.11 and earlier) plan layout.
//!
//! Headers and attributes are told apart only by the colon: a `+ `, `- ` or
//! `~ ` line without one is a resource, anything indented with `name: value`
//! is an attribute. An address that itself contains a colon is therefore
//! read as an attribute line.

use super::PlanParser;
use crate::model::{Action, Attribute, Resource};
use regex::Regex;
use std::sync::LazyLock;

static ATTRIBUTE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s+([^:]+):\s*(.*)$").expect("static regex"));

/// Trailing annotation such as `(new resource required)` or `(tainted)`
static ANNOTATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+\([^()]*\)$").expect("static regex"));

/// Header prefixes, longest first so `-/+` is not read as `-`.
const HEADER_PREFIXES: [(&str, Action, bool); 6] = [
    ("-/+", Action::DeleteCreate, false),
    ("+/-", Action::CreateDelete, false),
    ("<=", Action::Read, false),
    ("+", Action::Create, true),
    ("-", Action::Destroy, true),
    ("~", Action::Update, true),
];

/// Parses the single-line header layout.
#[derive(Debug, Default, Clone, Copy)]
pub struct LegacyParser;

impl PlanParser for LegacyParser {
    fn parse_resources(&self, lines: &[&str]) -> Vec<Resource> {
        let mut resources = Vec::new();
        let mut current: Option<Resource> = None;

        for &line in lines {
            if line.trim().is_empty() {
                continue;
            }

            if let Some((address, action)) = parse_header(line) {
                if let Some(done) = current.take() {
                    resources.push(done);
                }
                let mut resource = Resource::new(address, action);
                resource.raw_lines.push(line.to_string());
                current = Some(resource);
                continue;
            }

            let Some(resource) = current.as_mut() else {
                continue;
            };
            resource.raw_lines.push(line.to_string());

            if let Some(caps) = ATTRIBUTE.captures(line) {
                let name = caps.get(1).map_or("", |m| m.as_str()).trim();
                let value = caps.get(2).map_or("", |m| m.as_str()).trim();

                let mut attr = Attribute::new(name, resource.action);
                if let Some((old, new)) = value.split_once(" => ") {
                    attr.old_value = Some(old.trim().to_string());
                    attr.new_value = Some(new.trim().to_string());
                    attr.action = Action::Update;
                } else {
                    attr.new_value = Some(value.to_string());
                }
                attr.computed = value.contains("<computed>");
                attr.sensitive = value.contains("<sensitive>");
                resource.attributes.push(attr);
            }
        }

        if let Some(done) = current {
            resources.push(done);
        }
        resources
    }

    fn name(&self) -> &'static str {
        "legacy"
    }
}

/// Recognize a header line, returning its address and action.
fn parse_header(line: &str) -> Option<(String, Action)> {
    for (prefix, action, colon_free) in HEADER_PREFIXES {
        let Some(rest) = line.strip_prefix(prefix) else {
            continue;
        };
        if !rest.starts_with(char::is_whitespace) {
            continue;
        }
        if colon_free && line.contains(':') {
            return None;
        }
        let address = ANNOTATION.replace(rest.trim(), "");
        if address.is_empty() {
            return None;
        }
        return Some((address.into_owned(), action));
    }
    None
}
