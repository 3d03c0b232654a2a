//! Plan, resource and attribute structures.

use super::Action;
use serde::{Deserialize, Serialize};

/// One parsed change report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    /// Resources in the order they appear in the report
    pub resources: Vec<Resource>,
    /// The verbatim `Plan: ...` line, empty when the report had none
    pub summary: String,
    pub total_add: usize,
    pub total_change: usize,
    pub total_destroy: usize,
}

impl Plan {
    /// Whether a `Plan: N to add, ...` line was found.
    #[must_use]
    pub fn has_summary(&self) -> bool {
        !self.summary.is_empty()
    }

    /// Header text: the summary counts, or a resource count when the report
    /// carried no summary line.
    #[must_use]
    pub fn headline(&self) -> String {
        if self.has_summary() {
            format!(
                "{} to add, {} to change, {} to destroy",
                self.total_add, self.total_change, self.total_destroy
            )
        } else {
            format!("{} resources with changes", self.resources.len())
        }
    }

    /// Number of resources carrying the given action.
    #[must_use]
    pub fn count_action(&self, action: Action) -> usize {
        self.resources.iter().filter(|r| r.action == action).count()
    }
}

/// One infrastructure object's proposed change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    /// Dot-delimited address, e.g. `module.net.aws_subnet.private`
    pub address: String,
    pub resource_type: String,
    pub name: String,
    pub action: Action,
    /// Header line followed by every body line, untouched
    pub raw_lines: Vec<String>,
    /// Best-effort parse of the body; may be empty
    pub attributes: Vec<Attribute>,
}

impl Resource {
    /// Create a resource from its address, deriving type and name.
    #[must_use]
    pub fn new(address: impl Into<String>, action: Action) -> Self {
        let address = address.into();
        let (resource_type, name) = split_address(&address);
        Self {
            address,
            resource_type,
            name,
            action,
            raw_lines: Vec::new(),
            attributes: Vec::new(),
        }
    }

    /// Body lines, without the header.
    #[must_use]
    pub fn body_lines(&self) -> &[String] {
        self.raw_lines.get(1..).unwrap_or_default()
    }

    /// Text that search terms are matched against.
    #[must_use]
    pub fn search_text(&self) -> String {
        format!("{}{}{}", self.address, self.resource_type, self.name)
    }
}

/// One attribute line inside a resource body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
    /// May differ from the owning resource's action
    pub action: Action,
    /// Value is `(known after apply)` or `<computed>`
    pub computed: bool,
    pub sensitive: bool,
}

impl Attribute {
    #[must_use]
    pub fn new(name: impl Into<String>, action: Action) -> Self {
        Self {
            name: name.into(),
            old_value: None,
            new_value: None,
            action,
            computed: false,
            sensitive: false,
        }
    }
}

/// Split an address into `(type, name)` from its last two segments.
///
/// `module.foo.aws_instance.bar` yields `("aws_instance", "bar")`. Addresses
/// with fewer than two segments yield empty strings.
#[must_use]
pub fn split_address(address: &str) -> (String, String) {
    let parts: Vec<&str> = address.split('.').collect();
    if parts.len() >= 2 {
        (
            parts[parts.len() - 2].to_string(),
            parts[parts.len() - 1].to_string(),
        )
    } else {
        (String::new(), String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_module_address() {
        let (ty, name) = split_address("module.foo.aws_instance.bar");
        assert_eq!(ty, "aws_instance");
        assert_eq!(name, "bar");
    }

    #[test]
    fn test_split_short_address() {
        assert_eq!(split_address("orphan"), (String::new(), String::new()));
        assert_eq!(
            split_address("aws_s3_bucket.logs"),
            ("aws_s3_bucket".to_string(), "logs".to_string())
        );
    }

    #[test]
    fn test_indexed_address_keeps_index_in_name() {
        let r = Resource::new("aws_instance.web[0]", Action::Create);
        assert_eq!(r.resource_type, "aws_instance");
        assert_eq!(r.name, "web[0]");
    }

    #[test]
    fn test_headline() {
        let mut plan = Plan::default();
        plan.resources.push(Resource::new("a.b", Action::Create));
        assert_eq!(plan.headline(), "1 resources with changes");

        plan.summary = "Plan: 1 to add, 0 to change, 0 to destroy.".to_string();
        plan.total_add = 1;
        assert_eq!(plan.headline(), "1 to add, 0 to change, 0 to destroy");
    }

    #[test]
    fn test_body_lines_without_header() {
        let mut r = Resource::new("a.b", Action::Update);
        assert!(r.body_lines().is_empty());
        r.raw_lines = vec!["header".into(), "body".into()];
        assert_eq!(r.body_lines(), &["body".to_string()]);
    }
}
