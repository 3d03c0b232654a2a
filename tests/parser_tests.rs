//! Parser behavior on captured plan output.

use planscope::model::{split_address, Action};
use planscope::parsers::{detect_format, parse_plan, PlanFormat};

const FIXTURES_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures");

fn fixture(name: &str) -> String {
    std::fs::read_to_string(format!("{FIXTURES_DIR}/{name}"))
        .unwrap_or_else(|e| panic!("missing fixture {name}: {e}"))
}

#[test]
fn test_modern_mixed_plan() {
    let plan = parse_plan(&fixture("modern_mixed.txt"));

    assert_eq!(plan.resources.len(), 3);
    let actions: Vec<Action> = plan.resources.iter().map(|r| r.action).collect();
    assert_eq!(actions, [Action::Create, Action::Update, Action::Destroy]);
    assert_eq!(
        (plan.total_add, plan.total_change, plan.total_destroy),
        (1, 1, 1)
    );
    assert_eq!(plan.summary, "Plan: 1 to add, 1 to change, 1 to destroy.");
}

#[test]
fn test_modern_module_address() {
    let plan = parse_plan(&fixture("modern_mixed.txt"));
    let sg = &plan.resources[1];
    assert_eq!(sg.address, "module.network.aws_security_group.web");
    assert_eq!(sg.resource_type, "aws_security_group");
    assert_eq!(sg.name, "web");
}

#[test]
fn test_modern_body_is_verbatim() {
    let plan = parse_plan(&fixture("modern_mixed.txt"));
    let bucket = &plan.resources[0];
    assert_eq!(bucket.raw_lines[0], "  # aws_s3_bucket.logs will be created");
    assert_eq!(bucket.body_lines().last().map(String::as_str), Some("    }"));
    assert!(bucket
        .attributes
        .iter()
        .any(|a| a.name == "arn" && a.computed));

    // The intro legend is not part of any resource.
    assert!(!plan
        .resources
        .iter()
        .flat_map(|r| &r.raw_lines)
        .any(|l| l.contains("update in-place") && !l.contains('#')));
}

#[test]
fn test_legacy_mixed_plan() {
    let text = fixture("legacy_mixed.txt");
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(detect_format(&lines), PlanFormat::Legacy);

    let plan = parse_plan(&text);
    let found: Vec<(&str, Action)> = plan
        .resources
        .iter()
        .map(|r| (r.address.as_str(), r.action))
        .collect();
    assert_eq!(
        found,
        [
            ("aws_instance.web", Action::Create),
            ("aws_security_group.web", Action::Update),
            ("aws_instance.db", Action::DeleteCreate),
            ("aws_eip.unused", Action::Destroy),
        ]
    );
    assert_eq!(
        (plan.total_add, plan.total_change, plan.total_destroy),
        (2, 1, 2)
    );
}

#[test]
fn test_legacy_attributes() {
    let plan = parse_plan(&fixture("legacy_mixed.txt"));

    let web = &plan.resources[0];
    let id = web.attributes.iter().find(|a| a.name == "id").unwrap();
    assert!(id.computed);
    let ami = web.attributes.iter().find(|a| a.name == "ami").unwrap();
    assert_eq!(ami.new_value.as_deref(), Some("\"ami-0abc1234\""));

    let sg = &plan.resources[1];
    let description = &sg.attributes[0];
    assert_eq!(description.action, Action::Update);
    assert_eq!(description.old_value.as_deref(), Some("\"old rules\""));
    assert_eq!(description.new_value.as_deref(), Some("\"web ingress\""));
}

#[test]
fn test_replacement_header() {
    let plan = parse_plan(&fixture("replace_user_data.txt"));
    assert_eq!(plan.resources.len(), 1);
    assert_eq!(plan.resources[0].action, Action::Replace);
    assert_eq!(plan.total_destroy, 1);
}

#[test]
fn test_create_update_destroy_scenario() {
    let text = "\
  # aws_instance.a will be created
  + resource \"aws_instance\" \"a\" {
      + ami = \"ami-1\"
    }

  # aws_instance.b will be updated in-place
  ~ resource \"aws_instance\" \"b\" {
      ~ tags = {} -> { \"env\" = \"prod\" }
    }

  # aws_instance.c will be destroyed
  - resource \"aws_instance\" \"c\" {
      - ami = \"ami-3\" -> null
    }

Plan: 1 to add, 1 to change, 1 to destroy.
";
    let plan = parse_plan(text);
    let addresses: Vec<&str> = plan.resources.iter().map(|r| r.address.as_str()).collect();
    assert_eq!(addresses, ["aws_instance.a", "aws_instance.b", "aws_instance.c"]);
    assert_eq!(plan.count_action(Action::Update), 1);
    assert_eq!(
        (plan.total_add, plan.total_change, plan.total_destroy),
        (1, 1, 1)
    );
}

#[test]
fn test_creation_headers_match_resources() {
    let mut text = String::new();
    for i in 0..25 {
        text.push_str(&format!(
            "  # null_resource.n{i} will be created\n  + resource \"null_resource\" \"n{i}\" {{\n      + id = (known after apply)\n    }}\n\n"
        ));
    }
    text.push_str("Plan: 25 to add, 0 to change, 0 to destroy.\n");

    let plan = parse_plan(&text);
    assert_eq!(plan.resources.len(), 25);
    assert!(plan.resources.iter().all(|r| r.action == Action::Create));
    assert_eq!(plan.total_add, 25);
}

#[test]
fn test_address_split() {
    assert_eq!(
        split_address("module.foo.aws_instance.bar"),
        ("aws_instance".to_string(), "bar".to_string())
    );
    assert_eq!(split_address("single"), (String::new(), String::new()));
}

#[test]
fn test_no_changes_output() {
    let plan = parse_plan(
        "No changes. Your infrastructure matches the configuration.\n\nTerraform has compared your real infrastructure against your configuration\nand found no differences, so no changes are needed.\n",
    );
    assert!(plan.resources.is_empty());
    assert!(!plan.has_summary());
}
