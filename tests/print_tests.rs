//! Non-interactive output.

use planscope::{parse_plan, render_plan};

const MODERN: &str = include_str!("fixtures/modern_mixed.txt");

#[test]
fn test_plain_print_of_mixed_plan() {
    let out = render_plan(&parse_plan(MODERN), false);
    insta::assert_snapshot!(out, @r#"
planscope: Terraform plan

Plan: 1 to add, 1 to change, 1 to destroy

+ aws_s3_bucket.logs will be created
  + resource "aws_s3_bucket" "logs" {
      + arn           = (known after apply)
      + bucket        = "acme-logs"
      + force_destroy = false
      + tags          = {
          + "Team" = "platform"
        }
    }

~ module.network.aws_security_group.web will be updated in-place
  ~ resource "aws_security_group" "web" {
        id          = "sg-0a1b2c3d"
      ~ description = "old rules" -> "web ingress"
        name        = "web"
    }

- aws_instance.legacy will be destroyed
  - resource "aws_instance" "legacy" {
      - ami           = "ami-0abc1234" -> null
      - instance_type = "t2.micro" -> null
    }
"#);
}

#[test]
fn test_colored_print_marks_lines_by_prefix() {
    let out = render_plan(&parse_plan(MODERN), true);
    assert!(out.contains("\x1b[31m      - ami           = \"ami-0abc1234\" -> null\x1b[0m"));
    assert!(out.contains("\x1b[33m~\x1b[0m"));
    // Unchanged attributes are left as they are.
    assert!(out.contains("\n        id          = \"sg-0a1b2c3d\"\n"));
}

#[test]
fn test_print_without_summary() {
    let out = render_plan(&parse_plan(""), false);
    assert_eq!(out, "planscope: Terraform plan\n\n0 resources with changes\n\n");
}
