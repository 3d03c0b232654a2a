//! Decoding embedded values from real plan output.

use planscope::diff::{compute_diff, DiffOp};
use planscope::{parse_plan, try_decode};

const REPLACE: &str = include_str!("fixtures/replace_user_data.txt");

#[test]
fn test_user_data_change_decodes_to_a_diff() {
    let plan = parse_plan(REPLACE);
    let user_data = plan.resources[0]
        .attributes
        .iter()
        .find(|a| a.name == "user_data")
        .expect("user_data attribute");

    let old = try_decode(user_data.old_value.as_deref().unwrap()).unwrap();
    let new_raw = user_data.new_value.as_deref().unwrap();
    let new_value = new_raw.split(" # ").next().unwrap();
    let new = try_decode(new_value).unwrap();

    assert_eq!(old, "#!/bin/bash\necho one\necho two\n");
    assert_eq!(new, "#!/bin/bash\necho one\necho three\n");

    let old_lines: Vec<&str> = old.lines().collect();
    let new_lines: Vec<&str> = new.lines().collect();
    let changes: Vec<(DiffOp, String)> = compute_diff(&old_lines, &new_lines)
        .into_iter()
        .filter(|l| l.is_change())
        .map(|l| (l.op, l.text))
        .collect();
    assert_eq!(
        changes,
        [
            (DiffOp::Delete, "echo two".to_string()),
            (DiffOp::Insert, "echo three".to_string()),
        ]
    );
}

#[test]
fn test_computed_and_sensitive_values_stay_raw() {
    assert!(try_decode("(known after apply)").is_none());
    assert!(try_decode("(sensitive value)").is_none());
    assert!(try_decode("\"i-0aaa\"").is_none());
}

#[test]
fn test_plain_words_are_not_hex_or_base64() {
    // Valid base64 alphabet, but the bytes are not readable text.
    assert!(try_decode("\"abcd\"").is_none());
    assert!(try_decode("\"t2.micro\"").is_none());
}
