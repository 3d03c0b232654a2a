//! Property-based tests for the parser, decoder and diff engine.
//!
//! Parsing and decoding are total, so arbitrary input must never panic.

use proptest::prelude::*;
use planscope::diff::{compute_diff, context_diff, DiffOp};
use planscope::parsers::{parse_plan, strip_ansi};
use planscope::try_decode;

proptest! {
    // 500 cases balances coverage vs speed for no-panic checks.
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn parse_plan_doesnt_panic(s in "\\PC{0,2000}") {
        let _ = parse_plan(&s);
    }

    #[test]
    fn header_like_lines_dont_panic(
        address in "[a-z_.\\[\\]\"0-9:]{0,60}",
        phrase in prop::sample::select(vec![
            "will be created",
            "will be destroyed",
            "will be updated in-place",
            "must be replaced",
            "will be read during apply",
            "is tainted, so must be replaced",
        ]),
        body in "\\PC{0,300}",
    ) {
        let input = format!("  # {address} {phrase}\n{body}\n");
        let plan = parse_plan(&input);
        prop_assert!(plan.resources.len() <= 1 + body.lines().count());
    }

    #[test]
    fn legacy_like_lines_dont_panic(
        prefix in prop::sample::select(vec!["+", "-", "~", "-/+", "+/-", "<="]),
        rest in "[ -~]{0,80}",
    ) {
        let _ = parse_plan(&format!("{prefix} {rest}\n    key: value\n"));
    }

    #[test]
    fn strip_ansi_removes_escapes(s in "[a-z ]{0,40}", code in 0u8..108) {
        let colored = format!("\x1b[{code}m{s}\x1b[0m");
        let stripped = strip_ansi(&colored);
        prop_assert_eq!(stripped.as_ref(), s.as_str());
    }

    #[test]
    fn try_decode_doesnt_panic(s in "\\PC{0,500}") {
        let _ = try_decode(&s);
    }

    #[test]
    fn base64_of_text_round_trips(s in "[ -~\n]{1,200}") {
        use base64::Engine as _;
        let encoded = base64::engine::general_purpose::STANDARD.encode(&s);
        prop_assert_eq!(try_decode(&encoded), Some(s));
    }

    #[test]
    fn identical_inputs_diff_to_equal(lines in prop::collection::vec("[a-c]{0,3}", 0..60)) {
        let diff = compute_diff(&lines, &lines);
        prop_assert_eq!(diff.len(), lines.len());
        prop_assert!(diff.iter().all(|l| l.op == DiffOp::Equal));
        prop_assert!(context_diff(&diff, 3).is_none());
    }

    #[test]
    fn diff_reconstructs_both_sides(
        old in prop::collection::vec("[a-d]{1,2}", 0..40),
        new in prop::collection::vec("[a-d]{1,2}", 0..40),
    ) {
        let diff = compute_diff(&old, &new);
        let rebuilt_old: Vec<&str> = diff
            .iter()
            .filter(|l| l.op != DiffOp::Insert)
            .map(|l| l.text.as_str())
            .collect();
        let rebuilt_new: Vec<&str> = diff
            .iter()
            .filter(|l| l.op != DiffOp::Delete)
            .map(|l| l.text.as_str())
            .collect();
        prop_assert_eq!(rebuilt_old, old.iter().map(String::as_str).collect::<Vec<_>>());
        prop_assert_eq!(rebuilt_new, new.iter().map(String::as_str).collect::<Vec<_>>());
    }
}
