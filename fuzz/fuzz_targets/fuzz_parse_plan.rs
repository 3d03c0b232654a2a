#![no_main]
use libfuzzer_sys::fuzz_target;

/// Fuzz the plan parsing entry point.
///
/// Feeds arbitrary UTF-8 to `parse_plan`, which strips ANSI escapes, detects
/// the layout and runs either parser. Parsing is total, so any panic is a bug.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = planscope::parse_plan(s);
    }
});
