#![no_main]
use libfuzzer_sys::fuzz_target;

/// Fuzz the line diff. The input is split at the first NUL into old and new
/// texts.
fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    let (old, new) = s.split_once('\0').unwrap_or((s, ""));
    let old: Vec<&str> = old.lines().collect();
    let new: Vec<&str> = new.lines().collect();

    let diff = planscope::compute_diff(&old, &new);
    let _ = planscope::context_diff(&diff, 3);
});
