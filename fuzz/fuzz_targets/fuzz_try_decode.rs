#![no_main]
use libfuzzer_sys::fuzz_target;

/// Fuzz value decoding across base64, gzip and hex.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = planscope::try_decode(s);
    }
});
