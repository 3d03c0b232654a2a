//! Best-effort decoding of embedded attribute values.
//!
//! Cloud-init scripts and similar payloads usually reach a plan as base64,
//! sometimes gzipped first, occasionally hex. [`try_decode`] tries each
//! encoding in turn and only accepts text that is valid UTF-8 without NUL
//! bytes. Anything else, including a panic inside a decoder, is reported as
//! not decodable and the caller shows the raw value instead.

use base64::engine::general_purpose::{STANDARD, STANDARD_NO_PAD, URL_SAFE, URL_SAFE_NO_PAD};
use base64::Engine as _;
use flate2::read::GzDecoder;
use std::cell::Cell;
use std::io::Read;
use std::panic::{self, UnwindSafe};
use std::sync::Once;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

thread_local! {
    static QUIET: Cell<bool> = const { Cell::new(false) };
}

static QUIET_HOOK: Once = Once::new();

/// Decode a value, or `None` if no encoding produces readable text.
#[must_use]
pub fn try_decode(value: &str) -> Option<String> {
    quietly(|| decode_inner(value))
}

/// Run `f`, treating a panic as `None` without printing the panic message.
///
/// The process panic hook is wrapped once; it stays silent only on the thread
/// currently inside `quietly` and defers to the previous hook everywhere else.
fn quietly<T>(f: impl FnOnce() -> Option<T> + UnwindSafe) -> Option<T> {
    QUIET_HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if !QUIET.with(Cell::get) {
                previous(info);
            }
        }));
    });

    QUIET.with(|quiet| quiet.set(true));
    let result = panic::catch_unwind(f);
    QUIET.with(|quiet| quiet.set(false));
    result.ok().flatten()
}

/// Whether a value is a placeholder rather than content.
#[must_use]
pub fn is_placeholder(value: &str) -> bool {
    value.is_empty() || value == "null" || value.starts_with('(')
}

fn decode_inner(value: &str) -> Option<String> {
    let value = unquote(value.trim());
    if is_placeholder(value) {
        return None;
    }

    let stripped: String = value
        .chars()
        .filter(|c| !matches!(c, '\n' | '\r' | ' '))
        .collect();
    if let Some(text) = decode_base64(&stripped).and_then(validate) {
        return Some(text);
    }

    decode_hex(value).and_then(validate)
}

fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}

fn decode_base64(value: &str) -> Option<Vec<u8>> {
    if value.is_empty() {
        return None;
    }
    let engines = [&STANDARD, &URL_SAFE, &STANDARD_NO_PAD, &URL_SAFE_NO_PAD];
    let bytes = engines.iter().find_map(|engine| engine.decode(value).ok())?;
    Some(gunzip(&bytes).unwrap_or(bytes))
}

fn gunzip(bytes: &[u8]) -> Option<Vec<u8>> {
    if !bytes.starts_with(&GZIP_MAGIC) {
        return None;
    }
    let mut out = Vec::new();
    GzDecoder::new(bytes).read_to_end(&mut out).ok()?;
    Some(out)
}

fn decode_hex(value: &str) -> Option<Vec<u8>> {
    if value.len() % 2 != 0 || !value.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    hex::decode(value).ok()
}

fn validate(bytes: Vec<u8>) -> Option<String> {
    if bytes.contains(&0) {
        return None;
    }
    String::from_utf8(bytes).ok()
}
