//! Shared utilities.

mod text;
mod version;

pub use text::{display_width, truncate, wrap_text, MIN_WRAP_WIDTH};
pub use version::{is_newer, parse_release_version};
