//! Release version comparison.

use semver::Version;

/// Parse a release tag such as `v1.4.0` or `1.4.0`.
#[must_use]
pub fn parse_release_version(tag: &str) -> Option<Version> {
    let tag = tag.trim();
    Version::parse(tag.strip_prefix('v').unwrap_or(tag)).ok()
}

/// Whether `latest` is a strictly newer release than `current`.
///
/// A tag that does not parse as semver is never reported as newer; a `dev`
/// build never is either.
#[must_use]
pub fn is_newer(current: &str, latest: &str) -> bool {
    match (parse_release_version(current), parse_release_version(latest)) {
        (Some(current), Some(latest)) => latest > current,
        _ => false,
    }
}
