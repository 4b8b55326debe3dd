//! Release-tag normalization and version ordering.
//!
//! Ordering is delegated to the `semver` crate; the only local logic is
//! stripping the conventional tag prefix and padding shorthand versions
//! ("1.2" -> "1.2.0") so they parse.

use log::debug;
use semver::Version;

/// Strips every leading `v` from a release tag ("vv2.0.0" -> "2.0.0").
pub fn normalize_tag(tag: &str) -> &str {
    tag.trim_start_matches('v')
}

/// True when `latest` is strictly newer than `current`.
///
/// A side that cannot be parsed never signals an update.
pub fn is_newer(latest: &str, current: &str) -> bool {
    match (parse_loose(latest), parse_loose(current)) {
        (Some(latest), Some(current)) => latest > current,
        _ => {
            debug!(
                "Cannot order versions '{}' and '{}', not signaling an update",
                latest, current
            );
            false
        }
    }
}

/// Parse a version string, padding missing minor/patch components
/// before handing off to semver.
pub fn parse_loose(version: &str) -> Option<Version> {
    if let Ok(parsed) = Version::parse(version) {
        return Some(parsed);
    }

    let (core, suffix) = split_core_and_suffix(version);
    let mut parts = core.split('.');
    let major: u64 = parts.next()?.parse().ok()?;
    let minor: u64 = match parts.next() {
        Some(part) => part.parse().ok()?,
        None => 0,
    };
    let patch: u64 = match parts.next() {
        Some(part) => part.parse().ok()?,
        None => 0,
    };
    if parts.next().is_some() {
        return None;
    }

    Version::parse(&format!("{major}.{minor}.{patch}{suffix}")).ok()
}

fn split_core_and_suffix(version: &str) -> (&str, &str) {
    let suffix_idx = version.find(['-', '+']).unwrap_or(version.len());
    (&version[..suffix_idx], &version[suffix_idx..])
}
