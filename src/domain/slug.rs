//! Identifier derivation: turns name paths into stable, URL-safe ids.

use std::sync::LazyLock;

use regex::Regex;

/// Substituted for segments without a single `[a-z0-9]` character.
pub const FALLBACK_SEGMENT: &str = "node";

static NON_ALNUM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9]+").expect("valid slug pattern"));

/// Normalize a single name segment.
///
/// Lowercases, replaces every run of characters outside `[a-z0-9]` with a
/// single hyphen and strips hyphens at both ends.
///
/// # Examples
/// ```
/// use atlas_layout::domain::slugify;
/// assert_eq!(slugify("Threat Intel / OSINT"), "threat-intel-osint");
/// assert_eq!(slugify("???"), "node");
/// ```
pub fn slugify(segment: &str) -> String {
    let lowered = segment.to_lowercase();
    let slug = NON_ALNUM.replace_all(&lowered, "-");
    let slug = slug.trim_matches('-');
    if slug.is_empty() {
        FALLBACK_SEGMENT.to_string()
    } else {
        slug.to_string()
    }
}

/// Derive a node id from the full name path (root first, node last).
///
/// Callers always pass at least the node's own name.
pub fn derive_id<S: AsRef<str>>(path: &[S]) -> String {
    path.iter()
        .map(|segment| slugify(segment.as_ref()))
        .collect::<Vec<_>>()
        .join("-")
}
