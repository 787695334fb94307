//! Display labels: line breaks for long category names.

use std::sync::LazyLock;

use regex::Regex;

static BULLET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*•\s*").expect("valid bullet pattern"));
static COLON: LazyLock<Regex> = LazyLock::new(|| Regex::new(r":\s*").expect("valid colon pattern"));
static SLASH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*/\s*").expect("valid slash pattern"));

/// Wrap a category name for display.
///
/// Bullets start a new line (`\n• `), colons end one (`:\n`) and slashes
/// start one (`\n/`). Surrounding whitespace is dropped.
pub fn format_label(name: &str) -> String {
    let label = name.trim();
    let label = BULLET.replace_all(label, "\n• ");
    let label = COLON.replace_all(&label, ":\n");
    let label = SLASH.replace_all(&label, "\n/");
    label.into_owned()
}
