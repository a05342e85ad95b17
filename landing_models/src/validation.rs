//! Predicates for user supplied text

use std::sync::LazyLock;

use regex::Regex;

static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

static TEXT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9\s.,!?;:()\-\x{00C0}-\x{017F}]+$").unwrap());

/// Returns `true` if `value` is present and contains something other than
/// whitespace.
pub fn is_not_empty(value: Option<&str>) -> bool {
    value.is_some_and(|value| !value.trim().is_empty())
}

/// Returns `true` if the trimmed `value` looks like `local@domain.tld`.
///
/// This is intentionally permissive and does not follow the RFC.
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_REGEX.is_match(value.trim())
}

/// Returns `true` if the number of characters in the trimmed `value` is at
/// least `min` and, if given, at most `max`.
pub fn is_valid_length(value: &str, min: usize, max: Option<usize>) -> bool {
    let length = value.trim().chars().count();
    length >= min && max.is_none_or(|max| length <= max)
}

/// Trims `value` and strips all angle brackets.
pub fn sanitize_string(value: &str) -> String {
    value.trim().replace(['<', '>'], "")
}

/// Returns `true` if `value` is non-empty and consists only of latin letters
/// (including accented ones), digits, whitespace and common punctuation.
pub fn is_valid_text(value: &str) -> bool {
    TEXT_REGEX.is_match(value)
}
