//! Splits a control-file line into key and value.

/// Whitespace skipped before a key and trimmed after it.
const WHITESPACE: &[char] = &[' ', '\t', '\r', '\n'];

/// What a single control-file line holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// Empty, whitespace only, or a `*`/`#` comment.
    Blank,
    /// `key = value`; `key` has surrounding whitespace removed, `value` is
    /// everything after the first `=`, untouched.
    KeyValue { key: &'a str, value: &'a str },
    /// Non-blank line without a `=`.
    Malformed,
}

/// Classifies one line.
///
/// # Examples
/// ```
/// use bppctl::control::{classify, LineKind};
///
/// assert_eq!(classify("   * comment"), LineKind::Blank);
/// assert_eq!(
///     classify("  burnin = 2000 # short run"),
///     LineKind::KeyValue { key: "burnin", value: " 2000 # short run" }
/// );
/// assert_eq!(classify("burnin 2000"), LineKind::Malformed);
/// ```
pub fn classify(line: &str) -> LineKind<'_> {
    let rest = line.trim_start_matches(WHITESPACE);
    if rest.is_empty() || rest.starts_with(['*', '#']) {
        return LineKind::Blank;
    }

    match rest.split_once('=') {
        Some((key, value)) => LineKind::KeyValue {
            key: key.trim_end_matches(WHITESPACE),
            value,
        },
        None => LineKind::Malformed,
    }
}
