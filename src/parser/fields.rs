//! Typed field validators for control-file values.
//!
//! A value is the text following `=` on an option line. Each validator looks
//! at a prefix of it: leading whitespace is skipped, the token ends at the
//! first whitespace, `*` or `#`, and the whole token must parse as the
//! requested type. Validators report how many bytes they consumed, so a
//! record grammar can walk through a value field by field; [ValueCursor]
//! wraps that bookkeeping.
//!
//! `*` and `#` start a comment that runs to the end of the line.

/// Whitespace recognized between fields.
const WHITESPACE: &[u8] = b" \t\r\n";

/// Bytes that start a comment.
const COMMENT_MARKERS: &[u8] = b"*#";

/// Outcome of [get_e], the single-letter `E` flag validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flag {
    /// Remainder is blank or a comment.
    Absent,
    /// A lone `E`/`e` token.
    Present,
    /// Some other token.
    Invalid,
}

/// Number of leading whitespace bytes of `text`.
fn whitespace_len(text: &str) -> usize {
    text.bytes().take_while(|b| WHITESPACE.contains(b)).count()
}

/// Returns `true` if `text` is empty, whitespace only, or a comment after
/// optional whitespace.
///
/// # Examples
/// ```
/// use bppctl::parser::fields::is_blank;
///
/// assert!(is_blank("   "));
/// assert!(is_blank("  * trailing comment"));
/// assert!(is_blank("# comment"));
/// assert!(!is_blank(" 3"));
/// ```
pub fn is_blank(text: &str) -> bool {
    let rest = &text.as_bytes()[whitespace_len(text)..];
    rest.first().is_none_or(|b| COMMENT_MARKERS.contains(b))
}

/// Splits off the next token: `(whitespace_len, token)`, or `None` if the
/// remainder is blank.
fn next_token(text: &str) -> Option<(usize, &str)> {
    if is_blank(text) {
        return None;
    }
    let ws = whitespace_len(text);
    let rest = &text[ws..];
    let end = rest
        .bytes()
        .position(|b| WHITESPACE.contains(&b) || COMMENT_MARKERS.contains(&b))
        .unwrap_or(rest.len());
    Some((ws, &rest[..end]))
}

/// Parses an integer token.
///
/// # Returns
/// `Some((consumed, value))`, or `None` if the remainder is blank or the token
/// is not entirely an integer.
///
/// # Examples
/// ```
/// use bppctl::parser::fields::get_long;
///
/// assert_eq!(get_long("  42 rest"), Some((4, 42)));
/// assert_eq!(get_long("-1#c"), Some((2, -1)));
/// assert_eq!(get_long("4x"), None);
/// assert_eq!(get_long(" * 4"), None);
/// ```
pub fn get_long(text: &str) -> Option<(usize, i64)> {
    let (ws, token) = next_token(text)?;
    let value = token.parse::<i64>().ok()?;
    Some((ws + token.len(), value))
}

/// Parses a floating point token.
///
/// # Examples
/// ```
/// use bppctl::parser::fields::get_double;
///
/// assert_eq!(get_double(" 0.001 5"), Some((6, 0.001)));
/// assert_eq!(get_double("2e-3"), Some((4, 0.002)));
/// assert_eq!(get_double("0.1.2"), None);
/// ```
pub fn get_double(text: &str) -> Option<(usize, f64)> {
    let (ws, token) = next_token(text)?;
    let value = token.parse::<f64>().ok()?;
    Some((ws + token.len(), value))
}

/// Parses a string: everything up to the first comment marker, with the
/// surrounding whitespace removed. Inner whitespace is kept.
///
/// # Examples
/// ```
/// use bppctl::parser::fields::get_string;
///
/// assert_eq!(get_string("  my file.txt  * note"), Some((13, "my file.txt")));
/// assert_eq!(get_string("   # nothing"), None);
/// ```
pub fn get_string(text: &str) -> Option<(usize, &str)> {
    if is_blank(text) {
        return None;
    }
    let ws = whitespace_len(text);
    let rest = &text[ws..];
    let end = rest
        .bytes()
        .position(|b| COMMENT_MARKERS.contains(&b))
        .unwrap_or(rest.len());
    let value = rest[..end].trim_end_matches(|c: char| c.is_ascii() && WHITESPACE.contains(&(c as u8)));
    Some((ws + value.len(), value))
}

/// Checks for the single-letter `E` flag.
///
/// Absence (blank remainder) and a wrong token are told apart, since only
/// the latter is an error for the caller.
///
/// # Returns
/// The consumed length (0 unless [Flag::Present]) and the [Flag].
///
/// # Examples
/// ```
/// use bppctl::parser::fields::{get_e, Flag};
///
/// assert_eq!(get_e(" e"), (2, Flag::Present));
/// assert_eq!(get_e("  "), (0, Flag::Absent));
/// assert_eq!(get_e(" EE"), (0, Flag::Invalid));
/// ```
pub fn get_e(text: &str) -> (usize, Flag) {
    match next_token(text) {
        None => (0, Flag::Absent),
        Some((ws, token)) if token.eq_ignore_ascii_case("e") => (ws + token.len(), Flag::Present),
        Some(_) => (0, Flag::Invalid),
    }
}

// =#========================================================================#=
// VALUE CURSOR
// =#========================================================================$=
/// Cursor over one value string, advanced by successful field reads.
///
/// A failed read leaves the cursor where it was.
#[derive(Debug, Clone)]
pub struct ValueCursor<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> ValueCursor<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    /// Text not consumed yet.
    pub fn rest(&self) -> &'a str {
        &self.text[self.pos..]
    }

    /// Current byte offset into the value.
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn long(&mut self) -> Option<i64> {
        let (consumed, value) = get_long(self.rest())?;
        self.pos += consumed;
        Some(value)
    }

    pub fn double(&mut self) -> Option<f64> {
        let (consumed, value) = get_double(self.rest())?;
        self.pos += consumed;
        Some(value)
    }

    pub fn string(&mut self) -> Option<&'a str> {
        let (consumed, value) = get_string(self.rest())?;
        self.pos += consumed;
        Some(value)
    }

    pub fn e_flag(&mut self) -> Flag {
        let (consumed, flag) = get_e(self.rest());
        self.pos += consumed;
        flag
    }

    pub fn skip_whitespace(&mut self) {
        self.pos += whitespace_len(self.rest());
    }

    /// Consumes `ch` if it is the next byte, without skipping whitespace.
    pub fn consume_char(&mut self, ch: u8) -> bool {
        if self.rest().as_bytes().first() == Some(&ch) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Returns `true` if only whitespace or a comment is left.
    pub fn is_exhausted(&self) -> bool {
        is_blank(self.rest())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_bounded_by_comment() {
        assert_eq!(get_long("12*comment"), Some((2, 12)));
        assert_eq!(get_double("1.5#x"), Some((3, 1.5)));
    }

    #[test]
    fn test_trailing_garbage_fails() {
        assert_eq!(get_long("12a"), None);
        assert_eq!(get_double("1.5x"), None);
        assert_eq!(get_long("1.0"), None);
    }

    #[test]
    fn test_signed_values() {
        assert_eq!(get_long("+7"), Some((2, 7)));
        assert_eq!(get_double("-0.5"), Some((4, -0.5)));
    }

    #[test]
    fn test_string_keeps_inner_spaces() {
        assert_eq!(get_string("\tdata/seqs one.txt\r"), Some((18, "data/seqs one.txt")));
        assert_eq!(get_string(""), None);
    }

    #[test]
    fn test_e_flag_variants() {
        assert_eq!(get_e("E"), (1, Flag::Present));
        assert_eq!(get_e(" E # estimate"), (2, Flag::Present));
        assert_eq!(get_e(" X"), (0, Flag::Invalid));
        assert_eq!(get_e(" * E"), (0, Flag::Absent));
    }

    #[test]
    fn test_cursor_walks_fields() {
        let mut cursor = ValueCursor::new(" 2.0 3 E * done");
        assert_eq!(cursor.double(), Some(2.0));
        assert_eq!(cursor.long(), Some(3));
        assert_eq!(cursor.e_flag(), Flag::Present);
        assert!(cursor.is_exhausted());
    }

    #[test]
    fn test_cursor_failed_read_does_not_advance() {
        let mut cursor = ValueCursor::new(" x 1");
        assert_eq!(cursor.long(), None);
        assert_eq!(cursor.position(), 0);
        assert!(!cursor.is_exhausted());
    }

    #[test]
    fn test_cursor_consume_char() {
        let mut cursor = ValueCursor::new("1 :5");
        assert!(cursor.consume_char(b'1'));
        assert!(!cursor.consume_char(b':'));
        cursor.skip_whitespace();
        assert!(cursor.consume_char(b':'));
        assert_eq!(cursor.long(), Some(5));
    }
}
