//! Low-level byte-by-byte parser for ASCII text.
//!
//! This module provides [ByteParser], an in-memory cursor with support for
//! peeking, consuming, `[...]` comment skipping and quote-aware label parsing.
//! It is the foundation of the Newick importer; control-file lines are
//! handled by the cheaper [fields](crate::parser::fields) validators instead.

use crate::parser::parsing_error::ParsingError;

/// Whitespace bytes skipped between tokens.
const WHITESPACE: &[u8] = b" \t\n\r";

// =#========================================================================#=
// BYTE PARSER
// =#========================================================================#=
/// A byte-by-byte parser over an owned buffer.
///
/// # Example
/// ```
/// use bppctl::parser::ByteParser;
///
/// let mut parser = ByteParser::for_str("  [comment] (A,B);");
/// parser.skip_comment_and_whitespace().unwrap();
/// assert!(parser.consume_if(b'('));
/// assert_eq!(parser.parse_label(b",)").unwrap(), "A");
/// ```
pub struct ByteParser {
    input: Vec<u8>,
    pos: usize,
}

impl ByteParser {
    /// Creates a new [ByteParser] from a string slice by copying it.
    pub fn for_str(input: &str) -> Self {
        Self::from_bytes(input.as_bytes())
    }

    /// Creates a new [ByteParser] from a byte slice by copying it.
    pub fn from_bytes(input: &[u8]) -> Self {
        Self {
            input: input.to_vec(),
            pos: 0,
        }
    }

    /// Peeks at the current byte without consuming it.
    #[inline(always)]
    pub fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    /// Gets the current byte and advances the position.
    #[inline(always)]
    pub fn next_byte(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.pos += 1;
        Some(byte)
    }

    /// Returns `true` if the current byte is `ch`.
    pub fn peek_is(&self, ch: u8) -> bool {
        self.peek() == Some(ch)
    }

    /// Consumes the current byte if it is `ch`.
    ///
    /// # Returns
    /// `true` if the byte was matched and consumed, `false` otherwise
    pub fn consume_if(&mut self, ch: u8) -> bool {
        if self.peek_is(ch) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Consumes bytes up to and including `target`.
    ///
    /// # Returns
    /// `true` if the target was found, `false` if EOF was reached first
    pub fn consume_until(&mut self, target: u8) -> bool {
        while let Some(b) = self.next_byte() {
            if b == target {
                return true;
            }
        }
        false
    }

    /// Skips all consecutive whitespace characters.
    pub fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(|b| WHITESPACE.contains(&b)) {
            self.pos += 1;
        }
    }

    /// Skips a `[...]` comment if present.
    ///
    /// # Returns
    /// * `Ok(true)` - A comment was found and consumed
    /// * `Ok(false)` - No comment at current position
    /// * `Err(ParsingError)` - Comment was opened but never closed
    pub fn skip_comment(&mut self) -> Result<bool, ParsingError> {
        if !self.consume_if(b'[') {
            return Ok(false);
        }
        if !self.consume_until(b']') {
            return Err(ParsingError::unclosed_comment(self));
        }
        Ok(true)
    }

    /// Skips all consecutive whitespace and `[...]` comments.
    pub fn skip_comment_and_whitespace(&mut self) -> Result<(), ParsingError> {
        self.skip_whitespace();
        while self.skip_comment()? {
            self.skip_whitespace();
        }
        Ok(())
    }

    /// Returns whether the end of data has been reached.
    pub fn is_eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// Returns the current byte offset in the input.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Returns up to `k` bytes from the current position as a (lossy) string,
    /// for error context.
    pub fn get_context_as_string(&self, k: usize) -> String {
        let end = (self.pos + k).min(self.input.len());
        String::from_utf8_lossy(&self.input[self.pos.min(end)..end]).into_owned()
    }

    /// Parses a label (quoted or unquoted), skipping leading whitespace and comments.
    ///
    /// # Arguments
    /// * `delimiters` - Bytes that end an unquoted label
    pub fn parse_label(&mut self, delimiters: &[u8]) -> Result<String, ParsingError> {
        self.skip_comment_and_whitespace()?;

        if self.peek_is(b'\'') {
            self.parse_quoted_label()
        } else {
            Ok(self.parse_unquoted_label(delimiters))
        }
    }

    /// Parses a label enclosed in single quotes, where `''` stands for one quote.
    ///
    /// # Errors
    /// Returns an error if the closing quote is missing.
    pub fn parse_quoted_label(&mut self) -> Result<String, ParsingError> {
        self.next_byte(); // opening '

        let mut label = Vec::new();
        loop {
            match self.next_byte() {
                Some(b'\'') if self.peek_is(b'\'') => {
                    label.push(b'\'');
                    self.pos += 1;
                }
                Some(b'\'') => break,
                Some(b) => label.push(b),
                None => {
                    return Err(ParsingError::invalid_newick_string(
                        self,
                        "Unterminated quoted label".to_string(),
                    ));
                }
            }
        }

        Ok(String::from_utf8_lossy(&label).into_owned())
    }

    /// Parses an unquoted label until any of the given delimiters or EOF.
    pub fn parse_unquoted_label(&mut self, delimiters: &[u8]) -> String {
        let start = self.pos;
        while self.peek().is_some_and(|b| !delimiters.contains(&b)) {
            self.pos += 1;
        }
        String::from_utf8_lossy(&self.input[start..self.pos]).into_owned()
    }

    /// Consumes the longest run of bytes that may form a float literal
    /// (digits, `.`, sign, exponent marker) and returns it.
    pub fn take_number_token(&mut self) -> String {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|b| b.is_ascii_digit() || matches!(b, b'.' | b'-' | b'+' | b'e' | b'E'))
        {
            self.pos += 1;
        }
        String::from_utf8_lossy(&self.input[start..self.pos]).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skip_nested_whitespace_and_comments() {
        let mut parser = ByteParser::for_str(" \n[one] [two]\t X");
        parser.skip_comment_and_whitespace().unwrap();
        assert_eq!(parser.peek(), Some(b'X'));
    }

    #[test]
    fn test_unclosed_comment() {
        let mut parser = ByteParser::for_str("[never closed");
        assert!(parser.skip_comment().is_err());
    }

    #[test]
    fn test_quoted_label_with_escaped_quote() {
        let mut parser = ByteParser::for_str("'Baillon''s Crake':1");
        assert_eq!(parser.parse_label(b":").unwrap(), "Baillon's Crake");
        assert_eq!(parser.peek(), Some(b':'));
    }

    #[test]
    fn test_unterminated_quoted_label() {
        let mut parser = ByteParser::for_str("'Pukeko");
        assert!(parser.parse_label(b":").is_err());
    }

    #[test]
    fn test_number_token_stops_at_delimiter() {
        let mut parser = ByteParser::for_str("1.5e-3,B");
        assert_eq!(parser.take_number_token(), "1.5e-3");
        assert!(parser.consume_if(b','));
    }
}
