//! Line-at-a-time reader for control files.
//!
//! This module provides [LineReader], which wraps any [Read] in a
//! [BufReader] and hands out one logical line at a time. Lines can be of any
//! length: bytes are copied chunk by chunk from the reader's fixed-size buffer
//! into an owned buffer that grows as needed.

use crate::parser::parsing_error::ParsingError;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;

// =#========================================================================#=
// LINE READER
// =#========================================================================$=
/// A line reader over a byte stream.
///
/// The trailing `\n` of each line is stripped; a last line without a newline
/// is still returned. The reader counts the lines it has returned, so callers
/// can report 1-based line numbers.
///
/// # Example
/// ```
/// use bppctl::parser::LineReader;
///
/// let mut reader = LineReader::new("seed = 1\nburnin = 10".as_bytes());
/// assert_eq!(reader.next_line().unwrap(), Some("seed = 1"));
/// assert_eq!(reader.next_line().unwrap(), Some("burnin = 10"));
/// assert_eq!(reader.line_number(), 2);
/// assert_eq!(reader.next_line().unwrap(), None);
/// ```
pub struct LineReader<R: Read> {
    /// Underlying reader, hands out chunks of at most `CHUNK_SIZE` bytes
    reader: BufReader<R>,

    /// Raw bytes of the current line
    buffer: Vec<u8>,

    /// Decoded current line
    line: String,

    /// Number of lines returned so far
    line_number: usize,
}

impl LineReader<File> {
    /// Opens the file at `path` for line reading.
    ///
    /// # Errors
    /// Returns an IO error naming the file if it cannot be opened.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ParsingError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| ParsingError::io(&path.display().to_string(), e))?;
        Ok(Self::new(file))
    }
}

impl<R: Read> LineReader<R> {
    /// Size of the chunks read from the underlying stream.
    const CHUNK_SIZE: usize = 4096;

    /// Creates a new line reader over `reader`.
    pub fn new(reader: R) -> Self {
        Self {
            reader: BufReader::with_capacity(Self::CHUNK_SIZE, reader),
            buffer: Vec::with_capacity(Self::CHUNK_SIZE),
            line: String::new(),
            line_number: 0,
        }
    }

    /// Reads the next line.
    ///
    /// # Returns
    /// * `Ok(Some(line))` - The next line without its trailing newline
    /// * `Ok(None)` - End of stream, no bytes left
    /// * `Err(io::Error)` - The underlying stream failed; the caller knows
    ///   which file and line to report
    pub fn next_line(&mut self) -> io::Result<Option<&str>> {
        self.buffer.clear();
        let mut saw_newline = false;

        loop {
            let chunk = self.reader.fill_buf()?;
            if chunk.is_empty() {
                break;
            }

            match chunk.iter().position(|&b| b == b'\n') {
                Some(end) => {
                    self.buffer.extend_from_slice(&chunk[..end]);
                    self.reader.consume(end + 1);
                    saw_newline = true;
                    break;
                }
                None => {
                    let len = chunk.len();
                    self.buffer.extend_from_slice(chunk);
                    self.reader.consume(len);
                }
            }
        }

        if !saw_newline && self.buffer.is_empty() {
            return Ok(None);
        }

        self.line_number += 1;
        self.line.clear();
        self.line.push_str(&String::from_utf8_lossy(&self.buffer));
        Ok(Some(self.line.as_str()))
    }

    /// Returns the 1-based number of the line last returned (0 before the first).
    pub fn line_number(&self) -> usize {
        self.line_number
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_line_without_newline() {
        let mut reader = LineReader::new("a\nb".as_bytes());
        assert_eq!(reader.next_line().unwrap(), Some("a"));
        assert_eq!(reader.next_line().unwrap(), Some("b"));
        assert_eq!(reader.next_line().unwrap(), None);
        assert_eq!(reader.line_number(), 2);
    }

    #[test]
    fn test_empty_lines_are_lines() {
        let mut reader = LineReader::new("\n\nx\n".as_bytes());
        assert_eq!(reader.next_line().unwrap(), Some(""));
        assert_eq!(reader.next_line().unwrap(), Some(""));
        assert_eq!(reader.next_line().unwrap(), Some("x"));
        assert_eq!(reader.next_line().unwrap(), None);
        assert_eq!(reader.line_number(), 3);
    }

    #[test]
    fn test_empty_stream() {
        let mut reader = LineReader::new("".as_bytes());
        assert_eq!(reader.next_line().unwrap(), None);
        assert_eq!(reader.line_number(), 0);
    }

    #[test]
    fn test_line_longer_than_chunk() {
        let long = "x".repeat(3 * 4096 + 17);
        let input = format!("{long}\nshort\n");
        let mut reader = LineReader::new(input.as_bytes());
        assert_eq!(reader.next_line().unwrap().map(str::len), Some(long.len()));
        assert_eq!(reader.next_line().unwrap(), Some("short"));
    }

    #[test]
    fn test_carriage_return_is_kept() {
        let mut reader = LineReader::new("seed = 1\r\n".as_bytes());
        assert_eq!(reader.next_line().unwrap(), Some("seed = 1\r"));
    }

    #[test]
    fn test_missing_file() {
        let result = LineReader::from_file("tests/fixtures/does_not_exist.ctl");
        assert!(result.is_err());
    }
}
