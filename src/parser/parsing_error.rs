//! Error types for control-file and Newick parsing.
//!
//! This module provides [ParsingError] and [ParsingErrorType]. Every error is
//! fatal to the parse that produced it; the [Location] attached to it tells
//! the user where to look: a line of the control file, a byte offset in a
//! Newick string, or just the file that could not be opened.

use crate::parser::byte_parser::ByteParser;
use std::fmt;
use thiserror::Error;

/// Default length of context provided by error from byte parser
const DEFAULT_CONTEXT_LENGTH: usize = 50;

// =#========================================================================#=
// PARSING ERROR TYPE
// =#========================================================================€=
/// Error types that can occur while reading a control file or a Newick string.
#[derive(Error, PartialEq, Debug, Clone)]
pub enum ParsingErrorType {
    /// File could not be opened or read.
    #[error("IO error - {0}")]
    IoError(String),

    /// Non-blank, non-comment line without a `=`.
    #[error("Line does not contain a '=' character")]
    MissingAssignment,

    /// A recognized option whose value does not match its record grammar.
    #[error("Option '{option}' {expected}")]
    InvalidOption {
        option: String,
        expected: &'static str,
    },

    /// `arch` names an unknown instruction set.
    #[error("Invalid instruction set ({0})")]
    InvalidArch(String),

    /// A recognized option that is deliberately rejected.
    #[error("Not implemented ({0})")]
    NotImplemented(String),

    /// End of file before both continuation lines of `species&tree` were read.
    #[error("Incomplete 'species&tree' record")]
    IncompleteSpeciesAndTree,

    /// Third line of `species&tree` is blank or comment-only.
    #[error("Expected newick tree string in 'species&tree'")]
    MissingNewick,

    /// Species tree leaves disagree with the declared species.
    #[error("Species tree does not match 'species&tree' declaration - {0}")]
    SpeciesMismatch(String),

    #[error("Unclosed comment")]
    UnclosedComment,

    #[error("Invalid newick string: {0}")]
    InvalidNewickString(String),
}

// =#========================================================================#=
// LOCATION
// =#========================================================================€=
/// Where an error was detected.
#[derive(PartialEq, Debug, Clone)]
pub enum Location {
    /// 1-based line of a named control file
    Line { file: String, line: usize },
    /// Byte offset into a Newick string, with the text following it
    Byte { position: usize, context: String },
    /// Whole file, e.g. when it cannot be opened
    File(String),
    Unknown,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Line { file, line } => write!(f, " (line {line} of {file})"),
            Location::Byte { position, context } => {
                write!(f, " at position {position}")?;
                if !context.is_empty() {
                    write!(f, "\n  Context (next {} bytes): {}", context.len(), context)?;
                }
                Ok(())
            }
            Location::File(file) => write!(f, " ({file})"),
            Location::Unknown => Ok(()),
        }
    }
}

// =#========================================================================#=
// PARSING ERROR
// =#========================================================================$=
/// Parsing error with its [Location].
#[derive(Error, PartialEq, Debug, Clone)]
#[error("{kind}{location}")]
pub struct ParsingError {
    kind: ParsingErrorType,
    location: Location,
}

impl ParsingError {
    /// Creates an error at a line of a control file.
    pub fn at_line(kind: ParsingErrorType, file: &str, line: usize) -> Self {
        Self {
            kind,
            location: Location::Line {
                file: file.to_string(),
                line,
            },
        }
    }

    /// Creates an error from the current state of a [ByteParser].
    pub fn from_parser(kind: ParsingErrorType, parser: &ByteParser) -> Self {
        Self {
            kind,
            location: Location::Byte {
                position: parser.position(),
                context: parser.get_context_as_string(DEFAULT_CONTEXT_LENGTH),
            },
        }
    }

    /// Creates an error without any location.
    pub fn without_context(kind: ParsingErrorType) -> Self {
        Self {
            kind,
            location: Location::Unknown,
        }
    }

    /// Wraps an I/O failure concerning the named file.
    pub fn io(file: &str, err: std::io::Error) -> Self {
        Self {
            kind: ParsingErrorType::IoError(err.to_string()),
            location: Location::File(file.to_string()),
        }
    }

    /// Convenience constructor for InvalidOption
    pub fn invalid_option(option: &str, expected: &'static str, file: &str, line: usize) -> Self {
        Self::at_line(
            ParsingErrorType::InvalidOption {
                option: option.to_string(),
                expected,
            },
            file,
            line,
        )
    }

    /// Convenience constructor for UnclosedComment
    pub fn unclosed_comment(parser: &ByteParser) -> Self {
        Self::from_parser(ParsingErrorType::UnclosedComment, parser)
    }

    /// Convenience constructor for InvalidNewickString
    pub fn invalid_newick_string(parser: &ByteParser, msg: String) -> Self {
        Self::from_parser(ParsingErrorType::InvalidNewickString(msg), parser)
    }

    /// Get the error kind
    pub fn kind(&self) -> &ParsingErrorType {
        &self.kind
    }

    /// Get the location where the error occurred
    pub fn location(&self) -> &Location {
        &self.location
    }

    /// Returns the 1-based control-file line, if the error has one.
    pub fn line(&self) -> Option<usize> {
        match self.location {
            Location::Line { line, .. } => Some(line),
            _ => None,
        }
    }
}
