//! Low-level parsing building blocks.
//!
//! * [LineReader] - line-at-a-time reading of control files
//! * [fields] - typed field validators for `key = value` lines
//! * [ByteParser] - byte cursor used by the Newick importer
//! * [ParsingError] - the error type shared by all parsers of this crate

pub mod byte_parser;
pub mod fields;
pub mod line_reader;
pub mod parsing_error;

pub use byte_parser::ByteParser;
pub use line_reader::LineReader;
pub use parsing_error::{Location, ParsingError, ParsingErrorType};
