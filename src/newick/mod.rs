//! Newick format parser and writer for rooted binary trees.
//!
//! This module provides [`NewickParser`] to turn Newick strings into
//! [`RootedTree`]s, e.g. the species tree captured from a `species&tree`
//! record, and [`to_newick`]/[`to_newick_with`] to write them back.
//!
//! # Quick API
//! * [`parse_str`] - parses a single string, returns a [`RootedTree`]
//!
//! # Format
//! The Newick format has the following simple grammar:
//! * `tree ::= node ';'`
//! * `node ::= leaf | internal_node`
//! * `internal_node ::= '(' node ',' node ')' [label] [branch_length]`
//! * `leaf ::= label [branch_length]`
//! * `branch_length ::= ':' number`
//!
//! Furthermore:
//! * Whitespace can occur between elements,
//!   just not within an unquoted label or a branch_length
//! * Labels may be single-quoted, with `''` standing for a quote
//! * Comments are square brackets and can occur anywhere whitespace is allowed;
//!   annotations such as `A[&pop_size=0.5]:2.1` are skipped as comments

mod defs;
mod parser;
mod writer;

pub use self::parser::NewickParser;
pub use self::writer::{to_newick, to_newick_with};

use crate::model::RootedTree;
use crate::parser::ByteParser;
use crate::parser::ParsingError;

/// Parses a single Newick string to obtain a [`RootedTree`].
///
/// # Example
/// ```
/// use bppctl::newick::parse_str;
///
/// let tree = parse_str("((A:1,B:1):1,C:2):0;").unwrap();
/// assert_eq!(tree.leaf_labels(), vec!["A", "B", "C"]);
/// ```
pub fn parse_str<S: AsRef<str>>(newick: S) -> Result<RootedTree, ParsingError> {
    let mut byte_parser = ByteParser::for_str(newick.as_ref());
    NewickParser::new().parse(&mut byte_parser)
}
