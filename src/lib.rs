//! bppctl reads BPP control files and handles the rooted binary species
//! trees they declare.
//!
//! Core functionality provided:
//! - Control files: a single-pass interpreter turns a `key = value` control
//!   file into a typed [ControlConfig](control::ControlConfig), with fixed
//!   defaults for absent options and line-numbered errors for malformed ones.
//!   See [crate::control].
//! - Species trees: the `species&tree` record captures the declared species
//!   and the species tree as Newick text, which can be turned into a
//!   [RootedTree](model::RootedTree).
//! - Tree model: an arena-based rooted binary tree with optional internal
//!   labels and branch lengths, predicate-driven preorder/postorder traversal
//!   and ASCII rendering. See [crate::model].
//! - Newick: reading and writing Newick strings, optionally formatting every
//!   node with a callback. See [crate::newick].
//!
//! Limitations:
//! - Only binary trees
//! - The ignored middle line of `species&tree` is not validated
//!
//! # Example
//!
//! Load a control file and build its species tree:
//! ```no_run
//! use bppctl::load_control_file;
//! use bppctl::model::ShowOptions;
//!
//! let config = load_control_file("A00.bpp.ctl")?;
//! if let Some(tree) = config.build_species_tree() {
//!     tree?.show_ascii(ShowOptions::LABEL | ShowOptions::BRANCH_LENGTH);
//! }
//! # Ok::<(), bppctl::parser::ParsingError>(())
//! ```
//!
//! Parse a control file held in memory:
//! ```
//! use bppctl::parse_control_str;
//!
//! let config = parse_control_str("species&tree = 2 A B\n 1 1\n(A:1,B:1);\n").unwrap();
//! let record = config.species_and_tree.unwrap();
//! assert_eq!(record.reorder.to_string(), "A,B");
//! assert_eq!(record.newick, "(A:1,B:1);");
//! ```

pub mod control;
pub mod model;
pub mod newick;
pub mod parser;

use crate::control::{ControlConfig, ControlFileParser};
use crate::model::RootedTree;
use crate::parser::parsing_error::ParsingError;
use std::path::Path;

// ============================================================================
// Quick control-file API
// ============================================================================
/// Loads the control file at `path` with [ControlFileParser].
pub fn load_control_file<P: AsRef<Path>>(path: P) -> Result<ControlConfig, ParsingError> {
    ControlFileParser::for_file(path)?.parse()
}

/// Interprets control-file text held in memory.
pub fn parse_control_str<S: AsRef<str>>(text: S) -> Result<ControlConfig, ParsingError> {
    ControlFileParser::new(text.as_ref().as_bytes(), "<string>").parse()
}

// ============================================================================
// Quick Newick API
// ============================================================================
/// Parse a Newick string using default settings, returning a [RootedTree].
///
/// See [`newick::parse_str`] for full documentation of this convenience function.
pub fn parse_newick_str<S: AsRef<str>>(newick: S) -> Result<RootedTree, ParsingError> {
    newick::parse_str(newick)
}
