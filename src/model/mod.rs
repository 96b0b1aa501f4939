//! Rooted binary tree model.
//!
//! [RootedTree] owns its [Node]s in an arena and refers to them by
//! [NodeIndex]. On top of it this module provides predicate-driven
//! traversal ([RootedTree::traverse]) and ASCII rendering ([render_ascii]).
//! Newick reading and writing live in [crate::newick].

/// ASCII-art rendering
pub mod ascii;
/// Node type of rooted binary trees
pub mod node;
/// Preorder and postorder traversal
pub mod traversal;
/// The tree arena
pub mod tree;

pub use ascii::{ShowOptions, render_ascii};
pub use node::{Node, NodeIndex};
pub use traversal::TraversalOrder;
pub use tree::{RootedTree, TreeError};
