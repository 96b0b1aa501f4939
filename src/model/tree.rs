//! Rooted binary tree stored as an arena of [Node]s.
//!
//! Provides [RootedTree], the in-memory form of a species tree, and
//! [TreeError], the error type of tree operations.

use crate::model::node::{Node, NodeIndex};
use crate::newick;
use thiserror::Error;

/// Errors of operations on a [RootedTree].
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeError {
    /// The tree has not been given a root yet.
    #[error("tree has no root")]
    RootNotSet,
    /// Operation requires an internal node but got a leaf.
    #[error("node {0} is a leaf, expected an internal node")]
    RootIsLeaf(NodeIndex),
    /// Index does not refer to a node of the tree.
    #[error("no node with index {0}")]
    InvalidNode(NodeIndex),
}

// =$========================================================================$=
// TREE
// =$========================================================================$=
/// A rooted, strictly binary tree using the arena pattern on [Node].
///
/// The tree owns all its nodes; children are referenced by [NodeIndex].
/// Dropping the tree releases every node.
///
/// # Construction
/// Add leaves first, then internal nodes on top of them (bottom-up), and
/// finally the root via [add_root](Self::add_root). A tree consisting of a
/// single leaf is rooted with [set_root](Self::set_root).
/// Test validity with [`RootedTree::is_valid()`].
///
/// # Example
/// ```
/// use bppctl::model::RootedTree;
///
/// let mut tree = RootedTree::new(3);
/// let a = tree.add_leaf("A", 1.0);
/// let b = tree.add_leaf("B", 1.0);
/// let c = tree.add_leaf("C", 2.0);
/// let ab = tree.add_internal((a, b), None, 1.0);
/// tree.add_root((ab, c), None, 0.0);
///
/// assert!(tree.is_valid());
/// assert_eq!(tree.num_leaves(), 3);
/// assert_eq!(tree.leaf_labels(), vec!["A", "B", "C"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RootedTree {
    /// Nodes of this tree (arena pattern)
    nodes: Vec<Node>,

    /// Index of the root, once set
    root_index: Option<NodeIndex>,
}

// ============================================================================
// Construction
// ============================================================================
impl RootedTree {
    /// Creates a new tree with capacity for a binary tree with `num_leaves` leaves.
    pub fn new(num_leaves: usize) -> Self {
        let capacity = (2 * num_leaves).saturating_sub(1);
        RootedTree {
            nodes: Vec::with_capacity(capacity),
            root_index: None,
        }
    }

    /// Adds a leaf and returns its index.
    pub fn add_leaf<S: Into<String>>(&mut self, label: S, branch_length: f64) -> NodeIndex {
        let index = self.nodes.len();
        self.nodes
            .push(Node::new_leaf(index, label.into(), branch_length));
        index
    }

    /// Adds an internal node above two existing nodes and returns its index.
    ///
    /// # Panics
    /// Panics if a child index is out of bounds.
    pub fn add_internal(
        &mut self,
        children: (NodeIndex, NodeIndex),
        label: Option<String>,
        branch_length: f64,
    ) -> NodeIndex {
        let index = self.nodes.len();
        self.nodes
            .push(Node::new_internal(index, children, label, branch_length));

        self[children.0].set_parent(index);
        self[children.1].set_parent(index);

        index
    }

    /// Adds an internal node and makes it the root.
    ///
    /// # Panics
    /// Panics if a child index is out of bounds.
    pub fn add_root(
        &mut self,
        children: (NodeIndex, NodeIndex),
        label: Option<String>,
        branch_length: f64,
    ) -> NodeIndex {
        let index = self.add_internal(children, label, branch_length);
        self.root_index = Some(index);
        index
    }

    /// Makes an existing node the root, e.g. the only leaf of a one-node tree.
    pub fn set_root(&mut self, index: NodeIndex) -> Result<(), TreeError> {
        if index >= self.nodes.len() {
            return Err(TreeError::InvalidNode(index));
        }
        self.root_index = Some(index);
        Ok(())
    }
}

// ============================================================================
// Getters / Accessors
// ============================================================================
impl RootedTree {
    /// Returns whether the root has been set.
    pub fn is_root_set(&self) -> bool {
        self.root_index.is_some()
    }

    /// Returns the index of the root.
    pub fn root_index(&self) -> Result<NodeIndex, TreeError> {
        self.root_index.ok_or(TreeError::RootNotSet)
    }

    /// Returns the root node.
    pub fn root(&self) -> Result<&Node, TreeError> {
        Ok(&self[self.root_index()?])
    }

    /// Returns a reference to the node at the given index.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn node(&self, index: NodeIndex) -> &Node {
        &self[index]
    }

    /// Returns the node at the given index, or `None` if out of bounds.
    pub fn get(&self, index: NodeIndex) -> Option<&Node> {
        self.nodes.get(index)
    }

    /// Returns a mutable reference to the node at the given index.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn node_mut(&mut self, index: NodeIndex) -> &mut Node {
        &mut self.nodes[index]
    }

    /// Returns all nodes in arena order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Returns the number of leaves in this tree.
    pub fn num_leaves(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_leaf()).count()
    }

    /// Returns the number of internal nodes (root included) in this tree.
    pub fn num_internal(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_internal()).count()
    }

    /// Returns the number of nodes in this tree.
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the leaf labels from left to right.
    pub fn leaf_labels(&self) -> Vec<&str> {
        let mut labels = Vec::new();
        let mut stack: Vec<NodeIndex> = self.root_index.into_iter().collect();

        while let Some(index) = stack.pop() {
            match &self[index] {
                Node::Leaf { label, .. } => labels.push(label.as_str()),
                Node::Internal {
                    children: (left, right),
                    ..
                } => {
                    stack.push(*right);
                    stack.push(*left);
                }
            }
        }

        labels
    }

    /// Returns the number of edges on the longest root-to-leaf path
    /// (0 for a single leaf or an unrooted tree).
    pub fn max_depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack: Vec<(NodeIndex, usize)> =
            self.root_index.map(|root| (root, 0)).into_iter().collect();

        while let Some((index, depth)) = stack.pop() {
            max_depth = max_depth.max(depth);
            if let Some((left, right)) = self[index].children() {
                stack.push((left, depth + 1));
                stack.push((right, depth + 1));
            }
        }

        max_depth
    }

    /// Returns the sum of all branch lengths, excluding the root's.
    pub fn total_branch_length(&self) -> f64 {
        self.nodes
            .iter()
            .filter(|n| Some(n.index()) != self.root_index)
            .map(Node::branch_length)
            .sum()
    }

    /// Convenience method to convert this tree to a Newick string.
    ///
    /// See [`newick::to_newick`].
    pub fn to_newick(&self) -> String {
        newick::to_newick(self)
    }
}

// ============================================================================
// Validation
// ============================================================================
impl RootedTree {
    /// Validates the tree structure and all index references.
    ///
    /// Checks:
    /// - Root is set, in bounds, and has no parent
    /// - All node indices match their position in the arena
    /// - All children are in bounds and point back to their parent
    /// - All non-root nodes have a parent listing them as a child
    /// - Leaves have non-empty labels
    /// - There is exactly one more leaf than internal nodes
    pub fn is_valid(&self) -> bool {
        let Some(root_index) = self.root_index else {
            return false;
        };
        if root_index >= self.nodes.len() || self.nodes[root_index].parent().is_some() {
            return false;
        }

        for (index, node) in self.nodes.iter().enumerate() {
            if node.index() != index {
                return false;
            }

            if let Some((left, right)) = node.children() {
                if left >= self.nodes.len() || right >= self.nodes.len() || left == right {
                    return false;
                }
                if self.nodes[left].parent() != Some(index)
                    || self.nodes[right].parent() != Some(index)
                {
                    return false;
                }
            }

            if index != root_index {
                let Some(parent) = node.parent().and_then(|p| self.nodes.get(p)) else {
                    return false;
                };
                match parent.children() {
                    Some((left, right)) if left == index || right == index => {}
                    _ => return false,
                }
            }

            if node.is_leaf() && node.label().is_none_or(str::is_empty) {
                return false;
            }
        }

        self.num_leaves() == self.num_internal() + 1
    }
}

impl std::ops::Index<NodeIndex> for RootedTree {
    type Output = Node;

    fn index(&self, index: NodeIndex) -> &Self::Output {
        &self.nodes[index]
    }
}

impl std::ops::IndexMut<NodeIndex> for RootedTree {
    fn index_mut(&mut self, index: NodeIndex) -> &mut Self::Output {
        &mut self.nodes[index]
    }
}
