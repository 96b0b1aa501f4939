//! Predicate-driven preorder and postorder walks over a [RootedTree].

use crate::model::node::{Node, NodeIndex};
use crate::model::tree::{RootedTree, TreeError};

/// Order in which [RootedTree::traverse] emits nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraversalOrder {
    /// Left subtree, right subtree, then the node itself.
    Postorder,
    /// The node itself, then left subtree, then right subtree.
    Preorder,
}

impl RootedTree {
    /// Walks the whole tree from the root, see [traverse_subtree](Self::traverse_subtree).
    ///
    /// # Errors
    /// [TreeError::RootNotSet] if there is no root, [TreeError::RootIsLeaf] if
    /// the root is a lone leaf.
    pub fn traverse<P>(&self, order: TraversalOrder, predicate: P) -> Result<Vec<NodeIndex>, TreeError>
    where
        P: FnMut(&Node) -> bool,
    {
        self.traverse_subtree(self.root_index()?, order, predicate)
    }

    /// Walks the subtree below `start` and returns the indices of the
    /// included nodes in the requested order.
    ///
    /// The predicate is called once for every node reached. For a leaf it
    /// only decides inclusion. For an internal node `false` prunes it together
    /// with its whole subtree, `true` includes it and descends. Nodes are
    /// reached left to right, so the predicate sees them in preorder
    /// regardless of `order`.
    ///
    /// # Errors
    /// [TreeError::InvalidNode] if `start` is out of bounds,
    /// [TreeError::RootIsLeaf] if `start` is a leaf.
    ///
    /// # Example
    /// ```
    /// use bppctl::model::{RootedTree, TraversalOrder};
    ///
    /// let mut tree = RootedTree::new(2);
    /// let a = tree.add_leaf("A", 1.0);
    /// let b = tree.add_leaf("B", 1.0);
    /// let root = tree.add_root((a, b), None, 0.0);
    ///
    /// let post = tree.traverse(TraversalOrder::Postorder, |_| true).unwrap();
    /// assert_eq!(post, vec![a, b, root]);
    ///
    /// let leaves = tree.traverse(TraversalOrder::Preorder, |n| n.is_leaf() || n.parent().is_none());
    /// assert_eq!(leaves.unwrap(), vec![root, a, b]);
    /// ```
    pub fn traverse_subtree<P>(
        &self,
        start: NodeIndex,
        order: TraversalOrder,
        mut predicate: P,
    ) -> Result<Vec<NodeIndex>, TreeError>
    where
        P: FnMut(&Node) -> bool,
    {
        let start_node = self.get(start).ok_or(TreeError::InvalidNode(start))?;
        if start_node.is_leaf() {
            return Err(TreeError::RootIsLeaf(start));
        }

        let mut visited = Vec::new();
        match order {
            TraversalOrder::Preorder => {
                let mut stack = vec![start];
                while let Some(index) = stack.pop() {
                    let node = &self[index];
                    if !predicate(node) {
                        continue;
                    }
                    visited.push(index);
                    if let Some((left, right)) = node.children() {
                        stack.push(right);
                        stack.push(left);
                    }
                }
            }
            TraversalOrder::Postorder => {
                // (index, children already pushed)
                let mut stack = vec![(start, false)];
                while let Some((index, expanded)) = stack.pop() {
                    if expanded {
                        visited.push(index);
                        continue;
                    }
                    let node = &self[index];
                    if !predicate(node) {
                        continue;
                    }
                    match node.children() {
                        Some((left, right)) => {
                            stack.push((index, true));
                            stack.push((right, false));
                            stack.push((left, false));
                        }
                        None => visited.push(index),
                    }
                }
            }
        }

        Ok(visited)
    }
}
