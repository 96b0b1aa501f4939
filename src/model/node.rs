//! Node type of rooted binary trees.

/// Index of a node in a [RootedTree](crate::model::RootedTree) (arena).
pub type NodeIndex = usize;

// =#========================================================================#=
// NODE
// =#========================================================================#=
/// A node of a strictly binary rooted tree.
///
/// A node is either:
/// - **Internal**: has exactly two children and an optional label
/// - **Leaf**: has no children and a label
///
/// A node with a single child cannot be expressed.
///
/// # Invariants
/// - `index` is the node's position in the tree arena
/// - `parent` is `None` for the root and, during construction, for nodes
///   not attached yet
/// - `branch_length` is the length of the edge to the parent; it carries no
///   meaning on the root
#[derive(PartialEq, Debug, Clone)]
pub enum Node {
    /// Node with two children
    Internal {
        /// Index of this node in the tree arena
        index: NodeIndex,
        /// Index of the parent node
        parent: Option<NodeIndex>,
        /// Indices of the left and right child
        children: (NodeIndex, NodeIndex),
        /// Optional label, e.g. an ancestral population name
        label: Option<String>,
        /// Distance to parent node
        branch_length: f64,
    },
    /// Node without children
    Leaf {
        /// Index of this node in the tree arena
        index: NodeIndex,
        /// Index of the parent node
        parent: Option<NodeIndex>,
        /// Taxon label
        label: String,
        /// Distance to parent node
        branch_length: f64,
    },
}

impl Node {
    /// Creates a new internal node without a parent.
    ///
    /// # Arguments
    /// * `index` - The unique index of this node in the tree (arena)
    /// * `children` - Tuple of (left, right) child indices
    /// * `label` - Optional label
    /// * `branch_length` - Distance to parent node
    pub fn new_internal(
        index: NodeIndex,
        children: (NodeIndex, NodeIndex),
        label: Option<String>,
        branch_length: f64,
    ) -> Self {
        Node::Internal {
            index,
            parent: None,
            children,
            label,
            branch_length,
        }
    }

    /// Creates a new leaf without a parent.
    pub fn new_leaf(index: NodeIndex, label: String, branch_length: f64) -> Self {
        Node::Leaf {
            index,
            parent: None,
            label,
            branch_length,
        }
    }

    /// Returns the index of this node.
    pub fn index(&self) -> NodeIndex {
        match self {
            Node::Internal { index, .. } | Node::Leaf { index, .. } => *index,
        }
    }

    /// Returns the label, if any. Leaves always have one.
    pub fn label(&self) -> Option<&str> {
        match self {
            Node::Internal { label, .. } => label.as_deref(),
            Node::Leaf { label, .. } => Some(label),
        }
    }

    /// Returns the length of the edge to the parent.
    pub fn branch_length(&self) -> f64 {
        match self {
            Node::Internal { branch_length, .. } | Node::Leaf { branch_length, .. } => {
                *branch_length
            }
        }
    }

    /// Sets the length of the edge to the parent.
    pub fn set_branch_length(&mut self, length: f64) {
        match self {
            Node::Internal { branch_length, .. } | Node::Leaf { branch_length, .. } => {
                *branch_length = length
            }
        }
    }

    /// Returns the children if this is an internal node, else `None`.
    pub fn children(&self) -> Option<(NodeIndex, NodeIndex)> {
        match self {
            Node::Internal { children, .. } => Some(*children),
            Node::Leaf { .. } => None,
        }
    }

    /// Returns the index of the parent, `None` for the root.
    pub fn parent(&self) -> Option<NodeIndex> {
        match self {
            Node::Internal { parent, .. } | Node::Leaf { parent, .. } => *parent,
        }
    }

    pub(crate) fn set_parent(&mut self, new_parent: NodeIndex) {
        match self {
            Node::Internal { parent, .. } | Node::Leaf { parent, .. } => {
                *parent = Some(new_parent)
            }
        }
    }

    /// Returns `true` if this node is a leaf.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    /// Returns `true` if this node has two children.
    pub fn is_internal(&self) -> bool {
        matches!(self, Node::Internal { .. })
    }
}
