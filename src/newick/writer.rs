//! Newick string writing for [RootedTree]s.

use crate::model::{Node, NodeIndex, RootedTree};
use crate::newick::defs::NEWICK_SPECIAL_CHARS;

/// Extra buffer in Newick string length/capacity estimate
const BUFFER_CHARS: usize = 10;

/// Returns the Newick representation of `tree` with closing semicolon.
///
/// Every node is written as `label:length`, internal nodes preceded by their
/// parenthesized children, where the label may be empty. Lengths use six
/// decimals. Labels containing Newick delimiters are single-quoted.
///
/// Returns an empty string if the tree has no root.
///
/// # Example
/// ```
/// use bppctl::model::RootedTree;
/// use bppctl::newick::to_newick;
///
/// let mut tree = RootedTree::new(2);
/// let a = tree.add_leaf("A", 1.0);
/// let b = tree.add_leaf("B", 2.0);
/// tree.add_root((a, b), None, 0.0);
///
/// assert_eq!(to_newick(&tree), "(A:1.000000,B:2.000000):0.000000;");
/// ```
pub fn to_newick(tree: &RootedTree) -> String {
    to_newick_with(tree, |node| {
        let label = node.label().map(escape_label).unwrap_or_default();
        format!("{}:{:.6}", label, node.branch_length())
    })
}

/// Returns the Newick representation of `tree`, formatting every node with
/// `format_node`.
///
/// Nodes are formatted in postorder, each right after its subtree.
///
/// The callback replaces the default `label:length` text of each node, leaf
/// or internal; parentheses, commas and the closing `;` are still written.
///
/// # Example
/// ```
/// use bppctl::model::RootedTree;
/// use bppctl::newick::to_newick_with;
///
/// let mut tree = RootedTree::new(2);
/// let a = tree.add_leaf("A", 1.0);
/// let b = tree.add_leaf("B", 2.0);
/// tree.add_root((a, b), None, 0.0);
///
/// let topology = to_newick_with(&tree, |node| node.label().unwrap_or("").to_string());
/// assert_eq!(topology, "(A,B);");
/// ```
pub fn to_newick_with<F>(tree: &RootedTree, mut format_node: F) -> String
where
    F: FnMut(&Node) -> String,
{
    let Ok(root) = tree.root_index() else {
        return String::new();
    };

    let mut newick = String::with_capacity(estimate_newick_len(tree));
    let mut stack = vec![Step::Open(root)];

    while let Some(step) = stack.pop() {
        match step {
            Step::Open(index) => match tree[index].children() {
                Some((left, right)) => {
                    newick.push('(');
                    stack.push(Step::Close(index));
                    stack.push(Step::Open(right));
                    stack.push(Step::Comma);
                    stack.push(Step::Open(left));
                }
                None => newick.push_str(&format_node(&tree[index])),
            },
            Step::Comma => newick.push(','),
            Step::Close(index) => {
                newick.push(')');
                newick.push_str(&format_node(&tree[index]));
            }
        }
    }

    newick.push(';');

    newick
}

/// Pending output while writing a tree.
enum Step {
    /// Node not written yet
    Open(NodeIndex),
    /// `,` between the two subtrees of an internal node
    Comma,
    /// `)` and the text of an internal node, after its subtrees
    Close(NodeIndex),
}

/// Wraps a label in single quotes if it contains Newick delimiters,
/// doubling inner quotes.
pub(crate) fn escape_label(label: &str) -> String {
    if label.contains(NEWICK_SPECIAL_CHARS) {
        format!("'{}'", label.replace('\'', "''"))
    } else {
        label.to_string()
    }
}

/// Estimates the length of the default Newick string for `tree`, used to
/// pre-allocate the output.
fn estimate_newick_len(tree: &RootedTree) -> usize {
    // "(,)" per internal node
    const INTERNAL_NODE_CHARS: usize = 3;
    // ":" plus a six-decimal length, e.g. ":0.001000"
    const BRANCH_LENGTH_CHARS: usize = 10;

    let label_capacity: usize = tree
        .nodes()
        .iter()
        .filter_map(Node::label)
        .map(str::len)
        .sum();

    tree.num_internal() * INTERNAL_NODE_CHARS
        + tree.num_nodes() * BRANCH_LENGTH_CHARS
        + label_capacity
        + BUFFER_CHARS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_format() {
        let mut tree = RootedTree::new(3);
        let a = tree.add_leaf("A", 1.0);
        let b = tree.add_leaf("B", 1.0);
        let ab = tree.add_internal((a, b), None, 1.0);
        let c = tree.add_leaf("C", 2.0);
        tree.add_root((ab, c), None, 0.0);

        assert_eq!(
            to_newick(&tree),
            "((A:1.000000,B:1.000000):1.000000,C:2.000000):0.000000;"
        );
    }

    #[test]
    fn test_internal_labels_written_after_parenthesis() {
        let mut tree = RootedTree::new(2);
        let a = tree.add_leaf("A", 0.5);
        let b = tree.add_leaf("B", 0.25);
        tree.add_root((a, b), Some("AB".to_string()), 0.0);

        assert_eq!(to_newick(&tree), "(A:0.500000,B:0.250000)AB:0.000000;");
    }

    #[test]
    fn test_callback_applies_to_every_node() {
        let mut tree = RootedTree::new(2);
        let a = tree.add_leaf("A", 0.5);
        let b = tree.add_leaf("B", 0.25);
        tree.add_root((a, b), None, 0.0);

        let mut calls = 0;
        let newick = to_newick_with(&tree, |node| {
            calls += 1;
            format!("#{}", node.index())
        });
        assert_eq!(newick, "(#0,#1)#2;");
        assert_eq!(calls, 3);
    }

    #[test]
    fn test_lone_leaf_and_rootless() {
        let mut tree = RootedTree::new(1);
        let a = tree.add_leaf("A", 0.0);
        assert_eq!(to_newick(&tree), "");
        tree.set_root(a).unwrap();
        assert_eq!(to_newick(&tree), "A:0.000000;");
    }

    #[test]
    fn test_escape_label() {
        assert_eq!(escape_label("Apteryx"), "Apteryx");
        assert_eq!(escape_label("Little Kiwi"), "'Little Kiwi'");
        assert_eq!(escape_label("Baillon's"), "'Baillon''s'");
    }
}
