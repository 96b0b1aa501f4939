//! ASCII-art rendering of a [RootedTree] in the style of a directory listing.
//!
//! ```text
//!
//! |
//! +---+ AB
//! |   |
//! |   +--- A
//! |   |
//! |   +--- B
//! |
//! +--- C
//! ```

use crate::model::node::NodeIndex;
use crate::model::tree::RootedTree;
use std::fmt::Write;
use std::ops::BitOr;

/// Which per-node details follow the connector of a rendered line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ShowOptions(u8);

impl ShowOptions {
    /// Topology only.
    pub const NONE: ShowOptions = ShowOptions(0);
    /// Node labels, where present.
    pub const LABEL: ShowOptions = ShowOptions(1);
    /// Branch lengths, six decimals.
    pub const BRANCH_LENGTH: ShowOptions = ShowOptions(1 << 1);

    /// Returns `true` if all flags of `other` are set.
    pub fn contains(self, other: ShowOptions) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for ShowOptions {
    type Output = ShowOptions;

    fn bitor(self, rhs: Self) -> Self::Output {
        ShowOptions(self.0 | rhs.0)
    }
}

/// State of the vertical rail drawn for one depth level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rail {
    /// Nothing pending at this level.
    Blank,
    /// Left subtree being drawn; the right sibling is still to come.
    Open,
    /// Right subtree being drawn; blanked once its connector is drawn.
    Closing,
}

enum Step {
    Draw(NodeIndex, usize),
    SetRail(usize, Rail),
}

const INDENT: &str = "   ";

/// Renders `tree` as ASCII art, one connector line per non-root node, each
/// preceded by a spacer line carrying the open rails.
///
/// Returns an empty string if the tree has no root.
///
/// # Example
/// ```
/// use bppctl::model::{render_ascii, RootedTree, ShowOptions};
///
/// let mut tree = RootedTree::new(2);
/// let a = tree.add_leaf("A", 1.0);
/// let b = tree.add_leaf("B", 2.0);
/// tree.add_root((a, b), None, 0.0);
///
/// let text = render_ascii(&tree, ShowOptions::LABEL | ShowOptions::BRANCH_LENGTH);
/// assert_eq!(text, " 0.000000\n|   \n+--- A 1.000000\n|   \n+--- B 2.000000\n");
/// ```
pub fn render_ascii(tree: &RootedTree, options: ShowOptions) -> String {
    let Ok(root) = tree.root_index() else {
        return String::new();
    };

    let mut out = String::new();
    let mut rails = vec![Rail::Blank; tree.max_depth() + 1];

    push_details(&mut out, tree, root, options);
    out.push('\n');

    let mut stack = Vec::new();
    push_children(&mut stack, tree, root, 0);

    while let Some(step) = stack.pop() {
        match step {
            Step::SetRail(level, rail) => rails[level] = rail,
            Step::Draw(index, level) => {
                for rail in &rails[..level] {
                    out.push(rail_char(*rail));
                    out.push_str(INDENT);
                }
                out.push('\n');

                for rail in &rails[..level - 1] {
                    out.push(rail_char(*rail));
                    out.push_str(INDENT);
                }
                out.push_str("+---");
                if tree[index].is_internal() {
                    out.push('+');
                }
                push_details(&mut out, tree, index, options);
                out.push('\n');

                if rails[level - 1] == Rail::Closing {
                    rails[level - 1] = Rail::Blank;
                }
                push_children(&mut stack, tree, index, level);
            }
        }
    }

    out
}

/// Schedules the children of `index` (at `level`) so that the left subtree
/// is drawn with an open rail and the right one with a closing rail.
fn push_children(stack: &mut Vec<Step>, tree: &RootedTree, index: NodeIndex, level: usize) {
    if let Some((left, right)) = tree[index].children() {
        stack.push(Step::Draw(right, level + 1));
        stack.push(Step::SetRail(level, Rail::Closing));
        stack.push(Step::Draw(left, level + 1));
        stack.push(Step::SetRail(level, Rail::Open));
    }
}

fn rail_char(rail: Rail) -> char {
    match rail {
        Rail::Blank => ' ',
        Rail::Open | Rail::Closing => '|',
    }
}

fn push_details(out: &mut String, tree: &RootedTree, index: NodeIndex, options: ShowOptions) {
    let node = &tree[index];
    if options.contains(ShowOptions::LABEL) {
        if let Some(label) = node.label() {
            out.push(' ');
            out.push_str(label);
        }
    }
    if options.contains(ShowOptions::BRANCH_LENGTH) {
        // writing to a String cannot fail
        let _ = write!(out, " {:.6}", node.branch_length());
    }
}

impl RootedTree {
    /// Prints the tree to stdout, see [render_ascii].
    pub fn show_ascii(&self, options: ShowOptions) {
        print!("{}", render_ascii(self, options));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn three_taxon_tree() -> RootedTree {
        let mut tree = RootedTree::new(3);
        let a = tree.add_leaf("A", 1.0);
        let b = tree.add_leaf("B", 1.0);
        let ab = tree.add_internal((a, b), Some("AB".to_string()), 1.0);
        let c = tree.add_leaf("C", 2.0);
        tree.add_root((ab, c), None, 0.0);
        tree
    }

    #[test]
    fn test_options() {
        let both = ShowOptions::LABEL | ShowOptions::BRANCH_LENGTH;
        assert!(both.contains(ShowOptions::LABEL));
        assert!(both.contains(ShowOptions::BRANCH_LENGTH));
        assert!(!ShowOptions::LABEL.contains(ShowOptions::BRANCH_LENGTH));
        assert!(ShowOptions::NONE.contains(ShowOptions::NONE));
    }

    #[test]
    fn test_topology_only() {
        let expected = "\n\
                        |   \n\
                        +---+\n\
                        |   |   \n\
                        |   +---\n\
                        |   |   \n\
                        |   +---\n\
                        |   \n\
                        +---\n";
        assert_eq!(render_ascii(&three_taxon_tree(), ShowOptions::NONE), expected);
    }

    #[test]
    fn test_right_heavy_rails_close() {
        // (A,(B,C)): the rail of the root level must be blank below the
        // connector of the right child
        let mut tree = RootedTree::new(3);
        let a = tree.add_leaf("A", 0.0);
        let b = tree.add_leaf("B", 0.0);
        let c = tree.add_leaf("C", 0.0);
        let bc = tree.add_internal((b, c), None, 0.0);
        tree.add_root((a, bc), None, 0.0);

        let expected = "\n\
                        |   \n\
                        +--- A\n\
                        |   \n\
                        +---+\n    \
                        |   \n    \
                        +--- B\n    \
                        |   \n    \
                        +--- C\n";
        assert_eq!(render_ascii(&tree, ShowOptions::LABEL), expected);
    }

    #[test]
    fn test_lone_leaf_and_rootless() {
        let mut tree = RootedTree::new(1);
        let a = tree.add_leaf("A", 0.5);
        assert_eq!(render_ascii(&tree, ShowOptions::LABEL), "");
        tree.set_root(a).unwrap();
        assert_eq!(render_ascii(&tree, ShowOptions::LABEL), " A\n");
    }
}
