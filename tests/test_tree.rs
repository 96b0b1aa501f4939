use bppctl::model::{RootedTree, ShowOptions, TraversalOrder, TreeError, render_ascii};
use bppctl::newick::parse_str;
use bppctl::parse_control_str;
use pretty_assertions::assert_eq;

fn species_tree() -> RootedTree {
    parse_str("((A:1,B:1):1,C:2):0;").unwrap()
}

// --- ASCII RENDERING ---
#[test]
fn test_ascii_labels() {
    let expected = [
        "",
        "|   ",
        "+---+",
        "|   |   ",
        "|   +--- A",
        "|   |   ",
        "|   +--- B",
        "|   ",
        "+--- C",
    ];
    let rendered = render_ascii(&species_tree(), ShowOptions::LABEL);
    assert_eq!(rendered.lines().collect::<Vec<_>>(), expected);
}

#[test]
fn test_ascii_labels_and_branch_lengths() {
    let expected = [
        " 0.000000",
        "|   ",
        "+---+ 1.000000",
        "|   |   ",
        "|   +--- A 1.000000",
        "|   |   ",
        "|   +--- B 1.000000",
        "|   ",
        "+--- C 2.000000",
    ];
    let rendered = render_ascii(
        &species_tree(),
        ShowOptions::LABEL | ShowOptions::BRANCH_LENGTH,
    );
    assert_eq!(rendered.lines().collect::<Vec<_>>(), expected);
}

#[test]
fn test_ascii_deep_left_subtree_keeps_outer_rail() {
    let tree = parse_str("(((A,B)AB,C)ABC,D);").unwrap();
    let expected = [
        "",
        "|   ",
        "+---+ ABC",
        "|   |   ",
        "|   +---+ AB",
        "|   |   |   ",
        "|   |   +--- A",
        "|   |   |   ",
        "|   |   +--- B",
        "|   |   ",
        "|   +--- C",
        "|   ",
        "+--- D",
    ];
    let rendered = render_ascii(&tree, ShowOptions::LABEL);
    assert_eq!(rendered.lines().collect::<Vec<_>>(), expected);
}

// --- TRAVERSAL ---
#[test]
fn test_postorder_and_preorder_labels() {
    let tree = parse_str("((A,B)AB,(C,D)CD)R;").unwrap();
    let label = |index: usize| tree[index].label().unwrap_or("-").to_string();

    let post: Vec<_> = tree
        .traverse(TraversalOrder::Postorder, |_| true)
        .unwrap()
        .into_iter()
        .map(label)
        .collect();
    assert_eq!(post, ["A", "B", "AB", "C", "D", "CD", "R"]);

    let pre: Vec<_> = tree
        .traverse(TraversalOrder::Preorder, |_| true)
        .unwrap()
        .into_iter()
        .map(label)
        .collect();
    assert_eq!(pre, ["R", "AB", "A", "B", "CD", "C", "D"]);
}

#[test]
fn test_leaf_predicate_selects_leaves() {
    let tree = parse_str("((A,B)AB,(C,D)CD)R;").unwrap();
    let selected = tree
        .traverse(TraversalOrder::Postorder, |node| {
            node.is_internal() || node.label() != Some("B")
        })
        .unwrap();
    let leaves: Vec<_> = selected
        .into_iter()
        .filter(|&i| tree[i].is_leaf())
        .map(|i| tree[i].label().unwrap_or_default())
        .collect();
    assert_eq!(leaves, ["A", "C", "D"]);
}

#[test]
fn test_traversal_of_lone_leaf_fails() {
    let tree = parse_str("A;").unwrap();
    let root = tree.root_index().unwrap();
    assert_eq!(
        tree.traverse(TraversalOrder::Preorder, |_| true),
        Err(TreeError::RootIsLeaf(root))
    );
}

// --- CONTROL FILE TO TREE ---
#[test]
fn test_species_tree_from_control_file() {
    let text = "species&tree = 3 A B C\n  2 2 2\n((A:1,B:1):1,C:2):0;\n";
    let config = parse_control_str(text).unwrap();
    let tree = config.build_species_tree().unwrap().unwrap();

    assert_eq!(tree.num_leaves(), 3);
    assert_eq!(
        tree.to_newick(),
        "((A:1.000000,B:1.000000):1.000000,C:2.000000):0.000000;"
    );
}

#[test]
fn test_species_tree_with_undeclared_leaf() {
    let text = "species&tree = 3 A B C\n  2 2 2\n((A:1,B:1):1,X:2):0;\n";
    let config = parse_control_str(text).unwrap();
    assert!(config.build_species_tree().unwrap().is_err());
}
