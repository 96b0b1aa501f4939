use crate::model::{NodeIndex, RootedTree};
use crate::newick::defs::{DEFAULT_NUM_LEAVES_GUESS, NEWICK_LABEL_DELIMITERS};
use crate::parser::byte_parser::ByteParser;
use crate::parser::parsing_error::ParsingError;

/// Parser (configuration) for Newick strings of rooted binary trees.
///
/// Produces one [RootedTree] per Newick string. Leaf labels are required,
/// internal labels are optional, and a missing branch length is read as `0.0`.
/// A string holding a single leaf (`A;`) yields a one-node tree.
///
/// # Configuration
/// * `with_num_leaves(num_leaves)` - Pre-allocates trees for that many leaves,
///    otherwise the count is taken from the first parsed tree.
///
/// # Example
/// ```
/// use bppctl::newick::NewickParser;
/// use bppctl::parser::ByteParser;
///
/// let mut byte_parser = ByteParser::for_str("((A:1,B:1)AB:1,C:2):0;");
/// let tree = NewickParser::new().parse(&mut byte_parser).unwrap();
/// assert_eq!(tree.num_leaves(), 3);
/// ```
pub struct NewickParser {
    know_num_leaves: bool,
    num_leaves: usize,
}

impl Default for NewickParser {
    fn default() -> Self {
        Self::new()
    }
}

impl NewickParser {
    /// Creates a new `NewickParser` with the number of leaves unknown.
    pub fn new() -> Self {
        Self {
            know_num_leaves: false,
            num_leaves: DEFAULT_NUM_LEAVES_GUESS,
        }
    }

    /// Sets the expected number of leaves in the trees to parse.
    pub fn with_num_leaves(mut self, num_leaves: usize) -> Self {
        self.num_leaves = num_leaves;
        self.know_num_leaves = true;
        self
    }

    /// Parses a single Newick tree from the given [ByteParser], up to and
    /// including its terminating `;`.
    ///
    /// Nesting depth is only limited by memory; the tree is read with an
    /// explicit stack of open parentheses.
    ///
    /// # Returns
    /// * `Ok(RootedTree)` - The parsed tree, root set
    /// * `Err(ParsingError)` - If the Newick format is invalid
    pub fn parse(&mut self, parser: &mut ByteParser) -> Result<RootedTree, ParsingError> {
        let mut tree = RootedTree::new(self.num_leaves);

        parser.skip_comment_and_whitespace()?;
        if parser.is_eof() {
            return Err(ParsingError::invalid_newick_string(
                parser,
                "Empty newick string".to_string(),
            ));
        }

        let root = self.parse_nodes(parser, &mut tree)?;

        parser.skip_comment_and_whitespace()?;
        if !parser.consume_if(b';') {
            return Err(ParsingError::invalid_newick_string(
                parser,
                format!(
                    "Expected ';' at end of tree but found {:?}",
                    parser.peek().map(|b| b as char)
                ),
            ));
        }

        tree.set_root(root)
            .map_err(|err| ParsingError::invalid_newick_string(parser, err.to_string()))?;

        if !self.know_num_leaves {
            self.num_leaves = tree.num_leaves();
            self.know_num_leaves = true;
        }

        Ok(tree)
    }

    /// Parses all trees until EOF.
    pub fn parse_all(&mut self, parser: &mut ByteParser) -> Result<Vec<RootedTree>, ParsingError> {
        let mut trees = Vec::new();
        loop {
            parser.skip_comment_and_whitespace()?;
            if parser.is_eof() {
                return Ok(trees);
            }
            trees.push(self.parse(parser)?);
        }
    }

    /// Parses one node with its whole subtree, adds it to the tree and
    /// returns its index.
    ///
    /// Every open `(` has an entry on `open`: `None` while its left child is
    /// being read, `Some(left)` while its right child is.
    fn parse_nodes(
        &mut self,
        parser: &mut ByteParser,
        tree: &mut RootedTree,
    ) -> Result<NodeIndex, ParsingError> {
        let mut open: Vec<Option<NodeIndex>> = Vec::new();

        'node: loop {
            parser.skip_comment_and_whitespace()?;
            while parser.consume_if(b'(') {
                open.push(None);
                parser.skip_comment_and_whitespace()?;
            }
            let mut current = self.parse_leaf(parser, tree)?;

            loop {
                match open.pop() {
                    None => return Ok(current),
                    Some(None) => {
                        open.push(Some(current));
                        Self::expect(parser, b',', "between children")?;
                        continue 'node;
                    }
                    Some(Some(left)) => {
                        current = self.parse_internal(parser, tree, (left, current))?;
                    }
                }
            }
        }
    }

    /// Finishes an internal node after its right child:
    /// `)[label][:branch_length]`.
    fn parse_internal(
        &mut self,
        parser: &mut ByteParser,
        tree: &mut RootedTree,
        children: (NodeIndex, NodeIndex),
    ) -> Result<NodeIndex, ParsingError> {
        Self::expect(parser, b')', "after children (only binary trees are supported)")?;

        parser.skip_comment_and_whitespace()?;
        let label = match parser.peek() {
            Some(b) if !NEWICK_LABEL_DELIMITERS.contains(&b) => {
                Some(parser.parse_label(NEWICK_LABEL_DELIMITERS)?)
            }
            _ => None,
        };
        let branch_length = self.parse_branch_length(parser)?;

        Ok(tree.add_internal(children, label, branch_length))
    }

    /// Consumes `expected` after optional whitespace and comments.
    fn expect(parser: &mut ByteParser, expected: u8, context: &str) -> Result<(), ParsingError> {
        parser.skip_comment_and_whitespace()?;
        if parser.consume_if(expected) {
            return Ok(());
        }
        Err(ParsingError::invalid_newick_string(
            parser,
            format!(
                "Expected '{}' {} but found {:?}",
                expected as char,
                context,
                parser.peek().map(|b| b as char)
            ),
        ))
    }

    /// Parses `label[:branch_length]`. Expects parser at start of label.
    fn parse_leaf(&mut self, parser: &mut ByteParser, tree: &mut RootedTree) -> Result<NodeIndex, ParsingError> {
        let label = parser.parse_label(NEWICK_LABEL_DELIMITERS)?;
        if label.is_empty() {
            return Err(ParsingError::invalid_newick_string(
                parser,
                format!(
                    "Expected leaf label but found {:?}",
                    parser.peek().map(|b| b as char)
                ),
            ));
        }
        let branch_length = self.parse_branch_length(parser)?;

        Ok(tree.add_leaf(label, branch_length))
    }

    /// Parses optional branch length `[:number]`, `0.0` if absent.
    /// Supports scientific notation (e.g., `1.5e-10`); values that overflow
    /// to infinity are rejected.
    fn parse_branch_length(&mut self, parser: &mut ByteParser) -> Result<f64, ParsingError> {
        parser.skip_comment_and_whitespace()?;
        if !parser.consume_if(b':') {
            return Ok(0.0);
        }
        parser.skip_comment_and_whitespace()?;

        let token = parser.take_number_token();
        token
            .parse::<f64>()
            .ok()
            .filter(|length| length.is_finite())
            .ok_or_else(|| {
                ParsingError::invalid_newick_string(parser, format!("Invalid branch length: {:?}", token))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ParsingErrorType;

    fn parse(input: &str) -> Result<RootedTree, ParsingError> {
        NewickParser::new().parse(&mut ByteParser::for_str(input))
    }

    #[test]
    fn test_internal_labels_and_lengths() {
        let tree = parse("((A:1,B:2)AB:0.5,C:2.5)root:0;").unwrap();
        assert!(tree.is_valid());
        let root = tree.root().unwrap();
        assert_eq!(root.label(), Some("root"));
        let (ab, c) = root.children().unwrap();
        assert_eq!(tree[ab].label(), Some("AB"));
        assert_eq!(tree[ab].branch_length(), 0.5);
        assert_eq!(tree[c].branch_length(), 2.5);
    }

    #[test]
    fn test_missing_branch_lengths_are_zero() {
        let tree = parse("(A,B);").unwrap();
        assert_eq!(tree.leaf_labels(), vec!["A", "B"]);
        assert!(tree.nodes().iter().all(|n| n.branch_length() == 0.0));
    }

    #[test]
    fn test_lone_leaf() {
        let tree = parse("  A:3 ;").unwrap();
        assert!(tree.is_valid());
        assert!(tree.root().unwrap().is_leaf());
        assert_eq!(tree.root().unwrap().branch_length(), 3.0);
    }

    #[test]
    fn test_comments_whitespace_and_quotes() {
        let tree = parse("[tree 1]\n( 'Little Kiwi' : 1e-1 ,\n\tB[&x=1]:2 ) ;").unwrap();
        assert_eq!(tree.leaf_labels(), vec!["Little Kiwi", "B"]);
        assert_eq!(tree[0].branch_length(), 0.1);
    }

    #[test]
    fn test_multifurcation_rejected() {
        let err = parse("(A,B,C);").unwrap_err();
        assert!(matches!(err.kind(), ParsingErrorType::InvalidNewickString(_)));
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(parse("").is_err());
        assert!(parse("(A,B)").is_err());
        assert!(parse("(A:x,B);").is_err());
        assert!(parse("(,B);").is_err());
        assert!(parse("(A,B);[never closed").is_ok());
        assert!(parse("[never closed (A,B);").is_err());
        assert!(parse("(A:1e400,B:1);").is_err());
    }

    #[test]
    fn test_overflowing_branch_length_rejected() {
        let err = parse("(A:1e400,B:1);").unwrap_err();
        match err.kind() {
            ParsingErrorType::InvalidNewickString(msg) => {
                assert_eq!(msg, "Invalid branch length: \"1e400\"")
            }
            other => panic!("unexpected error {other:?}"),
        }
        assert_eq!(parse("(A:1e300,B:1);").unwrap()[0].branch_length(), 1e300);
    }

    #[test]
    fn test_nested_left_and_right_subtrees() {
        let tree = parse("((A,(B,C)BC)ABC,((D,E)DE,F)DEF)R;").unwrap();
        assert!(tree.is_valid());
        assert_eq!(tree.leaf_labels(), vec!["A", "B", "C", "D", "E", "F"]);
        assert_eq!(tree.root().unwrap().label(), Some("R"));
        assert_eq!(tree.max_depth(), 3);
    }

    #[test]
    fn test_parse_all() {
        let mut byte_parser = ByteParser::for_str("(A,B);\n((A,B),C);\n");
        let trees = NewickParser::new().parse_all(&mut byte_parser).unwrap();
        assert_eq!(trees.len(), 2);
        assert_eq!(trees[1].num_leaves(), 3);
    }
}
