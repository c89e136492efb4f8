//! Newick parser building owned [Tree]s.

use crate::model::{BranchLength, Node, Tree};
use crate::newick::defs::{NEWICK_LABEL_DELIMITERS, is_branch_length_byte};
use crate::parser::byte_parser::ByteParser;
use crate::parser::byte_source::ByteSource;
use crate::parser::ParsingError;
use std::collections::HashMap;

// =#========================================================================#=
// NEWICK PARSER
// =#========================================================================#=
/// Parser (configuration) for Newick strings.
///
/// Supports trees of arbitrary out-degree, internal labels, quoted labels,
/// unnamed leaves, optional branch lengths (also in scientific notation),
/// and `[...]` comments anywhere whitespace may occur.
///
/// # Configuration
/// * `with_translation(map)` - Replaces leaf keys by full labels while
///   parsing, as required by a NEXUS `TRANSLATE` command. Keys without
///   entry are kept verbatim.
///
/// # Example
/// ```
/// use isoprune::newick::NewickParser;
/// use isoprune::parser::byte_parser::ByteParser;
///
/// let mut byte_parser = ByteParser::for_str("((A:1.0,B:1.0)AB:0.5,C:1.5);");
/// let tree = NewickParser::new().parse_str(&mut byte_parser).unwrap();
/// assert_eq!(tree.leaf_names(), vec!["A", "B", "C"]);
/// ```
#[derive(Debug, Default)]
pub struct NewickParser {
    translation: HashMap<String, String>,
}

impl NewickParser {
    /// Creates a new `NewickParser` without translation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a translation from leaf keys to full labels.
    pub fn with_translation(mut self, translation: HashMap<String, String>) -> Self {
        self.translation = translation;
        self
    }

    /// Parses a single Newick tree from the given [ByteParser],
    /// up to and including its terminating `;`.
    ///
    /// # Returns
    /// * `Ok(Tree)` - The parsed phylogenetic tree
    /// * `Err(ParsingError)` - If the Newick format is invalid
    pub fn parse_str<S: ByteSource>(
        &self,
        parser: &mut ByteParser<S>,
    ) -> Result<Tree, ParsingError> {
        parser.skip_comment_and_whitespace()?;
        if parser.is_eof() {
            return Err(ParsingError::unexpected_eof(parser));
        }

        let root = self.parse_node(parser)?;

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

        Ok(Tree::new(root))
    }

    /// Parses all Newick trees until EOF.
    pub fn parse_all<S: ByteSource>(
        &self,
        mut parser: ByteParser<S>,
    ) -> Result<Vec<Tree>, ParsingError> {
        let mut trees = Vec::new();
        loop {
            parser.skip_comment_and_whitespace()?;
            if parser.is_eof() {
                return Ok(trees);
            }
            trees.push(self.parse_str(&mut parser)?);
        }
    }

    /// Parses a node (either internal node or leaf):
    /// - Skips leading comments and whitespace
    /// - Dispatches to `parse_internal` if starts with `(`, otherwise `parse_leaf`
    fn parse_node<S: ByteSource>(&self, parser: &mut ByteParser<S>) -> Result<Node, ParsingError> {
        parser.skip_comment_and_whitespace()?;
        if parser.peek() == Some(b'(') {
            self.parse_internal(parser)
        } else {
            self.parse_leaf(parser)
        }
    }

    /// Parses internal node `(child, ..., child)[label][:branch_length]`.
    fn parse_internal<S: ByteSource>(
        &self,
        parser: &mut ByteParser<S>,
    ) -> Result<Node, ParsingError> {
        parser.next_byte(); // consume '('

        let mut children = vec![self.parse_node(parser)?];
        loop {
            parser.skip_comment_and_whitespace()?;
            match parser.next_byte() {
                Some(b',') => children.push(self.parse_node(parser)?),
                Some(b')') => break,
                Some(b) => {
                    return Err(ParsingError::invalid_newick_string(
                        parser,
                        format!("Expected ',' or ')' after child but found {:?}", b as char),
                    ));
                }
                None => return Err(ParsingError::unexpected_eof(parser)),
            }
        }

        let label = parser.parse_label(NEWICK_LABEL_DELIMITERS)?;
        let branch_length = parse_branch_length(parser)?;

        Ok(Node::Internal {
            name: (!label.is_empty()).then_some(label),
            children,
            branch_length,
        })
    }

    /// Parses leaf `[label][:branch_length]`, translating the label if configured.
    fn parse_leaf<S: ByteSource>(&self, parser: &mut ByteParser<S>) -> Result<Node, ParsingError> {
        let label = parser.parse_label(NEWICK_LABEL_DELIMITERS)?;
        let label = match self.translation.get(&label) {
            Some(full_label) => full_label.clone(),
            None => label,
        };
        let branch_length = parse_branch_length(parser)?;

        Ok(Node::new_leaf(label, branch_length))
    }
}

/// Parses optional branch length `[:number]`:
/// - Skips comments/whitespace before and after `:`
/// - Supports scientific notation (e.g., `1.5e-10`)
///
/// # Returns
/// - [BranchLength] if found branch length and was able to parse it
/// - `None` if found no branch length
/// - [ParsingError] if the value is no number, negative or not finite
fn parse_branch_length<S: ByteSource>(
    parser: &mut ByteParser<S>,
) -> Result<Option<BranchLength>, ParsingError> {
    parser.skip_comment_and_whitespace()?;
    if !parser.consume_if(b':') {
        return Ok(None);
    }
    parser.skip_comment_and_whitespace()?;

    let mut branch_length_str = String::new();
    while let Some(b) = parser.peek() {
        if !is_branch_length_byte(b) {
            break;
        }
        branch_length_str.push(b as char);
        parser.next_byte();
    }

    branch_length_str
        .parse::<f64>()
        .ok()
        .and_then(BranchLength::try_new)
        .map(Some)
        .ok_or_else(|| ParsingError::invalid_branch_length(parser, branch_length_str))
}
