//! Extraction of trees from NEXUS-flavored tree files.

use crate::model::Tree;
use crate::newick::NewickParser;
use crate::parser::ParsingError;
use crate::parser::byte_parser::{ByteParser, ConsumeMode};
use crate::parser::byte_source::ByteSource;
use std::collections::HashMap;
use tracing::debug;

/// NEXUS label delimiters in TRANSLATE commands: comma, semicolon, whitespace
const NEXUS_LABEL_DELIMITERS: &[u8] = b" ,;\t\n\r";

/// Delimiters of a tree name in a TREE command
const TREE_NAME_DELIMITERS: &[u8] = b" =;\t\n\r[";

// =#========================================================================#=
// TREE FILE READER
// =#========================================================================#=
/// Reads all trees from a NEXUS-flavored tree file.
///
/// The reader walks the input command by command:
/// - Lines starting with `#` (e.g. `#NEXUS`) are directives and skipped.
/// - `Begin <block>;` and `End;` are skipped.
/// - `Translate <key> <label>, ...;` sets up leaf translation for all
///   subsequent trees.
/// - `Tree <name> = <newick>;` (also `Utree`) is stripped of its assignment
///   prefix and parsed as Newick string.
/// - A bare Newick string (starting with `(`) is parsed as is, so plain
///   Newick files are read as well.
/// - Any other command, e.g. `Dimensions ntax=4;`, is skipped up to its `;`.
///
/// Comments `[...]` may appear between any of these.
pub struct TreeFileReader<S: ByteSource> {
    parser: ByteParser<S>,
    newick_parser: NewickParser,
}

impl<S: ByteSource> TreeFileReader<S> {
    /// Creates a new reader over the given byte parser.
    pub fn new(parser: ByteParser<S>) -> Self {
        Self {
            parser,
            newick_parser: NewickParser::new(),
        }
    }

    /// Reads all trees until EOF.
    ///
    /// # Errors
    /// Returns a [ParsingError] if a TRANSLATE command, a TREE command or a
    /// Newick string is malformed.
    pub fn read_all(mut self) -> Result<Vec<Tree>, ParsingError> {
        let mut trees = Vec::new();
        while let Some(tree) = self.next_tree()? {
            trees.push(tree);
        }
        Ok(trees)
    }

    /// Reads the next tree, skipping all other commands on the way.
    ///
    /// # Returns
    /// * `Ok(Some(Tree))` - The next tree
    /// * `Ok(None)` - If EOF was reached without finding another tree
    pub fn next_tree(&mut self) -> Result<Option<Tree>, ParsingError> {
        loop {
            self.parser.skip_comment_and_whitespace()?;

            if self.parser.is_eof() {
                return Ok(None);
            }

            if self.parser.peek() == Some(b'#') {
                self.parser.skip_line();
            } else if self.parser.peek() == Some(b'(') {
                return self.newick_parser.parse_str(&mut self.parser).map(Some);
            } else if self.parser.consume_if_keyword("translate") {
                let translation = self.parse_translate_command()?;
                debug!("TRANSLATE command with {} entries", translation.len());
                self.newick_parser = NewickParser::new().with_translation(translation);
            } else if self.parser.consume_if_keyword("tree") || self.parser.consume_if_keyword("utree") {
                return self.parse_tree_command().map(Some);
            } else {
                // BEGIN, END and any other command
                self.parser.consume_until(b';', ConsumeMode::Inclusive);
            }
        }
    }

    /// Parses the rest of a `TREE [*] <name> = <newick>;` command,
    /// keyword already consumed.
    fn parse_tree_command(&mut self) -> Result<Tree, ParsingError> {
        self.parser.skip_comment_and_whitespace()?;
        self.parser.consume_if(b'*');

        let name = self.parser.parse_label(TREE_NAME_DELIMITERS)?;
        self.parser.skip_comment_and_whitespace()?;
        if !self.parser.consume_if(b'=') {
            return Err(ParsingError::invalid_trees_block(
                &self.parser,
                format!("Expected '=' after tree name '{name}'"),
            ));
        }

        let tree = self.newick_parser.parse_str(&mut self.parser)?;
        if name.is_empty() {
            Ok(tree)
        } else {
            Ok(tree.with_name(name))
        }
    }

    /// Parses the rest of a `TRANSLATE <key> <label>, ...;` command,
    /// keyword already consumed.
    fn parse_translate_command(&mut self) -> Result<HashMap<String, String>, ParsingError> {
        let mut translation = HashMap::new();

        loop {
            let key = self.parser.parse_label(NEXUS_LABEL_DELIMITERS)?;
            let label = self.parser.parse_label(NEXUS_LABEL_DELIMITERS)?;
            if key.is_empty() || label.is_empty() {
                return Err(ParsingError::invalid_translate_command(
                    &self.parser,
                    "expected pairs of key and label".to_string(),
                ));
            }
            if translation.insert(key.clone(), label).is_some() {
                return Err(ParsingError::invalid_translate_command(
                    &self.parser,
                    format!("key '{key}' is translated twice"),
                ));
            }

            self.parser.skip_comment_and_whitespace()?;
            match self.parser.next_byte() {
                Some(b',') => continue,
                Some(b';') => return Ok(translation),
                Some(b) => {
                    return Err(ParsingError::invalid_translate_command(
                        &self.parser,
                        format!("expected ',' or ';' after pair but found {:?}", b as char),
                    ));
                }
                None => return Err(ParsingError::unexpected_eof(&self.parser)),
            }
        }
    }
}
