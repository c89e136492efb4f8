//! Newick format parser and writer for phylogenetic trees.
//!
//! This module provides [`NewickParser`] to parse Newick strings into owned
//! [`Tree`]s and the writing functions [`to_newick`] and [`to_newick_lines`].
//! The parser may be used directly or while extracting trees from a NEXUS
//! file (see [crate::nexus]).
//!
//! # Quick API
//! * [`parse_str`] - parses a single string, returns a [`Tree`]
//!
//! # Format
//! The Newick format has the following grammar:
//! * `tree ::= node ';'`
//! * `node ::= leaf | internal_node`
//! * `internal_node ::= '(' node (',' node)* ')' [label] [branch_length]`
//! * `leaf ::= [label] [branch_length]`
//! * `branch_length ::= ':' number`
//!
//! Furthermore:
//! * Whitespace can occur between elements,
//!   just not within an unquoted label or a branch_length
//! * Labels containing special characters are enclosed in single quotes,
//!   with internal single quotes doubled
//! * Comments are square brackets and can occur anywhere where whitespace is allowed;
//!   annotations such as `[&height=0.12]` are treated as comments
//!
//! # Writing
//! Branch lengths are written in fixed-point notation only, see [`LengthFormat`].

mod defs;
mod parser;
mod writer;

pub use self::parser::NewickParser;
pub use self::writer::{LengthFormat, format_branch_length, to_newick, to_newick_lines};

use crate::model::Tree;
use crate::parser::ParsingError;
use crate::parser::byte_parser::ByteParser;

// ============================================================================
// QUICK PARSING API (pub)
// ============================================================================
/// Parses a single Newick string to obtain a [`Tree`].
///
/// # Example
/// ```
/// use isoprune::newick::parse_str;
///
/// let tree = parse_str("(paiwan:0.3,(tagalog:0.1,cebuano:0.1):0.2);").unwrap();
/// assert_eq!(tree.num_leaves(), 3);
/// ```
pub fn parse_str<S: AsRef<str>>(newick: S) -> Result<Tree, ParsingError> {
    let mut byte_parser = ByteParser::for_str(newick.as_ref());
    NewickParser::new().parse_str(&mut byte_parser)
}
