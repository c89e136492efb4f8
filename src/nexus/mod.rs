//! Tree extraction from NEXUS-flavored tree files.
//!
//! Tree files handed to the pipeline are typically the output of a
//! summarization tool: a `#NEXUS` header, possibly a TAXA block, and a TREES
//! block with an optional `TRANSLATE` command followed by one or more
//! `tree <name> = <newick>;` commands. Only the trees are of interest here.
//! See [TreeFileReader] for the exact rules.
//!
//! # Quick API
//! - [`parse_str`] - reads all trees from file contents
//! - [`parse_file`] - reads all trees from a file
//!
//! # Example
//! ```
//! use isoprune::nexus::parse_str;
//!
//! let input = "#NEXUS\n\
//!     Begin trees;\n\
//!     \tTranslate 1 Paiwan, 2 'East Futuna', 3 Tagalog;\n\
//!     tree TREE1 = [&R] ((1:0.5,3:0.5):0.1,2:0.6);\n\
//!     End;\n";
//! let trees = parse_str(input).unwrap();
//! assert_eq!(trees.len(), 1);
//! assert_eq!(trees[0].name(), Some("TREE1"));
//! assert_eq!(trees[0].leaf_names(), vec!["Paiwan", "Tagalog", "East Futuna"]);
//! ```

mod parser;

pub use self::parser::TreeFileReader;

use crate::model::Tree;
use crate::parser::ParsingError;
use crate::parser::byte_parser::ByteParser;
use crate::parser::byte_source::InMemoryByteSource;
use std::path::Path;

// ============================================================================
// QUICK PARSING API (pub)
// ============================================================================
/// Reads all trees from the contents of a NEXUS-flavored tree file
/// (or a plain list of Newick strings).
pub fn parse_str<S: AsRef<str>>(input: S) -> Result<Vec<Tree>, ParsingError> {
    TreeFileReader::new(ByteParser::for_str(input.as_ref())).read_all()
}

/// Reads all trees from a NEXUS-flavored tree file (or a file with a plain
/// list of Newick strings).
///
/// # Errors
/// Returns an I/O error if the file cannot be read, or a [ParsingError] if
/// its contents are malformed.
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Vec<Tree>, crate::PipelineError> {
    let contents = std::fs::read(path)?;
    let parser = ByteParser::new(InMemoryByteSource::from_vec(contents));
    Ok(TreeFileReader::new(parser).read_all()?)
}
