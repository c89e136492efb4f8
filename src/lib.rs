//! Isoprune reconciles the languages of a reference phylogeny with those of
//! a typological feature table and prunes the tree down to the shared set.
//!
//! Both sources name languages differently, so each is first mapped to a
//! shared external code (ISO 639-3). Core functionality provided:
//! - Identity resolution: load both name/code listings, detect codes used by
//!   several names, keep a name only where both sources agree on it, and
//!   produce duplicate-free mappings plus exclusion sets.
//!   See [crate::identity].
//! - Tree parsing: Newick strings and NEXUS-flavored tree files, including
//!   `TRANSLATE` commands, into an owned n-ary tree model.
//!   See [crate::newick], [crate::nexus] and [crate::model].
//! - Tree transformation: relabel leaves with codes, prune excluded and
//!   unnamed leaves, collapse single-child nodes while keeping root-to-leaf
//!   distances. See [crate::transform].
//! - Output: pruned trees with fixed-point branch lengths, a flat list of
//!   surviving codes and optionally the final mappings.
//!   See [crate::pipeline].
//!
//! Limitations:
//! - Only leaf labels are considered; internal labels and annotations are dropped
//! - Inputs are loaded fully into memory
//!
//! # Usage patterns
//! 1. Run the whole pipeline from a [PipelineConfig](crate::config::PipelineConfig)
//!    with [run].
//! 2. Use the components directly for full control.
//!
//! ## Example
//! ```
//! use isoprune::identity::{self, ListingFormat, TableFormat};
//! use isoprune::newick::LengthFormat;
//! use isoprune::transform::TreeTransformer;
//!
//! let listing = identity::parse_reference_listing(
//!     "pwn\tPaiwan\ntgl\tTagalog\nXXX\tOld Javanese\n",
//!     "listing",
//!     &ListingFormat::default(),
//! )?;
//! let features = identity::parse_feature_table(
//!     "Name,iso_code\nPaiwan,pwn\nTagalog,tgl\n",
//!     "table",
//!     &TableFormat::default(),
//! )?;
//! let resolution = identity::resolve(&listing, &features)?;
//!
//! let mut tree = isoprune::parse_newick_str("((Paiwan:1,'Old Javanese':1):1,Tagalog:2);")?;
//! TreeTransformer::new(&resolution.reference_mapping, &resolution.reference_exclusions)
//!     .transform(&mut tree);
//! assert_eq!(tree.to_newick(LengthFormat::Shortest), "(pwn:2,tgl:2);");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod error;
pub mod identity;
pub mod model;
pub mod newick;
pub mod nexus;
pub mod parser;
pub mod pipeline;
pub mod transform;

pub use error::PipelineError;
pub use pipeline::run;

use crate::model::Tree;
use crate::parser::ParsingError;
use std::path::Path;

// =#========================================================================#=
// QUICK API
// =#========================================================================#=
/// Parses a single Newick string; see [newick::parse_str].
pub fn parse_newick_str<S: AsRef<str>>(newick: S) -> Result<Tree, ParsingError> {
    newick::parse_str(newick)
}

/// Reads all trees of a NEXUS-flavored tree file; see [nexus::parse_file].
pub fn parse_tree_file<P: AsRef<Path>>(path: P) -> Result<Vec<Tree>, PipelineError> {
    nexus::parse_file(path)
}
