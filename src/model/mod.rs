//! Data model for rooted phylogenetic trees.
//!
//! # Tree representation
//! Trees are represented by [Tree], owning a root [Node]. Each node is
//! either a `Leaf` or an `Internal` node holding an ordered list of owned
//! children, so trees of any out-degree are supported and no parent
//! references exist.
//!
//! # Structural passes
//! The reconciliation pipeline mutates trees only through a small set of
//! passes on [Tree]:
//! - [Tree::strip_internal_names]
//! - [Tree::rename_leaves]
//! - [Tree::prune_leaves] (with recursive removal of emptied parents)
//! - [Tree::collapse_unary_nodes] (with branch length additivity)

pub mod node;
pub mod tree;

pub use node::BranchLength;
pub use node::Node;
pub use tree::PreOrderIter;
pub use tree::Tree;
