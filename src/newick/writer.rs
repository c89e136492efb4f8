//! Newick format writing.
//!
//! Branch lengths are always written in fixed-point decimal notation, never
//! in exponential notation like `1e-7`, since some downstream consumers of
//! the pruned trees cannot read the latter.

use crate::model::{BranchLength, Node, Tree};
use crate::parser::utils::quote_label;

/// Approximate characters per node: label or parentheses plus ":0.123456789"
const CHARS_PER_NODE: usize = 16;

/// Fixed-point formatting of branch lengths.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum LengthFormat {
    /// Shortest representation that parses back to the same value.
    #[default]
    Shortest,
    /// Exactly this many digits after the decimal point.
    Decimals(usize),
}

/// Formats a branch length in fixed-point notation.
///
/// # Examples
/// ```
/// use isoprune::model::BranchLength;
/// use isoprune::newick::{LengthFormat, format_branch_length};
///
/// let tiny = BranchLength::new(1.5e-10);
/// assert_eq!(format_branch_length(tiny, LengthFormat::Shortest), "0.00000000015");
/// assert_eq!(format_branch_length(tiny, LengthFormat::Decimals(4)), "0.0000");
/// assert_eq!(format_branch_length(BranchLength::new(2.0), LengthFormat::Shortest), "2");
/// ```
pub fn format_branch_length(length: BranchLength, format: LengthFormat) -> String {
    // `Display` for f64 never switches to exponential notation
    match format {
        LengthFormat::Shortest => format!("{}", *length),
        LengthFormat::Decimals(decimals) => format!("{:.*}", decimals, *length),
    }
}

/// Returns the Newick representation of a tree with closing semicolon.
///
/// Labels that need it are quoted (see [quote_label]); internal labels and
/// a root branch length are written if present. A tree without leaves is
/// written as `();`.
pub fn to_newick(tree: &Tree, format: LengthFormat) -> String {
    fn push_branch_length(newick: &mut String, branch_length: Option<BranchLength>, format: LengthFormat) {
        if let Some(branch_length) = branch_length {
            newick.push(':');
            newick.push_str(&format_branch_length(branch_length, format));
        }
    }

    fn build_newick(node: &Node, newick: &mut String, format: LengthFormat) {
        match node {
            Node::Leaf { name, branch_length } => {
                newick.push_str(&quote_label(name));
                push_branch_length(newick, *branch_length, format);
            }
            Node::Internal {
                name,
                children,
                branch_length,
            } => {
                newick.push('(');
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        newick.push(',');
                    }
                    build_newick(child, newick, format);
                }
                newick.push(')');
                if let Some(name) = name {
                    newick.push_str(&quote_label(name));
                }
                push_branch_length(newick, *branch_length, format);
            }
        }
    }

    let mut newick = String::with_capacity(tree.num_nodes() * CHARS_PER_NODE);
    build_newick(tree.root(), &mut newick, format);
    newick.push(';');

    newick
}

/// Returns the Newick representations of the given trees, one tree per line.
pub fn to_newick_lines(trees: &[Tree], format: LengthFormat) -> String {
    trees
        .iter()
        .map(|tree| to_newick(tree, format) + "\n")
        .collect()
}
