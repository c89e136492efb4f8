//! Tree transformer: relabels and prunes a reference tree according to a
//! [Resolution](crate::identity::Resolution).
//!
//! The passes run in a fixed order:
//! 1. Strip internal names
//! 2. Translate leaf names to codes, lowercasing untranslated ones
//! 3. Prune excluded leaves (and emptied ancestors)
//! 4. Prune unnamed leaves (and emptied ancestors)
//! 5. Collapse internal nodes with a single child
//!
//! A tree pruned down to nothing is not an error here; callers inspect the
//! [TransformReport].

use crate::identity::{ExclusionSet, NameCodeMapping};
use crate::model::Tree;
use tracing::debug;

/// Counts of what a [TreeTransformer] did to one tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransformReport {
    /// Leaves renamed to their code
    pub translated: usize,
    /// Leaves without mapping entry, lowercased
    pub untranslated: usize,
    /// Leaves removed because their name is excluded
    pub excluded: usize,
    /// Leaves removed because they are unnamed
    pub unnamed: usize,
    /// Internal nodes removed because they had a single child
    pub collapsed: usize,
    /// Leaves left in the tree
    pub remaining: usize,
}

impl TransformReport {
    /// Returns `true` if at most one leaf survived, leaving no tree topology.
    pub fn is_degenerate(&self) -> bool {
        self.remaining <= 1
    }
}

/// Applies a resolved name/code mapping and exclusion set to trees.
///
/// # Example
/// ```
/// use isoprune::identity::{ExclusionSet, NameCodeMapping};
/// use isoprune::newick::{self, LengthFormat};
/// use isoprune::transform::TreeTransformer;
///
/// let mapping: NameCodeMapping = [("Paiwan", "pwn")].into_iter().collect();
/// let exclusions: ExclusionSet = ["tagalog"].into_iter().collect();
/// let mut tree = newick::parse_str("((Paiwan:1,Tagalog:1)x:2,Cebuano:3);").unwrap();
///
/// let report = TreeTransformer::new(&mapping, &exclusions).transform(&mut tree);
/// assert_eq!(report.remaining, 2);
/// assert_eq!(tree.to_newick(LengthFormat::Shortest), "(pwn:3,cebuano:3);");
/// ```
pub struct TreeTransformer<'a> {
    mapping: &'a NameCodeMapping,
    exclusions: &'a ExclusionSet,
}

impl<'a> TreeTransformer<'a> {
    /// Creates a transformer from a resolved mapping and the matching exclusion set.
    pub fn new(mapping: &'a NameCodeMapping, exclusions: &'a ExclusionSet) -> Self {
        Self {
            mapping,
            exclusions,
        }
    }

    /// Transforms the tree in place, see [module docs](self) for the passes.
    pub fn transform(&self, tree: &mut Tree) -> TransformReport {
        let mut report = TransformReport::default();

        tree.strip_internal_names();

        tree.rename_leaves(|name| match self.mapping.get(name) {
            Some(code) => {
                report.translated += 1;
                code.to_string()
            }
            None => {
                report.untranslated += 1;
                name.to_lowercase()
            }
        });

        report.excluded = tree.prune_leaves(|name| self.exclusions.contains(name));
        report.unnamed = tree.prune_leaves(str::is_empty);
        report.collapsed = tree.collapse_unary_nodes();
        report.remaining = tree.num_leaves();

        debug!(
            "Transformed tree {}: {:?}",
            tree.name().unwrap_or("<unnamed>"),
            report
        );
        report
    }
}
