//! Tree module for the owned phylogenetic tree representation.
//!
//! A [Tree] owns its root [Node], which in turn owns its children. All
//! structural passes are written as bottom-up rewrites: a subtree is
//! rebuilt from its rewritten children and handed back to its parent,
//! or dropped by returning `None`. This avoids parent references entirely.

use crate::model::node::{BranchLength, Node};
use crate::newick::{self, LengthFormat};

// =$========================================================================$=
// TREE
// =$========================================================================$=
/// A rooted phylogenetic tree with arbitrary out-degree.
///
/// # Structure
/// - The root is an owned [Node]; every node owns its children.
/// - Leaves carry names, internal nodes may carry labels.
/// - Branch lengths are optional, but if provided are non-negative.
/// - After [Tree::prune_leaves] no internal node is childless, unless the
///   whole tree was pruned away, in which case the root is an empty internal
///   node (see [Tree::is_empty]).
/// - After [Tree::collapse_unary_nodes] no internal node has exactly one child.
///
/// # Example
/// ```
/// use isoprune::model::{BranchLength, Node, Tree};
/// use isoprune::newick::LengthFormat;
///
/// // ((a:1,b:1):0.5,c:1.5);
/// let ab = Node::new_internal(
///     vec![
///         Node::new_leaf("a", Some(BranchLength::new(1.0))),
///         Node::new_leaf("b", Some(BranchLength::new(1.0))),
///     ],
///     Some(BranchLength::new(0.5)),
/// );
/// let mut tree = Tree::new(Node::new_internal(
///     vec![ab, Node::new_leaf("c", Some(BranchLength::new(1.5)))],
///     None,
/// ));
///
/// tree.prune_leaves(|name| name == "b");
/// tree.collapse_unary_nodes();
/// assert_eq!(tree.leaf_names(), vec!["a", "c"]);
/// assert_eq!(tree.to_newick(LengthFormat::Shortest), "(a:1.5,c:1.5);");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Tree {
    /// Root of this tree
    root: Node,

    /// Name of tree; optional, e.g. when parsed from NEXUS file
    name: Option<String>,
}

// ============================================================================
// New, Getters / Accessors, etc. (pub)
// ============================================================================
impl Tree {
    /// Creates a new tree from its root.
    pub fn new(root: Node) -> Self {
        Tree { root, name: None }
    }

    /// Attaches a name to this tree.
    pub fn with_name(mut self, name: String) -> Self {
        self.name = Some(name);
        self
    }

    /// Returns reference to name of this tree, or `None` if not set.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns a reference to the root.
    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Returns the number of leaves in this tree.
    pub fn num_leaves(&self) -> usize {
        self.root.num_leaves()
    }

    /// Returns the number of internal nodes in this tree (including the root).
    pub fn num_internal(&self) -> usize {
        self.nodes().filter(|node| node.is_internal()).count()
    }

    /// Returns the number of nodes in this tree.
    pub fn num_nodes(&self) -> usize {
        self.nodes().count()
    }

    /// Returns `true` if no leaf is left, i.e. the tree was pruned down to a
    /// single childless node.
    pub fn is_empty(&self) -> bool {
        self.num_leaves() == 0
    }

    /// Returns the leaf names in pre-order (left to right) traversal order.
    pub fn leaf_names(&self) -> Vec<&str> {
        self.nodes()
            .filter_map(|node| match node {
                Node::Leaf { name, .. } => Some(name.as_str()),
                Node::Internal { .. } => None,
            })
            .collect()
    }

    /// Returns an iterator over all nodes in pre-order traversal.
    pub fn nodes(&self) -> PreOrderIter<'_> {
        PreOrderIter {
            stack: vec![&self.root],
        }
    }

    /// Returns `true` if some internal node has exactly one child.
    pub fn has_unary_nodes(&self) -> bool {
        self.nodes()
            .any(|node| node.is_internal() && node.children().len() == 1)
    }

    /// Validates the tree structure: apart from an empty root, no internal
    /// node may be childless.
    pub fn is_valid(&self) -> bool {
        if self.is_empty() {
            return self.root.is_internal() && self.root.children().is_empty();
        }
        self.nodes()
            .all(|node| node.is_leaf() || !node.children().is_empty())
    }

    /// Returns the Newick representation of this tree with closing semicolon.
    ///
    /// See [newick::to_newick].
    pub fn to_newick(&self, format: LengthFormat) -> String {
        newick::to_newick(self, format)
    }
}

// ============================================================================
// Structural passes (pub)
// ============================================================================
impl Tree {
    /// Clears the labels of all internal nodes.
    pub fn strip_internal_names(&mut self) {
        fn strip(node: &mut Node) {
            if let Node::Internal { name, children, .. } = node {
                *name = None;
                children.iter_mut().for_each(strip);
            }
        }

        strip(&mut self.root);
    }

    /// Replaces the name of every leaf by `rename(current_name)`.
    pub fn rename_leaves<F: FnMut(&str) -> String>(&mut self, mut rename: F) {
        fn visit<F: FnMut(&str) -> String>(node: &mut Node, rename: &mut F) {
            match node {
                Node::Leaf { name, .. } => *name = rename(name),
                Node::Internal { children, .. } => {
                    children.iter_mut().for_each(|child| visit(child, rename))
                }
            }
        }

        visit(&mut self.root, &mut rename);
    }

    /// Removes every leaf whose name satisfies `remove`, together with every
    /// internal node left without children, recursively up the tree.
    ///
    /// If all leaves are removed, the root becomes an empty internal node.
    ///
    /// # Returns
    /// Number of removed leaves
    pub fn prune_leaves<F: FnMut(&str) -> bool>(&mut self, mut remove: F) -> usize {
        // Prunes subtree, returning `None` if nothing is left of it
        fn prune<F: FnMut(&str) -> bool>(
            node: Node,
            remove: &mut F,
            removed: &mut usize,
        ) -> Option<Node> {
            match node {
                Node::Leaf { ref name, .. } => {
                    if remove(name) {
                        *removed += 1;
                        None
                    } else {
                        Some(node)
                    }
                }
                Node::Internal {
                    name,
                    children,
                    branch_length,
                } => {
                    let children: Vec<Node> = children
                        .into_iter()
                        .filter_map(|child| prune(child, remove, removed))
                        .collect();
                    if children.is_empty() {
                        None
                    } else {
                        Some(Node::Internal {
                            name,
                            children,
                            branch_length,
                        })
                    }
                }
            }
        }

        let mut removed = 0;
        let root = std::mem::replace(&mut self.root, Node::empty());
        if let Some(root) = prune(root, &mut remove, &mut removed) {
            self.root = root;
        }

        removed
    }

    /// Removes every internal node with exactly one child, re-attaching the
    /// child to the removed node's parent. The child's new branch length is
    /// the sum of both lengths (see [BranchLength::join]), which preserves
    /// root-to-leaf distances. Chains of such nodes collapse completely.
    ///
    /// A root with a single child is replaced by that child.
    ///
    /// # Returns
    /// Number of removed nodes
    pub fn collapse_unary_nodes(&mut self) -> usize {
        // Rewrites subtree bottom-up, returning its collapsed replacement
        fn collapse(node: Node, collapsed: &mut usize) -> Node {
            match node {
                Node::Leaf { .. } => node,
                Node::Internal {
                    name,
                    children,
                    branch_length,
                } => {
                    let mut children: Vec<Node> = children
                        .into_iter()
                        .map(|child| collapse(child, collapsed))
                        .collect();

                    if children.len() == 1 {
                        if let Some(mut child) = children.pop() {
                            *collapsed += 1;
                            let joined = BranchLength::join(branch_length, child.branch_length());
                            child.set_branch_length(joined);
                            return child;
                        }
                    }

                    Node::Internal {
                        name,
                        children,
                        branch_length,
                    }
                }
            }
        }

        let mut collapsed = 0;
        let root = std::mem::replace(&mut self.root, Node::empty());
        self.root = collapse(root, &mut collapsed);

        collapsed
    }
}

// =$========================================================================$=
// ITERATOR
// =$========================================================================$=
/// Pre-order iterator over the nodes of a [Tree], visiting children left to right.
pub struct PreOrderIter<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for PreOrderIter<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children().iter().rev());
        Some(node)
    }
}
