//! Node module for the owned phylogenetic tree representation.

use std::ops::{Add, Deref};

// =#========================================================================#=
// NODE
// =#========================================================================#=
/// Represents a node in a phylogenetic tree.
///
/// A node can be either:
/// - **Leaf**: Has a name (empty if unnamed) and might have a branch length
/// - **Internal**: Owns an ordered list of children, might carry a label
///   (e.g. a clade name or support value) and might have a branch length
///
/// # Invariants
/// - Each node exclusively owns its children; there are no parent references.
/// - `branch_length` is non-negative (enforced by [BranchLength]); might not be set.
/// - Internal nodes have at least one child in a well-formed tree. An internal
///   node without children only occurs as the root of a tree that was pruned
///   down to nothing.
#[derive(PartialEq, Debug, Clone)]
pub enum Node {
    /// Leaf node (has name, no children)
    Leaf {
        /// Name of this leaf; empty if unnamed
        name: String,
        /// Distance to parent node (optional, non-negative if present)
        branch_length: Option<BranchLength>,
    },
    /// Internal node (has children)
    Internal {
        /// Internal label as found in the source, if any
        name: Option<String>,
        /// Ordered children of this node
        children: Vec<Node>,
        /// Distance to parent node (optional, non-negative if present)
        branch_length: Option<BranchLength>,
    },
}

impl Node {
    /// Creates a new leaf node.
    pub fn new_leaf<S: Into<String>>(name: S, branch_length: Option<BranchLength>) -> Self {
        Node::Leaf {
            name: name.into(),
            branch_length,
        }
    }

    /// Creates a new internal node without label.
    pub fn new_internal(children: Vec<Node>, branch_length: Option<BranchLength>) -> Self {
        Node::Internal {
            name: None,
            children,
            branch_length,
        }
    }

    /// Creates an internal node without children, standing for a tree
    /// with no leaves left.
    pub fn empty() -> Self {
        Node::new_internal(Vec::new(), None)
    }

    /// Returns `true` if this node is a leaf.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    /// Returns `true` if this node is an internal node.
    pub fn is_internal(&self) -> bool {
        matches!(self, Node::Internal { .. })
    }

    /// Returns the name of this node: the leaf name (possibly empty), or the
    /// internal label if one is set.
    pub fn name(&self) -> Option<&str> {
        match self {
            Node::Leaf { name, .. } => Some(name),
            Node::Internal { name, .. } => name.as_deref(),
        }
    }

    /// Returns the branch length, i.e. distance to parent, if set.
    pub fn branch_length(&self) -> Option<BranchLength> {
        match self {
            Node::Leaf { branch_length, .. } | Node::Internal { branch_length, .. } => {
                *branch_length
            }
        }
    }

    /// Sets the branch length.
    pub fn set_branch_length(&mut self, length: Option<BranchLength>) {
        match self {
            Node::Leaf { branch_length, .. } | Node::Internal { branch_length, .. } => {
                *branch_length = length
            }
        }
    }

    /// Returns the children, empty for a leaf.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Leaf { .. } => &[],
            Node::Internal { children, .. } => children,
        }
    }

    /// Returns the number of leaves in the subtree rooted at this node.
    pub fn num_leaves(&self) -> usize {
        match self {
            Node::Leaf { .. } => 1,
            Node::Internal { children, .. } => children.iter().map(Node::num_leaves).sum(),
        }
    }
}

// =#========================================================================#=
// BRANCH LENGTH
// =#========================================================================#=
/// Branch length in a phylogenetic tree, enforced non-negative.
///
/// Represents the evolutionary distance between a node and its parent.
/// The value is guaranteed to be non-negative and finite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BranchLength(f64);

impl BranchLength {
    /// Creates a new branch length.
    ///
    /// # Panics
    /// Panics if `length` is negative or not finite.
    /// Use [BranchLength::try_new] for unchecked input.
    pub fn new(length: f64) -> Self {
        assert!(length >= 0.0, "Branch length must be non-negative, got {}", length);
        assert!(length.is_finite(), "Branch length must be finite, got {}", length);
        BranchLength(length)
    }

    /// Creates a new branch length, or `None` if `length` is negative or not finite.
    pub fn try_new(length: f64) -> Option<Self> {
        (length >= 0.0 && length.is_finite()).then_some(BranchLength(length))
    }

    /// Length of the edge replacing two consecutive edges when the node
    /// between them is removed. An absent length counts as zero as long as
    /// the other one is present.
    pub fn join(upper: Option<BranchLength>, lower: Option<BranchLength>) -> Option<BranchLength> {
        match (upper, lower) {
            (Some(upper), Some(lower)) => Some(upper + lower),
            (Some(length), None) | (None, Some(length)) => Some(length),
            (None, None) => None,
        }
    }
}

impl Add for BranchLength {
    type Output = BranchLength;

    fn add(self, other: BranchLength) -> BranchLength {
        BranchLength(self.0 + other.0)
    }
}

impl Deref for BranchLength {
    type Target = f64;
    fn deref(&self) -> &f64 {
        &self.0
    }
}
