use thiserror::Error;

use crate::node::NodeId;

/// A broken structural invariant found by [`OrderedTree::validate`][crate::OrderedTree::validate].
///
/// Seeing one of these always means a bug in this crate: none of the public operations can put
/// a tree into an invalid state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantError {
    /// A key is outside the range allowed by its ancestors.
    #[error("{node:?} is out of order with respect to its ancestors")]
    OutOfOrder {
        /// The misplaced node.
        node: NodeId,
    },
    /// A node's cached height disagrees with its children.
    #[error("{node:?} caches height {cached} but its children imply {expected}")]
    HeightMismatch {
        /// The node with the stale height.
        node: NodeId,
        /// The height stored on the node.
        cached: u32,
        /// `1 + max(height(left), height(right))`.
        expected: u32,
    },
    /// A node of an AVL tree has children whose heights differ by more than one.
    #[error("{node:?} has balance factor {balance_factor}")]
    Unbalanced {
        /// The unbalanced node.
        node: NodeId,
        /// `height(left) - height(right)`.
        balance_factor: i64,
    },
    /// The tree's size counter disagrees with the number of reachable nodes.
    #[error("size is {recorded} but {reachable} nodes are reachable")]
    SizeMismatch {
        /// The value of the size counter.
        recorded: usize,
        /// Nodes found by walking from the root.
        reachable: usize,
    },
    /// A link points at a node that is no longer stored in the tree.
    #[error("link to {node:?} does not resolve to a live node")]
    DanglingLink {
        /// The dangling id.
        node: NodeId,
    },
}
