//! The atomic element of every tree in this crate.
//!
//! A [`Node`] never owns its children directly. Both children are [`NodeId`]s into the arena of
//! the tree that owns the node, so a node can only be read through that tree (see
//! [`OrderedTree::node`][crate::OrderedTree::node]).

use std::fmt;

/// A handle to a node stored in a tree.
///
/// Ids are only meaningful for the tree that handed them out. Once the node is removed (by
/// `delete` or `reset`) its id goes stale and resolves to `None` even if the slot is later
/// reused for a new node.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeId {
    index: u32,
    generation: u32,
}

impl NodeId {
    pub(crate) fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    pub(crate) fn index(self) -> usize {
        self.index as usize
    }

    pub(crate) fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({}v{})", self.index, self.generation)
    }
}

/// Cosmetic state a presentation layer attaches to a node.
///
/// These never take part in ordering, height, or balance decisions, so they can be freely
/// written through [`OrderedTree::flags_mut`][crate::OrderedTree::flags_mut].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Flags {
    /// Set when the node is created. The tree never clears it.
    pub is_new: bool,
    /// Set by whoever is highlighting a traversal. Cleared by
    /// [`OrderedTree::clear_visited`][crate::OrderedTree::clear_visited].
    pub is_visited: bool,
}

/// A single entry in a tree.
///
/// The key and links are read-only from outside the crate. A node with no children is a "leaf"
/// and has a height of 1.
#[derive(Clone, Debug)]
pub struct Node<K> {
    pub(crate) key: K,
    pub(crate) left: Option<NodeId>,
    pub(crate) right: Option<NodeId>,
    pub(crate) height: u32,
    pub(crate) flags: Flags,
}

impl<K> Node<K> {
    pub(crate) fn new(key: K) -> Self {
        Self {
            key,
            left: None,
            right: None,
            height: 1,
            flags: Flags {
                is_new: true,
                is_visited: false,
            },
        }
    }

    /// The key this node is ordered by.
    pub fn key(&self) -> &K {
        &self.key
    }

    /// The root of the left subtree, if any. Every key in it is less than this node's key.
    pub fn left(&self) -> Option<NodeId> {
        self.left
    }

    /// The root of the right subtree, if any. Every key in it is at least this node's key.
    pub fn right(&self) -> Option<NodeId> {
        self.right
    }

    /// How many levels are in the subtree rooted at this node.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The cosmetic flags of this node.
    pub fn flags(&self) -> Flags {
        self.flags
    }

    /// Shorthand for `self.flags().is_new`.
    pub fn is_new(&self) -> bool {
        self.flags.is_new
    }

    /// Shorthand for `self.flags().is_visited`.
    pub fn is_visited(&self) -> bool {
        self.flags.is_visited
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_node_is_a_new_unvisited_leaf() {
        let node = Node::new(7);

        assert_eq!(node.key(), &7);
        assert_eq!(node.height(), 1);
        assert_eq!((node.left(), node.right()), (None, None));
        assert!(node.is_new());
        assert!(!node.is_visited());
    }

    #[test]
    fn ids_compare_by_slot_and_generation() {
        assert_eq!(NodeId::new(3, 1), NodeId::new(3, 1));
        assert_ne!(NodeId::new(3, 1), NodeId::new(3, 2));
        assert_eq!(format!("{:?}", NodeId::new(3, 2)), "NodeId(3v2)");
    }
}
