//! A plain Binary Search Tree. Nothing keeps it balanced: inserting keys in sorted order
//! produces a chain as tall as the tree is large.
//!
//! Every operation here walks the tree iteratively, so a degenerate tree can't overflow the
//! stack.
//!
//! # Examples
//!
//! ```
//! use ordered_tree::{Bst, OrderedTree};
//!
//! let mut tree = Bst::new();
//!
//! // Nothing in here yet.
//! assert!(!tree.search(&1));
//!
//! for key in 1..=4 {
//!     tree.insert(key);
//! }
//! assert!(tree.search(&1));
//!
//! // Sorted input makes a chain.
//! assert_eq!(tree.tree_height(), 4);
//!
//! // Deleting reports whether anything was removed.
//! assert!(tree.delete(&1));
//! assert!(!tree.delete(&1));
//! assert_eq!(tree.size(), 3);
//! ```

use std::cmp::Ordering;
use std::fmt;

use tracing::debug;

use crate::kind::TreeKind;
use crate::node::NodeId;
use crate::tree::{OrderedTree, TreeCore};

/// An unbalanced Binary Search Tree.
#[derive(Clone)]
pub struct Bst<K> {
    core: TreeCore<K>,
}

impl<K> Default for Bst<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> fmt::Debug for Bst<K>
where
    K: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bst").field("core", &self.core).finish()
    }
}

impl<K> fmt::Display for Bst<K>
where
    K: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.core.write_sideways(f)
    }
}

impl<K> Bst<K> {
    /// Generates a new, empty `Bst`.
    pub fn new() -> Self {
        Self {
            core: TreeCore::new(),
        }
    }
}

impl<K: Ord> OrderedTree<K> for Bst<K> {
    fn core(&self) -> &TreeCore<K> {
        &self.core
    }

    fn core_mut(&mut self) -> &mut TreeCore<K> {
        &mut self.core
    }

    fn kind(&self) -> TreeKind {
        TreeKind::Unbalanced
    }

    /// Walks down from the root, going left when `key` is smaller than the node and right
    /// otherwise, and hangs a new leaf off the first empty slot.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::{Bst, OrderedTree};
    ///
    /// let mut tree = Bst::new();
    /// let first = tree.insert(1);
    /// let second = tree.insert(1);
    ///
    /// // Duplicates are kept and go to the right.
    /// assert_eq!(tree.size(), 2);
    /// assert_eq!(tree.node(first).unwrap().right(), Some(second));
    /// ```
    fn insert(&mut self, key: K) -> NodeId {
        let core = &mut self.core;
        let Some(mut current) = core.root else {
            let id = core.allocate(key);
            core.root = Some(id);
            debug!(?id, size = core.size(), "inserted root");
            return id;
        };

        let mut path = Vec::new();
        let id = loop {
            path.push(current);
            let node = core.node(current);
            let go_left = key < node.key;
            let next = if go_left { node.left } else { node.right };
            match next {
                Some(next) => current = next,
                None => {
                    let id = core.allocate(key);
                    let parent = core.node_mut(current);
                    if go_left {
                        parent.left = Some(id);
                    } else {
                        parent.right = Some(id);
                    }
                    break id;
                }
            }
        };

        if cfg!(debug_assertions) {
            let parent = core.node(current);
            let child = core.node(id);
            if parent.left == Some(id) {
                assert!(child.key < parent.key);
            } else {
                assert!(child.key >= parent.key);
            }
        }

        for ancestor in path.into_iter().rev() {
            core.fix_height(ancestor);
        }
        debug!(?id, size = core.size(), "inserted");
        id
    }

    /// Removes the first node found with a key equal to `key`. A node with two children takes
    /// the key of its in-order successor (the smallest key of its right subtree) and the
    /// successor's node is removed instead.
    fn delete(&mut self, key: &K) -> bool {
        let core = &mut self.core;

        // Ancestors of the node being removed, root first.
        let mut path = Vec::new();
        let mut current = core.root;
        let target = loop {
            let Some(id) = current else {
                debug!(size = core.size(), "key to delete not found");
                return false;
            };
            let node = core.node(id);
            current = match key.cmp(&node.key) {
                Ordering::Less => node.left,
                Ordering::Equal => break id,
                Ordering::Greater => node.right,
            };
            path.push(id);
        };

        let node = core.node(target);
        match (node.left, node.right) {
            (Some(_), Some(right)) => {
                path.push(target);
                let mut successor = right;
                while let Some(left) = core.node(successor).left {
                    path.push(successor);
                    successor = left;
                }
                let successor_right = core.node(successor).right;
                core.relink(path.last().copied(), successor, successor_right);
                let removed = core.release(successor);
                core.node_mut(target).key = removed.key;
            }
            (left, right) => {
                core.relink(path.last().copied(), target, left.or(right));
                core.release(target);
            }
        }

        for ancestor in path.into_iter().rev() {
            core.fix_height(ancestor);
        }
        debug!(size = core.size(), "deleted");
        true
    }
}

impl<K> TreeCore<K> {
    /// Points whichever link of `parent` (or the root) referred to `old` at `new`.
    fn relink(&mut self, parent: Option<NodeId>, old: NodeId, new: Option<NodeId>) {
        match parent {
            None => self.root = new,
            Some(parent) => {
                let parent = self.node_mut(parent);
                if parent.left == Some(old) {
                    parent.left = new;
                } else {
                    debug_assert_eq!(parent.right, Some(old));
                    parent.right = new;
                }
            }
        }
    }
}
