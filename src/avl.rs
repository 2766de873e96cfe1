//! A self-balancing BST (specifically, an AVL tree).
//!
//! After every insert and delete, each node on the path back up to the root is checked and, if
//! one of its subtrees has become two levels taller than the other, rotated back into balance.
//! This keeps the height below roughly `1.44 * lg(N + 2)`.
//!
//! See <https://en.wikipedia.org/wiki/AVL_tree#Rebalancing> for terminology.
//!
//! Equal keys are kept, like in [`Bst`][crate::Bst], and inserted to the right. A rotation can
//! then move a node into the left subtree of an equal key, so the ordering an `AvlTree` keeps is
//! `left <= key <= right`. In-order traversal is still sorted and `search`/`delete` still find
//! every key.
//!
//! # Examples
//!
//! ```
//! use ordered_tree::{AvlTree, OrderedTree};
//!
//! let mut tree = AvlTree::new();
//!
//! // Sorted input would make a chain in a plain BST.
//! for key in 1..=7 {
//!     tree.insert(key);
//! }
//! assert_eq!(tree.tree_height(), 3);
//! assert_eq!(tree.root().map(|n| *n.key()), Some(4));
//!
//! assert!(tree.delete(&4));
//! assert!(!tree.search(&4));
//! assert_eq!(tree.validate(), Ok(()));
//! ```

use std::cmp::Ordering;
use std::fmt;

use tracing::{debug, trace};

use crate::error::InvariantError;
use crate::kind::TreeKind;
use crate::node::NodeId;
use crate::tree::{OrderedTree, TreeCore};
use crate::util::DeleteResult;

/// A self-balancing Binary Search Tree.
#[derive(Clone)]
pub struct AvlTree<K> {
    core: TreeCore<K>,
}

impl<K> Default for AvlTree<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> fmt::Debug for AvlTree<K>
where
    K: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AvlTree").field("core", &self.core).finish()
    }
}

impl<K> fmt::Display for AvlTree<K>
where
    K: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.core.write_sideways(f)
    }
}

impl<K> AvlTree<K> {
    /// Generates a new, empty `AvlTree`.
    pub fn new() -> Self {
        Self {
            core: TreeCore::new(),
        }
    }
}

impl<K: Ord> OrderedTree<K> for AvlTree<K> {
    fn core(&self) -> &TreeCore<K> {
        &self.core
    }

    fn core_mut(&mut self) -> &mut TreeCore<K> {
        &mut self.core
    }

    fn kind(&self) -> TreeKind {
        TreeKind::Avl
    }

    /// Inserts like a plain BST, then rebalances every ancestor of the new node, bottom up.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::{AvlTree, OrderedTree};
    ///
    /// let mut tree = AvlTree::new();
    /// tree.insert(10);
    /// tree.insert(20);
    /// tree.insert(30);
    ///
    /// // The right-right chain was rotated left.
    /// let root = tree.root().unwrap();
    /// assert_eq!(*root.key(), 20);
    /// assert_eq!(root.height(), 2);
    /// ```
    fn insert(&mut self, key: K) -> NodeId {
        let root = self.core.root;
        let (root, id) = self.core.insert_below(root, key);
        self.core.root = Some(root);
        debug!(?id, size = self.core.size(), "inserted");
        id
    }

    /// Deletes like a plain BST (taking the in-order successor's key when the node has two
    /// children), then rebalances every ancestor of the removed node, bottom up.
    fn delete(&mut self, key: &K) -> bool {
        let root = self.core.root;
        match self.core.delete_below(root, key) {
            DeleteResult::NotFound => {
                debug!(size = self.core.size(), "key to delete not found");
                false
            }
            DeleteResult::Deleted(root) => {
                self.core.root = root;
                debug!(size = self.core.size(), "deleted");
                true
            }
        }
    }

    fn validate(&self) -> Result<(), InvariantError> {
        self.core.validate(true)
    }
}

impl<K: Ord> TreeCore<K> {
    /// Inserts `key` into the subtree behind `link`. Returns the new root of that subtree and
    /// the id of the new node.
    fn insert_below(&mut self, link: Option<NodeId>, key: K) -> (NodeId, NodeId) {
        let Some(id) = link else {
            let id = self.allocate(key);
            return (id, id);
        };

        let node = self.node(id);
        let inserted = if key < node.key {
            let left = node.left;
            let (left, inserted) = self.insert_below(left, key);
            self.node_mut(id).left = Some(left);
            inserted
        } else {
            let right = node.right;
            let (right, inserted) = self.insert_below(right, key);
            self.node_mut(id).right = Some(right);
            inserted
        };

        (self.balance(id), inserted)
    }

    /// Deletes the first node with a key equal to `key` from the subtree behind `link`. See the
    /// documentation on [`DeleteResult`] for what the return value means.
    fn delete_below(&mut self, link: Option<NodeId>, key: &K) -> DeleteResult {
        let Some(id) = link else {
            return DeleteResult::NotFound;
        };

        let node = self.node(id);
        match key.cmp(&node.key) {
            Ordering::Less => {
                let left = node.left;
                match self.delete_below(left, key) {
                    DeleteResult::Deleted(left) => {
                        self.node_mut(id).left = left;
                        DeleteResult::Deleted(Some(self.balance(id)))
                    }
                    DeleteResult::NotFound => DeleteResult::NotFound,
                }
            }
            Ordering::Greater => {
                let right = node.right;
                match self.delete_below(right, key) {
                    DeleteResult::Deleted(right) => {
                        self.node_mut(id).right = right;
                        DeleteResult::Deleted(Some(self.balance(id)))
                    }
                    DeleteResult::NotFound => DeleteResult::NotFound,
                }
            }
            Ordering::Equal => match (node.left, node.right) {
                // With two children we keep this node and give it the key of its successor,
                // i.e. the smallest node in its right subtree, which is removed instead.
                (Some(_), Some(right)) => {
                    let (right, successor_key) = self.delete_smallest(right);
                    let node = self.node_mut(id);
                    node.right = right;
                    node.key = successor_key;
                    DeleteResult::Deleted(Some(self.balance(id)))
                }
                (left, right) => {
                    self.release(id);
                    DeleteResult::Deleted(left.or(right))
                }
            },
        }
    }

    /// Removes the smallest node of the subtree rooted at `id` by recursing to the left until
    /// there is no left child. Returns the new root of the subtree and the removed key.
    fn delete_smallest(&mut self, id: NodeId) -> (Option<NodeId>, K) {
        let node = self.node(id);
        match node.left {
            None => {
                let right = node.right;
                (right, self.release(id).key)
            }
            Some(left) => {
                let (left, key) = self.delete_smallest(left);
                self.node_mut(id).left = left;
                (Some(self.balance(id)), key)
            }
        }
    }

    /// Fixes the height of `id` and rotates it if one subtree is two levels taller than the
    /// other. Returns the root of the subtree after balancing.
    ///
    /// The children must already be balanced with correct heights. The rotation is picked from
    /// the taller child's own balance factor, which works the same after an insert or a delete.
    fn balance(&mut self, id: NodeId) -> NodeId {
        self.fix_height(id);
        let node = self.node(id);
        let root = match (self.balance_factor(id), node.left, node.right) {
            (2, Some(left), _) => {
                if self.balance_factor(left) < 0 {
                    let left = self.rotate_left(left);
                    self.node_mut(id).left = Some(left);
                }
                self.rotate_right(id)
            }
            (-2, _, Some(right)) => {
                if self.balance_factor(right) > 0 {
                    let right = self.rotate_right(right);
                    self.node_mut(id).right = Some(right);
                }
                self.rotate_left(id)
            }
            _ => id,
        };

        if cfg!(debug_assertions) {
            let node = self.node(root);
            let left_height = self.height(node.left);
            let right_height = self.height(node.right);
            assert_eq!(node.height, left_height.max(right_height) + 1);
            assert!(left_height.abs_diff(right_height) <= 1);
        }
        root
    }

    /// Rotate `old_root` to the right. This moves the left child up vertically and `old_root`
    /// down vertically. Used to rebalance the tree when the left child is too tall. As such, it
    /// must only be called when there _is_ a left child.
    ///
    /// ## Panics
    ///
    /// When called on a node without a left child.
    ///
    /// # Diagram
    ///
    /// Roughly speaking, we want to perform this transformation:
    ///
    /// ```text
    ///      old_root               new_root
    ///      /     \                /     \
    ///  new_root   z   rotate ->  x    old_root
    ///   /  \                            /  \
    ///  x    y                          y    z
    /// ```
    fn rotate_right(&mut self, old_root: NodeId) -> NodeId {
        let new_root = self.node(old_root).left.expect("Rotate right => left child");
        let moved = self.node(new_root).right;

        self.node_mut(old_root).left = moved;
        self.fix_height(old_root);

        self.node_mut(new_root).right = Some(old_root);
        self.fix_height(new_root);

        trace!(?old_root, ?new_root, "rotated right");
        new_root
    }

    /// Mirror image of [`TreeCore::rotate_right`]: the right child moves up.
    fn rotate_left(&mut self, old_root: NodeId) -> NodeId {
        let new_root = self.node(old_root).right.expect("Rotate left => right child");
        let moved = self.node(new_root).left;

        self.node_mut(old_root).right = moved;
        self.fix_height(old_root);

        self.node_mut(new_root).left = Some(old_root);
        self.fix_height(new_root);

        trace!(?old_root, ?new_root, "rotated left");
        new_root
    }
}
