//! This crate exposes two Binary Search Trees (BSTs) behind one interface: a plain, unbalanced
//! [`Bst`] and a self-balancing [`AvlTree`]. Both are built to be watched: every node carries a
//! pair of cosmetic flags, and traversals hand back the nodes in visiting order so that a
//! presentation layer can highlight them one at a time.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored records. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` will typically store
//! some sort of value (the value that was inserted, for example) and will
//! sometimes have child `Node`s. The most important invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    value less than its own value. Rebalancing can move a duplicate key into
//!    the left subtree of an equal key, so [`AvlTree`] only keeps "less than or
//!    equal" here (see the [`avl`] module).
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    value greater than or equal to its own value.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! The benefits of these invariants are many. For instance, searching for
//! values in the tree takes `O(height)` (where `height` is defined as the longest
//! path from the root `Node` to a leaf `Node`). With clever construction the
//! height of a BST can be limited to `O(lg N)` where `N` is the number of nodes
//! in the tree. BSTs also naturally support sorted iteration by visiting the
//! left subtree, then the subtree root, then the right subtree.
//!
//! ## Nodes and ids
//!
//! Nodes live in an arena owned by their tree and are referred to by [`NodeId`]. Traversals
//! return ids, not references, so they can be held while the caller toggles
//! [`Flags`] through [`OrderedTree::flags_mut`]. An id for a deleted node never resolves again.
//!
//! Holding on to a traversal across an `insert` or `delete` is a mistake: the tree may have been
//! restructured, so the order no longer means anything. The tree drops its own cached copy on
//! every mutation.
//!
//! # Examples
//!
//! ```
//! use ordered_tree::{OrderedTree, TreeKind};
//!
//! let mut tree = TreeKind::Avl.build();
//! for key in [30, 20, 40, 10, 25, 35, 50] {
//!     tree.insert(key);
//! }
//!
//! // Step through a pre-order traversal, as a visualizer would on a timer.
//! tree.traverse_preorder();
//! let mut highlighted = Vec::new();
//! while let Some(id) = tree.visit_next() {
//!     highlighted.push(*tree.node(id).unwrap().key());
//! }
//! assert_eq!(highlighted, [30, 20, 10, 25, 40, 35, 50]);
//!
//! tree.clear_visited();
//! ```

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

mod arena;
pub mod avl;
pub mod bst;
mod error;
mod kind;
mod node;
mod render;
mod traversal;
mod tree;
mod util;

pub use avl::AvlTree;
pub use bst::Bst;
pub use error::InvariantError;
pub use kind::TreeKind;
pub use node::{Flags, Node, NodeId};
pub use render::{NodeSnapshot, TreeSnapshot};
pub use traversal::Order;
pub use tree::{OrderedTree, TreeCore};
