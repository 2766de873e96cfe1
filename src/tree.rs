//! Everything the tree variants have in common.
//!
//! [`TreeCore`] holds the nodes, the root, the size counter and the cached traversal.
//! [`OrderedTree`] is implemented by each variant: they only decide how `insert` and `delete`
//! restructure the tree, and every other operation is provided here on top of the core.

use std::cmp::Ordering;
use std::fmt;

use tracing::debug;

use crate::arena::Arena;
use crate::error::InvariantError;
use crate::kind::TreeKind;
use crate::node::{Flags, Node, NodeId};
use crate::render::TreeSnapshot;
use crate::traversal::Order;

/// Storage shared by every tree variant. Only reachable through [`OrderedTree`].
#[derive(Clone)]
pub struct TreeCore<K> {
    arena: Arena<K>,
    pub(crate) root: Option<NodeId>,
    size: usize,
    pub(crate) last_traversal: Vec<NodeId>,
    /// Position of the next node [`OrderedTree::visit_next`] will mark.
    pub(crate) cursor: usize,
}

impl<K> Default for TreeCore<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> fmt::Debug for TreeCore<K>
where
    K: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TreeCore")
            .field("root", &self.root)
            .field("size", &self.size)
            .field("last_traversal", &self.last_traversal)
            .finish_non_exhaustive()
    }
}

impl<K> TreeCore<K> {
    pub(crate) fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
            size: 0,
            last_traversal: Vec::new(),
            cursor: 0,
        }
    }

    pub(crate) fn size(&self) -> usize {
        self.size
    }

    pub(crate) fn get(&self, id: NodeId) -> Option<&Node<K>> {
        self.arena.get(id)
    }

    /// Follows a link that is part of the tree structure.
    ///
    /// ## Panics
    ///
    /// When `id` is stale. Links inside the tree are always live, so this is a bug.
    pub(crate) fn node(&self, id: NodeId) -> &Node<K> {
        self.arena.get(id).expect("tree links point at live nodes")
    }

    /// Mutable version of [`TreeCore::node`].
    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node<K> {
        self.arena.get_mut(id).expect("tree links point at live nodes")
    }

    /// Creates a new detached node. The caller links it into the tree.
    pub(crate) fn allocate(&mut self, key: K) -> NodeId {
        self.size += 1;
        self.invalidate_traversal();
        self.arena.allocate(Node::new(key))
    }

    /// Removes an already unlinked node from storage and hands it back.
    pub(crate) fn release(&mut self, id: NodeId) -> Node<K> {
        let node = self.arena.release(id).expect("released node is live");
        self.size -= 1;
        self.invalidate_traversal();
        node
    }

    /// Height of the subtree behind `link`. Absent subtrees have height 0.
    pub(crate) fn height(&self, link: Option<NodeId>) -> u32 {
        link.and_then(|id| self.arena.get(id)).map_or(0, Node::height)
    }

    /// Recomputes the cached height of `id` from its children. Must be called whenever one of
    /// its child links changes, children first.
    pub(crate) fn fix_height(&mut self, id: NodeId) {
        let node = self.node(id);
        let height = self.height(node.left).max(self.height(node.right)) + 1;
        self.node_mut(id).height = height;
    }

    /// `height(left) - height(right)`. Positive means left-heavy.
    pub(crate) fn balance_factor(&self, id: NodeId) -> i64 {
        let node = self.node(id);
        i64::from(self.height(node.left)) - i64::from(self.height(node.right))
    }

    pub(crate) fn invalidate_traversal(&mut self) {
        self.last_traversal.clear();
        self.cursor = 0;
    }

    pub(crate) fn reset(&mut self) {
        self.arena.clear();
        self.root = None;
        self.size = 0;
        self.invalidate_traversal();
    }

    pub(crate) fn clear_visited(&mut self) {
        for node in self.arena.nodes_mut() {
            node.flags.is_visited = false;
        }
    }

    pub(crate) fn flags_mut(&mut self, id: NodeId) -> Option<&mut Flags> {
        self.arena.get_mut(id).map(|node| &mut node.flags)
    }

    /// Finds the first node on the search path whose key equals `key`.
    pub(crate) fn find(&self, key: &K) -> Option<NodeId>
    where
        K: Ord,
    {
        let mut current = self.root;
        while let Some(id) = current {
            let node = self.node(id);
            current = match key.cmp(&node.key) {
                Ordering::Less => node.left,
                Ordering::Equal => return Some(id),
                Ordering::Greater => node.right,
            };
        }
        None
    }

    /// Walks the whole tree and checks the BST ordering, every cached height and the size
    /// counter. With `balanced` set, also checks the AVL balance of every node.
    ///
    /// Rotations can carry a key equal to its parent into the parent's left subtree, so balanced
    /// trees are only held to `left <= key <= right`.
    pub(crate) fn validate(&self, balanced: bool) -> Result<(), InvariantError>
    where
        K: Ord,
    {
        let mut reachable = 0;
        // (node, inclusive lower bound, upper bound)
        let mut stack: Vec<(NodeId, Option<&K>, Option<&K>)> = Vec::new();
        if let Some(root) = self.root {
            stack.push((root, None, None));
        }

        while let Some((id, lower, upper)) = stack.pop() {
            let node = self
                .arena
                .get(id)
                .ok_or(InvariantError::DanglingLink { node: id })?;
            reachable += 1;

            let above_lower = lower.map_or(true, |lower| *lower <= node.key);
            let below_upper = upper.map_or(true, |upper| match node.key.cmp(upper) {
                Ordering::Less => true,
                Ordering::Equal => balanced,
                Ordering::Greater => false,
            });
            if !(above_lower && below_upper) {
                return Err(InvariantError::OutOfOrder { node: id });
            }

            for child in [node.left, node.right].into_iter().flatten() {
                if self.arena.get(child).is_none() {
                    return Err(InvariantError::DanglingLink { node: child });
                }
            }

            let expected = self.height(node.left).max(self.height(node.right)) + 1;
            if node.height != expected {
                return Err(InvariantError::HeightMismatch {
                    node: id,
                    cached: node.height,
                    expected,
                });
            }

            if balanced {
                let balance_factor = self.balance_factor(id);
                if balance_factor.abs() > 1 {
                    return Err(InvariantError::Unbalanced {
                        node: id,
                        balance_factor,
                    });
                }
            }

            if let Some(left) = node.left {
                stack.push((left, lower, Some(&node.key)));
            }
            if let Some(right) = node.right {
                stack.push((right, Some(&node.key), upper));
            }
        }

        if reachable != self.size {
            return Err(InvariantError::SizeMismatch {
                recorded: self.size,
                reachable,
            });
        }
        debug_assert_eq!(self.arena.len(), reachable, "unreachable nodes in the arena");
        Ok(())
    }
}

/// An ordered collection of keys stored as a binary search tree.
///
/// Implementors only provide [`insert`][OrderedTree::insert] and
/// [`delete`][OrderedTree::delete] (and with them, their balancing strategy). Searching,
/// traversals and the node accessors are shared.
///
/// Nodes are exposed as [`NodeId`]s. An id stays valid until the node it names is deleted or
/// the tree is reset; after that [`node`][OrderedTree::node] returns `None` for it.
///
/// # Examples
///
/// ```
/// use ordered_tree::{AvlTree, OrderedTree};
///
/// let mut tree = AvlTree::new();
/// for key in [10, 20, 30] {
///     tree.insert(key);
/// }
///
/// assert!(tree.search(&20));
/// assert_eq!(tree.root().map(|n| *n.key()), Some(20));
///
/// tree.traverse_inorder();
/// assert_eq!(tree.traversal_keys(), vec![10, 20, 30]);
/// ```
pub trait OrderedTree<K: Ord> {
    /// Shared storage of this tree.
    #[doc(hidden)]
    fn core(&self) -> &TreeCore<K>;

    /// Mutable shared storage of this tree.
    #[doc(hidden)]
    fn core_mut(&mut self) -> &mut TreeCore<K>;

    /// Which variant this tree is.
    fn kind(&self) -> TreeKind;

    /// Inserts `key` and returns the id of the node created for it. Keys equal to an existing
    /// key are not rejected: a second node is created in the right subtree of the first.
    fn insert(&mut self, key: K) -> NodeId;

    /// Removes one node with a key equal to `key`. Returns whether a node was removed; deleting
    /// an absent key changes nothing.
    fn delete(&mut self, key: &K) -> bool;

    /// Checks every structural invariant of this tree.
    fn validate(&self) -> Result<(), InvariantError> {
        self.core().validate(false)
    }

    /// Whether any node has a key equal to `key`.
    fn search(&self, key: &K) -> bool {
        self.find(key).is_some()
    }

    /// The id of the first node found with a key equal to `key`.
    fn find(&self, key: &K) -> Option<NodeId> {
        self.core().find(key)
    }

    /// Number of nodes in the tree.
    fn size(&self) -> usize {
        self.core().size()
    }

    /// Whether the tree has no nodes.
    fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// The id of the root node.
    fn root_id(&self) -> Option<NodeId> {
        self.core().root
    }

    /// The root node.
    fn root(&self) -> Option<&Node<K>> {
        self.core().root.map(|id| self.core().node(id))
    }

    /// Looks up a node. Returns `None` if `id` is stale.
    fn node(&self, id: NodeId) -> Option<&Node<K>> {
        self.core().get(id)
    }

    /// Height of the subtree rooted at `node`: 0 when absent (or stale), 1 for a leaf.
    fn height(&self, node: Option<NodeId>) -> u32 {
        self.core().height(node)
    }

    /// Height of the whole tree.
    fn tree_height(&self) -> u32 {
        self.height(self.root_id())
    }

    /// Cosmetic flags of a node, for a presentation layer to toggle. Returns `None` if `id` is
    /// stale.
    fn flags_mut<'a>(&'a mut self, id: NodeId) -> Option<&'a mut Flags>
    where
        K: 'a,
    {
        self.core_mut().flags_mut(id)
    }

    /// Drops every node.
    ///
    /// The storage slots themselves are kept, so ids handed out before the reset stay stale
    /// instead of naming a later node. A tree that once held `N` nodes therefore keeps `O(N)`
    /// memory, and every reset costs `O(N)`, until the tree is dropped.
    fn reset(&mut self) {
        debug!(kind = %self.kind(), size = self.size(), "resetting tree");
        self.core_mut().reset();
    }

    /// Clears the `is_visited` flag of every node.
    fn clear_visited(&mut self) {
        self.core_mut().clear_visited();
    }

    /// Computes a fresh traversal in the given order, replacing the cached one.
    fn traverse<'a>(&'a mut self, order: Order) -> &'a [NodeId]
    where
        K: 'a,
    {
        let core = self.core_mut();
        core.last_traversal = core.collect(order);
        core.cursor = 0;
        &core.last_traversal
    }

    /// Left subtree, node, right subtree. Keys come out in non-decreasing order.
    fn traverse_inorder<'a>(&'a mut self) -> &'a [NodeId]
    where
        K: 'a,
    {
        self.traverse(Order::InOrder)
    }

    /// Node, left subtree, right subtree.
    fn traverse_preorder<'a>(&'a mut self) -> &'a [NodeId]
    where
        K: 'a,
    {
        self.traverse(Order::PreOrder)
    }

    /// Left subtree, right subtree, node.
    fn traverse_postorder<'a>(&'a mut self) -> &'a [NodeId]
    where
        K: 'a,
    {
        self.traverse(Order::PostOrder)
    }

    /// The most recent traversal. Empty if none was computed since the last insert, delete, or
    /// reset.
    fn last_traversal<'a>(&'a self) -> &'a [NodeId]
    where
        K: 'a,
    {
        &self.core().last_traversal
    }

    /// Keys of [`last_traversal`][OrderedTree::last_traversal], in order.
    fn traversal_keys(&self) -> Vec<K>
    where
        K: Clone,
    {
        let core = self.core();
        core.last_traversal
            .iter()
            .map(|id| core.node(*id).key.clone())
            .collect()
    }

    /// Marks the next node of the cached traversal as visited and returns it. Returns `None`
    /// once every node was visited or the tree changed since the traversal.
    ///
    /// This is one "tick" of a highlight animation. How often to call it is up to the caller.
    fn visit_next(&mut self) -> Option<NodeId> {
        self.core_mut().visit_next()
    }

    /// The tree drawn sideways, one node per line: the right subtree above its parent, the left
    /// subtree below, four spaces of indent per level.
    fn render(&self) -> String
    where
        K: fmt::Display,
    {
        let mut out = String::new();
        // Writing to a `String` cannot fail.
        let _ = self.core().write_sideways(&mut out);
        out
    }

    /// A flat copy of the tree, in pre-order, for a renderer to consume.
    fn snapshot(&self) -> TreeSnapshot<K>
    where
        K: Clone,
    {
        self.core().snapshot()
    }
}
