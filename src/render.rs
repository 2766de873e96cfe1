//! Read-only views of a tree for whatever draws it.

use std::fmt;

use crate::node::{Flags, NodeId};
use crate::tree::TreeCore;

/// A copy of one node, as found in a [`TreeSnapshot`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeSnapshot<K> {
    /// The id of the node in the tree it was copied from.
    pub id: NodeId,
    /// The node's key.
    pub key: K,
    /// Id of the left child.
    pub left: Option<NodeId>,
    /// Id of the right child.
    pub right: Option<NodeId>,
    /// Height of the subtree rooted here.
    pub height: u32,
    /// The node's cosmetic flags at the time of the snapshot.
    pub flags: Flags,
}

/// A flat copy of a whole tree. Nodes are listed in pre-order, so the root (if any) comes first
/// and every parent comes before its children.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TreeSnapshot<K> {
    /// Id of the root node.
    pub root: Option<NodeId>,
    /// Number of nodes.
    pub size: usize,
    /// Every node, in pre-order.
    pub nodes: Vec<NodeSnapshot<K>>,
}

impl<K> TreeSnapshot<K> {
    /// Finds the copy of the node with the given id.
    pub fn get(&self, id: NodeId) -> Option<&NodeSnapshot<K>> {
        self.nodes.iter().find(|node| node.id == id)
    }
}

impl<K> TreeCore<K> {
    pub(crate) fn snapshot(&self) -> TreeSnapshot<K>
    where
        K: Clone,
    {
        let nodes = self
            .collect(crate::Order::PreOrder)
            .into_iter()
            .map(|id| {
                let node = self.node(id);
                NodeSnapshot {
                    id,
                    key: node.key.clone(),
                    left: node.left,
                    right: node.right,
                    height: node.height,
                    flags: node.flags,
                }
            })
            .collect();

        TreeSnapshot {
            root: self.root,
            size: self.size(),
            nodes,
        }
    }

    /// Reverse in-order walk, so reading top to bottom goes from the largest key to the smallest
    /// and the root sits at the left margin.
    pub(crate) fn write_sideways(&self, out: &mut impl fmt::Write) -> fmt::Result
    where
        K: fmt::Display,
    {
        let mut stack = Vec::new();
        let mut current = self.root.map(|id| (id, 0));
        loop {
            while let Some((id, depth)) = current {
                stack.push((id, depth));
                current = self.node(id).right.map(|right| (right, depth + 1));
            }
            let Some((id, depth)) = stack.pop() else {
                return Ok(());
            };
            let node = self.node(id);
            writeln!(out, "{:indent$}{}", "", node.key, indent = depth * 4)?;
            current = node.left.map(|left| (left, depth + 1));
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{AvlTree, Bst, OrderedTree};

    #[test]
    fn render_sideways() {
        let mut tree = Bst::new();
        for key in [4, 2, 6, 5] {
            tree.insert(key);
        }

        assert_eq!(tree.render(), "    6\n        5\n4\n    2\n");
        assert_eq!(tree.to_string(), tree.render());
    }

    #[test]
    fn render_empty() {
        let tree: AvlTree<i32> = AvlTree::new();
        assert_eq!(tree.render(), "");
    }

    #[test]
    fn snapshot_lists_parents_first() {
        let mut tree = AvlTree::new();
        for key in [10, 20, 30] {
            tree.insert(key);
        }

        let snapshot = tree.snapshot();
        assert_eq!(snapshot.size, 3);
        assert_eq!(snapshot.root, tree.root_id());

        let keys: Vec<_> = snapshot.nodes.iter().map(|n| n.key).collect();
        assert_eq!(keys, [20, 10, 30]);

        let root = snapshot.get(snapshot.root.unwrap()).unwrap();
        assert_eq!(root.height, 2);
        assert_eq!(snapshot.get(root.left.unwrap()).unwrap().key, 10);
        assert_eq!(snapshot.get(root.right.unwrap()).unwrap().key, 30);
        assert!(snapshot.nodes.iter().all(|n| n.flags.is_new));
    }

    #[test]
    fn snapshot_is_detached_from_later_changes() {
        let mut tree = Bst::new();
        let id = tree.insert(1);
        let snapshot = tree.snapshot();

        tree.flags_mut(id).unwrap().is_visited = true;
        tree.delete(&1);

        assert_eq!(snapshot.nodes.len(), 1);
        assert!(!snapshot.nodes[0].flags.is_visited);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn snapshot_survives_json() {
        let mut tree = AvlTree::new();
        for key in [3, 1, 4, 1, 5] {
            tree.insert(key);
        }
        let first = tree.traverse_inorder()[0];
        tree.flags_mut(first).unwrap().is_visited = true;

        let snapshot = tree.snapshot();
        let json = serde_json::to_string(&snapshot).unwrap();
        let back: crate::TreeSnapshot<i32> = serde_json::from_str(&json).unwrap();

        assert_eq!(back, snapshot);
        assert!(back.get(first).unwrap().flags.is_visited);
    }
}
