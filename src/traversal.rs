//! Depth-first traversals. These use an explicit stack rather than recursion: an unbalanced tree
//! can be as tall as it has nodes.

use std::fmt;

use crate::node::NodeId;
use crate::tree::TreeCore;

/// The classical depth-first orders.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Order {
    /// Left subtree, node, right subtree.
    InOrder,
    /// Node, left subtree, right subtree.
    PreOrder,
    /// Left subtree, right subtree, node.
    PostOrder,
}

impl Order {
    /// Every order, in the usual reading order.
    pub const ALL: [Order; 3] = [Order::InOrder, Order::PreOrder, Order::PostOrder];
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Order::InOrder => "In-order",
            Order::PreOrder => "Pre-order",
            Order::PostOrder => "Post-order",
        })
    }
}

impl<K> TreeCore<K> {
    pub(crate) fn collect(&self, order: Order) -> Vec<NodeId> {
        match order {
            Order::InOrder => self.inorder(),
            Order::PreOrder => self.preorder(),
            Order::PostOrder => self.postorder(),
        }
    }

    fn inorder(&self) -> Vec<NodeId> {
        let mut out = Vec::with_capacity(self.size());
        let mut stack = Vec::new();
        let mut current = self.root;
        loop {
            while let Some(id) = current {
                stack.push(id);
                current = self.node(id).left;
            }
            let Some(id) = stack.pop() else {
                break;
            };
            out.push(id);
            current = self.node(id).right;
        }
        out
    }

    fn preorder(&self) -> Vec<NodeId> {
        let mut out = Vec::with_capacity(self.size());
        let mut stack: Vec<NodeId> = self.root.into_iter().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            let node = self.node(id);
            // Right goes on first so left comes off first.
            stack.extend(node.right);
            stack.extend(node.left);
        }
        out
    }

    fn postorder(&self) -> Vec<NodeId> {
        // (node, right, left) reversed is (left, right, node).
        let mut out = Vec::with_capacity(self.size());
        let mut stack: Vec<NodeId> = self.root.into_iter().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            let node = self.node(id);
            stack.extend(node.left);
            stack.extend(node.right);
        }
        out.reverse();
        out
    }

    pub(crate) fn visit_next(&mut self) -> Option<NodeId> {
        let id = *self.last_traversal.get(self.cursor)?;
        self.cursor += 1;
        self.flags_mut(id)?.is_visited = true;
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use crate::{AvlTree, Bst, OrderedTree};

    use super::*;

    fn keys<T: OrderedTree<i32>>(tree: &mut T, order: Order) -> Vec<i32> {
        tree.traverse(order);
        tree.traversal_keys()
    }

    #[test]
    fn orders_on_a_full_tree() {
        let mut tree = Bst::new();
        for key in [4, 2, 6, 1, 3, 5, 7] {
            tree.insert(key);
        }

        assert_eq!(keys(&mut tree, Order::InOrder), [1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(keys(&mut tree, Order::PreOrder), [4, 2, 1, 3, 6, 5, 7]);
        assert_eq!(keys(&mut tree, Order::PostOrder), [1, 3, 2, 5, 7, 6, 4]);
    }

    #[test]
    fn orders_on_a_lopsided_tree() {
        let mut tree = Bst::new();
        for key in [5, 3, 4, 8] {
            tree.insert(key);
        }

        assert_eq!(keys(&mut tree, Order::InOrder), [3, 4, 5, 8]);
        assert_eq!(keys(&mut tree, Order::PreOrder), [5, 3, 4, 8]);
        assert_eq!(keys(&mut tree, Order::PostOrder), [4, 3, 8, 5]);
    }

    #[test]
    fn empty_tree_has_empty_traversals() {
        let mut tree: AvlTree<i32> = AvlTree::new();
        for order in Order::ALL {
            assert!(tree.traverse(order).is_empty());
        }
    }

    #[test]
    fn traversal_is_replaced_not_appended() {
        let mut tree = AvlTree::new();
        tree.insert(1);
        tree.insert(2);

        tree.traverse_inorder();
        tree.traverse_postorder();
        assert_eq!(tree.last_traversal().len(), 2);
        assert_eq!(tree.traversal_keys(), [2, 1]);
    }

    #[test]
    fn mutation_discards_the_cached_traversal() {
        let mut tree = AvlTree::new();
        tree.insert(1);
        tree.traverse_preorder();
        assert_eq!(tree.last_traversal().len(), 1);

        tree.insert(2);
        assert!(tree.last_traversal().is_empty());
        assert_eq!(tree.visit_next(), None);
    }

    #[test]
    fn visit_next_marks_in_traversal_order() {
        let mut tree = Bst::new();
        for key in [2, 1, 3] {
            tree.insert(key);
        }
        let order = tree.traverse_postorder().to_vec();

        for expected in &order {
            assert_eq!(tree.visit_next(), Some(*expected));
            assert!(tree.node(*expected).unwrap().is_visited());
        }
        assert_eq!(tree.visit_next(), None);

        tree.clear_visited();
        assert!(order.iter().all(|id| !tree.node(*id).unwrap().is_visited()));
    }

    #[test]
    fn display_names() {
        let names: Vec<_> = Order::ALL.iter().map(ToString::to_string).collect();
        assert_eq!(names, ["In-order", "Pre-order", "Post-order"]);
    }
}
