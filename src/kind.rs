use std::fmt;

use crate::{AvlTree, Bst, OrderedTree};

/// The available tree variants. Useful when the variant is picked at runtime, e.g. by a
/// visualizer that lets the user switch between them.
///
/// Switching variants means building a new, empty tree: nodes are never moved or converted from
/// one variant to another.
///
/// # Examples
///
/// ```
/// use ordered_tree::{OrderedTree, TreeKind};
///
/// let mut tree = TreeKind::Avl.build();
/// for key in 1..=7 {
///     tree.insert(key);
/// }
///
/// assert_eq!(tree.kind(), TreeKind::Avl);
/// assert_eq!(tree.tree_height(), 3);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TreeKind {
    /// A plain binary search tree. See [`Bst`].
    #[default]
    Unbalanced,
    /// A self-balancing AVL tree. See [`AvlTree`].
    Avl,
}

impl TreeKind {
    /// Every variant.
    pub const ALL: [TreeKind; 2] = [TreeKind::Unbalanced, TreeKind::Avl];

    /// Short name of the variant.
    pub fn name(self) -> &'static str {
        match self {
            TreeKind::Unbalanced => "bst",
            TreeKind::Avl => "avl",
        }
    }

    /// Builds a new, empty tree of this variant.
    pub fn build<K>(self) -> Box<dyn OrderedTree<K>>
    where
        K: Ord + 'static,
    {
        match self {
            TreeKind::Unbalanced => Box::new(Bst::new()),
            TreeKind::Avl => Box::new(AvlTree::new()),
        }
    }
}

impl fmt::Display for TreeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
