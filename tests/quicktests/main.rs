use ordered_tree::{OrderedTree, TreeKind};
use quickcheck::{Arbitrary, Gen};
use quickcheck_macros::quickcheck;

use std::collections::{BTreeMap, HashSet};

/// An enum for the various kinds of "things" to do to
/// binary search trees in a quicktest.
#[derive(Copy, Clone, Debug)]
enum Op<K> {
    /// Insert the K into the tree
    Insert(K),
    /// Delete the K from the tree
    Delete(K),
}

impl<K> Arbitrary for Op<K>
where
    K: Arbitrary,
{
    fn arbitrary(g: &mut Gen) -> Self {
        if bool::arbitrary(g) {
            Op::Insert(K::arbitrary(g))
        } else {
            Op::Delete(K::arbitrary(g))
        }
    }
}

fn tree_of<K: Ord + Copy + 'static>(kind: TreeKind, xs: &[K]) -> Box<dyn OrderedTree<K>> {
    let mut tree = kind.build();
    for x in xs {
        tree.insert(*x);
    }
    tree
}

/// Applies a set of operations to a tree and to a map counting how often each key is present.
/// This way we can ensure that after a random smattering of inserts and deletes we have the same
/// keys, with the same multiplicity, in both.
fn do_ops(ops: &[Op<i8>], tree: &mut dyn OrderedTree<i8>, counts: &mut BTreeMap<i8, usize>) {
    for op in ops {
        match op {
            Op::Insert(k) => {
                tree.insert(*k);
                *counts.entry(*k).or_default() += 1;
            }
            Op::Delete(k) => {
                let present = counts.get(k).copied().unwrap_or(0) > 0;
                assert_eq!(tree.delete(k), present);
                if present {
                    *counts.get_mut(k).unwrap() -= 1;
                }
            }
        }
    }
}

#[quickcheck]
fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
    TreeKind::ALL.into_iter().all(|kind| {
        let mut tree = kind.build();
        let mut counts = BTreeMap::new();

        do_ops(&ops, tree.as_mut(), &mut counts);

        let expected: Vec<i8> = counts
            .iter()
            .flat_map(|(k, n)| std::iter::repeat(*k).take(*n))
            .collect();
        tree.traverse_inorder();
        tree.validate().is_ok()
            && tree.size() == expected.len()
            && tree.traversal_keys() == expected
    })
}

#[quickcheck]
fn contains(xs: Vec<i8>) -> bool {
    TreeKind::ALL.into_iter().all(|kind| {
        let tree = tree_of(kind, &xs);

        tree.size() == xs.len() && xs.iter().all(|x| tree.search(x))
    })
}

#[quickcheck]
fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
    let added: HashSet<_> = xs.iter().copied().collect();
    let nots: HashSet<_> = nots.into_iter().collect();

    TreeKind::ALL.into_iter().all(|kind| {
        let tree = tree_of(kind, &xs);
        let mut nots = nots.difference(&added);

        nots.all(|x| !tree.search(x))
    })
}

#[quickcheck]
fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
    let still_present: Vec<_> = xs.iter().filter(|x| !deletes.contains(x)).collect();

    TreeKind::ALL.into_iter().all(|kind| {
        let mut tree = tree_of(kind, &xs);
        // Delete every copy.
        for delete in &deletes {
            while tree.delete(delete) {}
        }

        deletes.iter().all(|x| !tree.search(x))
            && still_present.iter().all(|x| tree.search(x))
            && tree.size() == still_present.len()
    })
}

#[quickcheck]
fn inorder_is_sorted(xs: Vec<i32>) -> bool {
    let mut sorted = xs.clone();
    sorted.sort();

    TreeKind::ALL.into_iter().all(|kind| {
        let mut tree = tree_of(kind, &xs);
        tree.traverse_inorder();
        tree.traversal_keys() == sorted
    })
}

#[quickcheck]
fn avl_height_is_logarithmic(xs: Vec<u16>) -> bool {
    let tree = tree_of(TreeKind::Avl, &xs);

    let bound = 1.4405 * ((xs.len() + 2) as f64).log2() - 0.3277;
    f64::from(tree.tree_height()) <= bound.max(0.0)
}
