use ordered_tree::{Error, OrderedTree};
use quickcheck_macros::quickcheck;

use std::collections::HashSet;

use crate::Op;

/// Applies a set of operations to a tree and a sorted `Vec`.
/// This way we can ensure that after a random smattering of adds
/// and removes we have the same items in both.
fn do_ops<T>(ops: &[Op<T>], tree: &mut OrderedTree<T>, model: &mut Vec<T>)
where
    T: Ord + Clone + std::fmt::Debug,
{
    for op in ops {
        match op {
            Op::Add(x) => {
                tree.add(x.clone());
                let pos = model.partition_point(|y| y <= x);
                model.insert(pos, x.clone());
            }
            Op::Remove(x) => match model.binary_search(x) {
                Ok(pos) => {
                    assert_eq!(tree.remove(x).as_ref(), Ok(x));
                    model.remove(pos);
                }
                Err(_) => assert_eq!(tree.remove(x), Err(Error::NotFound)),
            },
            Op::Replace(x) => {
                let expected = model.binary_search(x).ok().map(|_| x.clone());
                assert_eq!(tree.replace(x, x.clone()), expected);
            }
            Op::Rebalance => tree.rebalance(),
        }
    }
}

/// Height of a tree built by splitting `n` sorted items on their middle.
fn floor_lg(n: usize) -> usize {
    (usize::BITS - 1 - n.leading_zeros()) as usize
}

#[quickcheck]
fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
    let mut tree = OrderedTree::new();
    let mut model = Vec::new();

    do_ops(&ops, &mut tree, &mut model);

    tree.len() == model.len()
        && tree.iter().count() == model.len()
        && tree.inorder().eq(model.iter())
        && model.iter().all(|x| tree.find(x) == Some(x))
}

#[quickcheck]
fn contains(xs: Vec<i8>) -> bool {
    let tree: OrderedTree<_> = xs.iter().copied().collect();

    xs.iter().all(|x| tree.find(x) == Some(x))
}

#[quickcheck]
fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
    let tree: OrderedTree<_> = xs.iter().copied().collect();
    let added: HashSet<_> = xs.into_iter().collect();
    let nots: HashSet<_> = nots.into_iter().collect();
    let mut nots = nots.difference(&added);

    nots.all(|x| tree.find(x).is_none() && !tree.contains(x))
}

#[quickcheck]
fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
    let mut tree: OrderedTree<_> = xs.iter().copied().collect();
    for delete in &deletes {
        // We may have inserted the same value multiple times - delete each one.
        while tree.remove(delete).is_ok() {}
    }

    let mut still_present = xs;
    still_present.retain(|x| !deletes.contains(x));

    deletes.iter().all(|x| tree.find(x).is_none())
        && still_present.iter().all(|x| tree.find(x).is_some())
        && tree.len() == still_present.len()
}

#[quickcheck]
fn remove_missing_is_not_found(xs: Vec<i8>, missing: i8) -> bool {
    let mut tree: OrderedTree<_> = xs.iter().copied().filter(|&x| x != missing).collect();
    let before: Vec<_> = tree.iter().copied().collect();

    tree.remove(&missing) == Err(Error::NotFound)
        && tree.iter().copied().eq(before.into_iter())
}

#[quickcheck]
fn inorder_is_sorted(xs: Vec<i16>) -> bool {
    let tree: OrderedTree<_> = xs.iter().copied().collect();
    let mut sorted = xs;
    sorted.sort();

    tree.inorder().copied().eq(sorted.iter().copied())
        && tree.into_iter().eq(sorted.into_iter())
}

#[quickcheck]
fn traversals_visit_everything(xs: Vec<i8>) -> bool {
    let tree: OrderedTree<_> = xs.iter().copied().collect();
    let mut sorted = xs;
    sorted.sort();

    [
        tree.preorder().copied().collect::<Vec<_>>(),
        tree.postorder().copied().collect(),
        tree.levelorder().copied().collect(),
    ]
    .iter_mut()
    .all(|visited| {
        visited.sort();
        *visited == sorted
    })
}

#[quickcheck]
fn rebalance_keeps_items_and_minimises_height(xs: Vec<i16>) -> bool {
    let mut distinct = xs;
    distinct.sort();
    distinct.dedup();

    let mut tree: OrderedTree<_> = distinct.iter().copied().collect();
    tree.rebalance();

    let height_ok = distinct.is_empty() || tree.height() == floor_lg(distinct.len());
    height_ok
        && tree.len() == distinct.len()
        && tree.inorder().copied().eq(distinct.iter().copied())
        && (distinct.is_empty() || tree.is_balanced())
}

#[quickcheck]
fn neighbours_match_model(xs: Vec<i8>, probe: i8) -> bool {
    let tree: OrderedTree<_> = xs.iter().copied().collect();

    let successor = xs.iter().filter(|&&x| x > probe).min();
    let predecessor = xs.iter().filter(|&&x| x < probe).max();

    tree.successor(&probe) == successor && tree.predecessor(&probe) == predecessor
}

#[quickcheck]
fn range_find_matches_filter(xs: Vec<i8>, low: i8, high: i8) -> bool {
    let tree: OrderedTree<_> = xs.iter().copied().collect();

    let mut found: Vec<_> = tree.range_find(&low, &high).into_iter().copied().collect();
    found.sort();
    let mut expected: Vec<_> = xs.into_iter().filter(|x| (low..=high).contains(x)).collect();
    expected.sort();

    found == expected
}

#[test]
fn test_sorted_input_is_unbalanced_until_rebalanced() {
    let mut tree: OrderedTree<_> = (0..1_023).collect();
    assert_eq!(tree.height(), 1_022);
    assert!(!tree.is_balanced());

    tree.rebalance();
    assert_eq!(tree.height(), 9);
    assert!(tree.is_balanced());
    assert_eq!(tree.len(), 1_023);
}
