/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! Tests for the borrowed traversal iterator.

use rstest::rstest;
use search_tree::{AvlTree, RedBlackTree, SearchTree, TraversalOrder};

/// Sequential 1..=7 in an AVL tree settles into the perfectly balanced
/// shape rooted at 4, which makes every traversal order predictable.
fn perfect_tree() -> AvlTree<u32> {
    (1..=7).collect()
}

#[rstest]
#[case::ascending(TraversalOrder::Ascending, vec![1, 2, 3, 4, 5, 6, 7])]
#[case::descending(TraversalOrder::Descending, vec![7, 6, 5, 4, 3, 2, 1])]
#[case::pre_order(TraversalOrder::PreOrder, vec![4, 2, 1, 3, 6, 5, 7])]
#[case::post_order(TraversalOrder::PostOrder, vec![1, 3, 2, 5, 7, 6, 4])]
#[case::level_order(TraversalOrder::LevelOrder, vec![4, 2, 6, 1, 3, 5, 7])]
fn test_orders_on_perfect_tree(#[case] order: TraversalOrder, #[case] expected: Vec<u32>) {
    let tree = perfect_tree();
    let visited: Vec<u32> = tree.iter_order(order).copied().collect();
    assert_eq!(visited, expected);
}

#[rstest]
#[case::ascending(TraversalOrder::Ascending)]
#[case::descending(TraversalOrder::Descending)]
#[case::pre_order(TraversalOrder::PreOrder)]
#[case::post_order(TraversalOrder::PostOrder)]
#[case::level_order(TraversalOrder::LevelOrder)]
fn test_orders_on_empty_tree(#[case] order: TraversalOrder) {
    let tree: RedBlackTree<u32> = RedBlackTree::new();
    assert_eq!(tree.iter_order(order).next(), None);
}

#[test]
fn test_iter_defaults_to_ascending() {
    let tree: RedBlackTree<u32> = [3, 1, 2].into_iter().collect();
    let visited: Vec<u32> = tree.iter().copied().collect();
    assert_eq!(visited, [1, 2, 3]);
}

#[test]
fn test_iter_stays_exhausted() {
    let tree: RedBlackTree<u32> = [1, 2].into_iter().collect();
    let mut iter = tree.iter();
    while iter.next().is_some() {}
    assert_eq!(iter.next(), None);
    assert_eq!(iter.next(), None);
}

#[test]
fn test_single_node_orders_agree() {
    let mut tree = RedBlackTree::new();
    tree.add(42u32);
    for order in [
        TraversalOrder::Ascending,
        TraversalOrder::Descending,
        TraversalOrder::PreOrder,
        TraversalOrder::PostOrder,
        TraversalOrder::LevelOrder,
    ] {
        let visited: Vec<u32> = tree.iter_order(order).copied().collect();
        assert_eq!(visited, [42]);
    }
}

#[test]
fn test_level_order_is_left_to_right_within_levels() {
    // An unbalanced-by-one tree: level order must still go left to right.
    let tree: AvlTree<u32> = (1..=6).collect();
    let visited: Vec<u32> = tree.iter_order(TraversalOrder::LevelOrder).copied().collect();
    assert_eq!(visited, [4, 2, 5, 1, 3, 6]);
}

#[test]
fn test_dump_renders_labels_and_sides() {
    let tree: AvlTree<u32> = (1..=3).collect();
    let dump = tree.root_node().unwrap().dump();
    assert_eq!(dump, "2 [h=2]\n  L: 1 [h=1]\n  R: 3 [h=1]\n");
}
