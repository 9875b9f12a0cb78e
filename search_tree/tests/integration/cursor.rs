/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! Tests for detached cursors and their staleness checks.

use search_tree::{Error, RedBlackTree, SearchTree, TraversalOrder, Treap};

#[test]
fn test_pull_sequence_matches_iterator() {
    let tree: RedBlackTree<u32> = (1..=20).collect();
    let mut cursor = tree.cursor(TraversalOrder::Ascending);
    let mut pulled = Vec::new();
    while let Some(v) = tree.pull(&mut cursor).unwrap() {
        pulled.push(*v);
    }
    let iterated: Vec<u32> = tree.iter().copied().collect();
    assert_eq!(pulled, iterated);
}

#[test]
fn test_exhausted_cursor_stays_exhausted() {
    let tree: RedBlackTree<u32> = [1, 2].into_iter().collect();
    let mut cursor = tree.cursor(TraversalOrder::Ascending);
    while tree.pull(&mut cursor).unwrap().is_some() {}
    assert_eq!(tree.pull(&mut cursor), Ok(None));
    assert_eq!(tree.pull(&mut cursor), Ok(None));
}

#[test]
fn test_empty_tree_cursor_yields_nothing() {
    let tree: RedBlackTree<u32> = RedBlackTree::new();
    let mut cursor = tree.cursor(TraversalOrder::LevelOrder);
    assert_eq!(tree.pull(&mut cursor), Ok(None));
}

#[test]
fn test_add_invalidates_cursor() {
    let mut tree: RedBlackTree<u32> = (1..=10).collect();
    let mut cursor = tree.cursor(TraversalOrder::Ascending);
    assert_eq!(tree.pull(&mut cursor), Ok(Some(&1)));

    tree.add(11);
    assert!(matches!(
        tree.pull(&mut cursor),
        Err(Error::ConcurrentModification { .. })
    ));
}

#[test]
fn test_remove_invalidates_cursor() {
    let mut tree: RedBlackTree<u32> = (1..=10).collect();
    let mut cursor = tree.cursor(TraversalOrder::PostOrder);
    tree.remove(&5);
    assert!(matches!(
        tree.pull(&mut cursor),
        Err(Error::ConcurrentModification { .. })
    ));
}

#[test]
fn test_clear_invalidates_cursor() {
    let mut tree: RedBlackTree<u32> = (1..=10).collect();
    let mut cursor = tree.cursor(TraversalOrder::Ascending);
    tree.clear();
    assert!(tree.pull(&mut cursor).is_err());
}

#[test]
fn test_clear_of_empty_tree_does_not_invalidate() {
    let mut tree: RedBlackTree<u32> = RedBlackTree::new();
    let mut cursor = tree.cursor(TraversalOrder::Ascending);
    tree.clear();
    assert_eq!(tree.pull(&mut cursor), Ok(None));
}

#[test]
fn test_in_place_replacement_does_not_invalidate() {
    // Re-adding an existing value swaps it in place; no node moves, so a
    // suspended cursor remains valid.
    let mut tree: RedBlackTree<u32> = (1..=10).collect();
    let mut cursor = tree.cursor(TraversalOrder::Ascending);
    assert_eq!(tree.pull(&mut cursor), Ok(Some(&1)));
    assert_eq!(tree.add(7), Some(7));
    assert_eq!(tree.pull(&mut cursor), Ok(Some(&2)));
}

#[test]
fn test_invalidated_cursor_stays_poisoned() {
    let mut tree: RedBlackTree<u32> = (1..=10).collect();
    let mut cursor = tree.cursor(TraversalOrder::Ascending);
    tree.add(11);

    let first = tree.pull(&mut cursor);
    assert!(first.is_err());
    // Every later pull keeps reporting the same failure.
    assert_eq!(tree.pull(&mut cursor), first);

    // A fresh cursor observes the new state.
    let mut fresh = tree.cursor(TraversalOrder::Ascending);
    assert_eq!(tree.pull(&mut fresh), Ok(Some(&1)));
}

#[test]
fn test_foreign_tree_is_rejected_without_poisoning() {
    let tree_a: RedBlackTree<u32> = (1..=3).collect();
    let tree_b: RedBlackTree<u32> = (1..=3).collect();
    let mut cursor = tree_a.cursor(TraversalOrder::Ascending);

    assert_eq!(tree_b.pull(&mut cursor), Err(Error::ForeignTree));
    // The cursor is still usable against its own tree.
    assert_eq!(tree_a.pull(&mut cursor), Ok(Some(&1)));
}

#[test]
fn test_clone_counts_as_a_foreign_tree() {
    let tree: RedBlackTree<u32> = (1..=3).collect();
    let copy = tree.clone();
    let mut cursor = tree.cursor(TraversalOrder::Ascending);
    assert_eq!(copy.pull(&mut cursor), Err(Error::ForeignTree));
}

#[test]
fn test_cursor_next_sugar() {
    let tree: Treap<u32> = [3u32, 1, 2].into_iter().collect();
    let mut cursor = tree.cursor(TraversalOrder::Descending);
    assert_eq!(cursor.next(&tree), Ok(Some(&3)));
    assert_eq!(cursor.next(&tree), Ok(Some(&2)));
    assert_eq!(cursor.next(&tree), Ok(Some(&1)));
    assert_eq!(cursor.next(&tree), Ok(None));
}

#[test]
fn test_error_reports_epochs() {
    let mut tree: RedBlackTree<u32> = (1..=3).collect();
    let mut cursor = tree.cursor(TraversalOrder::Ascending);
    tree.add(4);
    match tree.pull(&mut cursor) {
        Err(Error::ConcurrentModification {
            cursor_epoch,
            tree_epoch,
        }) => {
            assert!(tree_epoch > cursor_epoch);
        }
        other => panic!("expected a concurrent modification error, got {other:?}"),
    }
}
