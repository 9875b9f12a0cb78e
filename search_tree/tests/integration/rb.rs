/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! Tests for RedBlackTree.

use search_tree::{RedBlackTree, SearchTree};

use crate::helpers::{ascending, check_contract, scrambled};

#[test]
fn test_contract() {
    check_contract::<RedBlackTree<u32>>();
}

#[test]
fn test_insert_fixup_recolors_and_rotates() {
    // A monotonic ascending run is the adversarial case for naive BSTs;
    // here the straight-line rotation fires on the third insert and the
    // middle value becomes a black root with two red children.
    let mut tree = RedBlackTree::new();
    tree.add(10);
    tree.add(20);
    tree.add(30);

    let root = tree.root_node().unwrap();
    assert_eq!(*root.value(), 20);
    assert_eq!(root.label(), "black");
    let left = root.left().unwrap();
    let right = root.right().unwrap();
    assert_eq!(*left.value(), 10);
    assert_eq!(left.label(), "red");
    assert_eq!(*right.value(), 30);
    assert_eq!(right.label(), "red");
    assert!(tree.height() <= 4);
}

#[test]
fn test_root_is_always_black() {
    let mut tree = RedBlackTree::new();
    for v in scrambled(150) {
        tree.add(v);
        assert_eq!(tree.root_node().unwrap().label(), "black");
    }
    for v in scrambled(150) {
        tree.remove(&v);
        if let Some(root) = tree.root_node() {
            assert_eq!(root.label(), "black");
        }
    }
}

#[test]
fn test_sorted_inserts_stay_logarithmic() {
    let mut tree = RedBlackTree::new();
    for v in 1..=1024u32 {
        tree.add(v);
    }
    tree.check_invariants();
    // Red-black height is bounded by 2*log2(n + 1).
    assert!(tree.height() <= 20, "height {} exceeds bound", tree.height());
    assert_eq!(tree.len(), 1024);
    assert_eq!(tree.min(), Some(&1));
    assert_eq!(tree.max(), Some(&1024));
}

#[test]
fn test_invariants_hold_through_mixed_workload() {
    let mut tree = RedBlackTree::new();
    let values = scrambled(200);
    for &v in &values {
        tree.add(v);
        tree.check_invariants();
    }
    for &v in values.iter().rev() {
        tree.remove(&v);
        tree.check_invariants();
    }
    assert!(tree.is_empty());
}

#[test]
fn test_from_iterator_and_extend() {
    let mut tree: RedBlackTree<u32> = [5, 3, 9].into_iter().collect();
    tree.extend([1, 7]);
    assert_eq!(ascending(&tree), [1, 3, 5, 7, 9]);
}

#[test]
fn test_clone_is_independent() {
    let mut tree: RedBlackTree<u32> = (0..50).collect();
    let mut copy = tree.clone();
    copy.remove(&25);
    tree.add(99);
    assert_eq!(tree.len(), 51);
    assert_eq!(copy.len(), 49);
    assert!(tree.contains(&25));
    assert!(!copy.contains(&25));
    copy.check_invariants();
    tree.check_invariants();
}
