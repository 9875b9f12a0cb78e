/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! Tests for Treap.

use search_tree::{SearchTree, TraversalOrder, Treap};

use crate::helpers::{ascending, check_contract, scrambled};

#[test]
fn test_contract() {
    check_contract::<Treap<u32>>();
}

#[test]
fn test_seeded_treaps_have_identical_shapes() {
    let mut a = Treap::with_seed(7);
    let mut b = Treap::with_seed(7);
    for v in scrambled(100) {
        a.add(v);
        b.add(v);
    }
    a.check_invariants();
    assert_eq!(
        a.root_node().unwrap().dump(),
        b.root_node().unwrap().dump()
    );
}

#[test]
fn test_explicit_priority_pins_value_at_root() {
    let mut tree = Treap::with_seed(42);
    for v in 0..50u32 {
        tree.add(v);
    }
    tree.add_with_priority(25, u64::MAX);
    assert_eq!(*tree.root_node().unwrap().value(), 25);
    assert_eq!(tree.priority_of(&25), Some(u64::MAX));
    tree.check_invariants();
}

#[test]
fn test_reprioritizing_percolates_down() {
    let mut tree = Treap::with_seed(42);
    for v in 0..50u32 {
        tree.add(v);
    }
    tree.add_with_priority(25, u64::MAX);
    assert_eq!(*tree.root_node().unwrap().value(), 25);

    // Dropping the priority to the minimum pushes the node back down to a
    // leaf position.
    tree.add_with_priority(25, 0);
    assert_ne!(*tree.root_node().unwrap().value(), 25);
    assert_eq!(tree.priority_of(&25), Some(0));
    assert_eq!(tree.len(), 50);
    tree.check_invariants();

    let root = tree.root_node().unwrap();
    let leaf = *root.value();
    assert!(tree.contains(&leaf));
}

#[test]
fn test_fixed_priorities_decide_the_root() {
    let mut tree = Treap::with_seed(0);
    tree.add_with_priority(5u32, 10);
    tree.add_with_priority(3, 20);
    tree.add_with_priority(8, 5);

    // The highest priority wins the root regardless of insertion order.
    assert_eq!(*tree.root_node().unwrap().value(), 3);
    assert_eq!(ascending(&tree), [3, 5, 8]);
    tree.check_invariants();
}

#[test]
fn test_priority_of_absent_value() {
    let mut tree = Treap::with_seed(1);
    tree.add(10u32);
    assert_eq!(tree.priority_of(&11), None);
}

#[test]
fn test_replacing_value_keeps_priority() {
    let mut tree = Treap::with_seed(3);
    tree.add_with_priority(5u32, 1000);
    // A plain re-add replaces the value in place and leaves the stored
    // priority alone; only the explicit-priority entry point changes it.
    assert_eq!(tree.add(5), Some(5));
    assert_eq!(tree.priority_of(&5), Some(1000));
    tree.add_with_priority(5, 2000);
    assert_eq!(tree.priority_of(&5), Some(2000));
    assert_eq!(tree.len(), 1);
}

#[test]
fn test_replacing_value_keeps_shape() {
    let mut tree = Treap::with_seed(17);
    for v in 0..64u32 {
        tree.add(v);
    }
    let before = tree.root_node().unwrap().dump();
    assert_eq!(tree.add(32), Some(32));
    let after = tree.root_node().unwrap().dump();
    assert_eq!(before, after);
    assert_eq!(tree.len(), 64);
    tree.check_invariants();
}

#[test]
fn test_replacing_value_does_not_invalidate_cursor() {
    let mut tree = Treap::with_seed(17);
    for v in 0..16u32 {
        tree.add(v);
    }
    let mut cursor = tree.cursor(TraversalOrder::Ascending);
    assert_eq!(tree.pull(&mut cursor), Ok(Some(&0)));
    assert_eq!(tree.add(7), Some(7));
    assert_eq!(tree.pull(&mut cursor), Ok(Some(&1)));
}

#[test]
fn test_random_priorities_keep_expected_balance() {
    let mut tree = Treap::with_seed(99);
    for v in 1..=1024u32 {
        tree.add(v);
    }
    tree.check_invariants();
    // Expected height is ~3*log2(n); anything near n would mean the heap
    // property is not doing its job on sorted input.
    assert!(tree.height() <= 60, "height {} is degenerate", tree.height());
    assert_eq!(ascending(&tree), (1..=1024).collect::<Vec<_>>());
}

#[test]
fn test_invariants_hold_through_mixed_workload() {
    let mut tree = Treap::with_seed(11);
    let values = scrambled(200);
    for &v in &values {
        tree.add(v);
        tree.check_invariants();
    }
    for &v in values.iter().rev() {
        assert_eq!(tree.remove(&v), Some(v));
        tree.check_invariants();
    }
    assert!(tree.is_empty());
}
