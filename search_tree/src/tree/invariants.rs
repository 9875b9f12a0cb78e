/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! Structural invariant checks.
//!
//! Every facade exposes `check_invariants`, which panics with a descriptive
//! message if the tree is malformed. With the `unittest` feature enabled the
//! checks also run automatically after every mutation, so property tests
//! exercise them on every step; without it they cost nothing unless called.

use crate::arena::NodeIndex;
use crate::node::{Color, Side};
use crate::tree::{AvlTree, RedBlackTree, Treap, TreeCore};

/// Checks shared by every discipline: link symmetry, reachability, the
/// stored length, and strict BST ordering.
fn check_core<T: Ord, M>(core: &TreeCore<T, M>) {
    assert_eq!(
        core.node_count(),
        core.len(),
        "arena holds {} nodes but the tree length is {}",
        core.node_count(),
        core.len()
    );
    assert_eq!(
        core.root().is_none(),
        core.len() == 0,
        "root presence disagrees with the tree length"
    );
    if let Some(root) = core.root() {
        assert!(
            core.parent(root).is_none(),
            "the root must not have a parent"
        );
    }
    for (idx, node) in core.nodes() {
        for side in [Side::Left, Side::Right] {
            if let Some(child) = node.child(side) {
                assert_eq!(
                    core.parent(child),
                    Some(idx),
                    "child {child:?} does not link back to its parent {idx:?}"
                );
            }
        }
    }

    // Strict ordering, checked with per-subtree bounds; also counts the
    // nodes reachable from the root to catch leaked or orphaned nodes.
    let mut visited = 0usize;
    let mut stack: Vec<(NodeIndex, Option<NodeIndex>, Option<NodeIndex>)> = core
        .root()
        .map(|root| vec![(root, None, None)])
        .unwrap_or_default();
    while let Some((idx, lo, hi)) = stack.pop() {
        visited += 1;
        let value = core.value(idx);
        if let Some(lo) = lo {
            assert!(
                core.value(lo) < value,
                "node {idx:?} violates the ordering lower bound set by {lo:?}"
            );
        }
        if let Some(hi) = hi {
            assert!(
                value < core.value(hi),
                "node {idx:?} violates the ordering upper bound set by {hi:?}"
            );
        }
        if let Some(left) = core.child(idx, Side::Left) {
            stack.push((left, lo, Some(idx)));
        }
        if let Some(right) = core.child(idx, Side::Right) {
            stack.push((right, Some(idx), hi));
        }
    }
    assert_eq!(
        visited,
        core.len(),
        "{visited} nodes reachable from the root but the tree length is {}",
        core.len()
    );
}

impl<T: Ord> RedBlackTree<T> {
    /// Verify all structural invariants of the tree.
    ///
    /// Panics with a descriptive message if any invariant is violated.
    /// Called automatically after mutations when the `unittest` feature is
    /// enabled.
    pub fn check_invariants(&self) {
        let core = self.core();
        check_core(core);
        if let Some(root) = core.root() {
            assert_eq!(
                *core.meta(root),
                Color::Black,
                "the root must be black"
            );
        }
        black_height(core, core.root());
    }
}

/// Number of black nodes on every path from `idx` down to a leaf slot,
/// asserting that all paths agree and that no red node has a red child.
fn black_height<T: Ord>(core: &TreeCore<T, Color>, idx: Option<NodeIndex>) -> usize {
    let Some(idx) = idx else {
        // Absent children count as black leaves.
        return 1;
    };
    let color = *core.meta(idx);
    if color == Color::Red {
        for side in [Side::Left, Side::Right] {
            if let Some(child) = core.child(idx, side) {
                assert_eq!(
                    *core.meta(child),
                    Color::Black,
                    "red node {idx:?} has a red child {child:?}"
                );
            }
        }
    }
    let left = black_height(core, core.child(idx, Side::Left));
    let right = black_height(core, core.child(idx, Side::Right));
    assert_eq!(
        left, right,
        "black heights below node {idx:?} disagree ({left} vs {right})"
    );
    left + usize::from(color == Color::Black)
}

impl<T: Ord> AvlTree<T> {
    /// Verify all structural invariants of the tree.
    ///
    /// Panics with a descriptive message if any invariant is violated.
    /// Called automatically after mutations when the `unittest` feature is
    /// enabled.
    pub fn check_invariants(&self) {
        let core = self.core();
        check_core(core);
        avl_height(core, core.root());
    }
}

/// Computed height of the subtree at `idx`, asserting that every stored
/// height is exact and every balance factor stays within [-1, 1].
fn avl_height<T: Ord>(
    core: &TreeCore<T, crate::node::Height>,
    idx: Option<NodeIndex>,
) -> u32 {
    let Some(idx) = idx else {
        return 0;
    };
    let left = avl_height(core, core.child(idx, Side::Left));
    let right = avl_height(core, core.child(idx, Side::Right));
    let computed = 1 + left.max(right);
    assert_eq!(
        core.meta(idx).0,
        computed,
        "node {idx:?} stores a stale height ({} vs computed {computed})",
        core.meta(idx).0
    );
    assert!(
        left.abs_diff(right) <= 1,
        "node {idx:?} is out of balance (left height {left}, right height {right})"
    );
    computed
}

impl<T: Ord> Treap<T> {
    /// Verify all structural invariants of the tree.
    ///
    /// Panics with a descriptive message if any invariant is violated.
    /// Called automatically after mutations when the `unittest` feature is
    /// enabled.
    pub fn check_invariants(&self) {
        let core = self.core();
        check_core(core);
        for (idx, node) in core.nodes() {
            for side in [Side::Left, Side::Right] {
                if let Some(child) = node.child(side) {
                    assert!(
                        core.meta(child) <= core.meta(idx),
                        "child {child:?} outranks its parent {idx:?} in priority"
                    );
                }
            }
        }
    }
}
