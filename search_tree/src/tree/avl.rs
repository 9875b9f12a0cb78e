/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! AVL tree.
//!
//! Height-balanced discipline: every node stores the height of its subtree
//! (a leaf has height 1) and the heights of a node's two subtrees never
//! differ by more than one. After an insert or delete the ancestors of the
//! changed position are retraced bottom-up, refreshing stored heights and
//! rotating wherever the balance factor leaves the [-1, 1] band. Inserts
//! need at most one rebalance; deletes may rebalance several ancestors on
//! the way up, so the retrace always runs to the root.

use crate::arena::NodeIndex;
use crate::debug::NodeRef;
use crate::error::Error;
use crate::node::{Height, Side};
use crate::traverse::{self, Cursor, Iter, TraversalOrder};
use crate::tree::{InsertionPoint, SearchTree, TreeCore};

/// An ordered set of unique values balanced by stored subtree heights.
///
/// See [`SearchTree`] for the operation contract shared with the other
/// disciplines.
#[derive(Debug, Clone)]
pub struct AvlTree<T> {
    core: TreeCore<T, Height>,
}

impl<T: Ord> AvlTree<T> {
    pub fn new() -> Self {
        Self {
            core: TreeCore::new(),
        }
    }

    /// Stored height of a possibly-absent node. Absent children read as 0.
    fn height_of(&self, idx: Option<NodeIndex>) -> u32 {
        idx.map_or(0, |idx| self.core.meta(idx).0)
    }

    /// Recompute a node's stored height from its children.
    fn update_height(&mut self, idx: NodeIndex) {
        let left = self.height_of(self.core.child(idx, Side::Left));
        let right = self.height_of(self.core.child(idx, Side::Right));
        *self.core.meta_mut(idx) = Height(1 + left.max(right));
    }

    /// Left height minus right height. In balance this is -1, 0, or 1.
    fn balance_factor(&self, idx: NodeIndex) -> i64 {
        let left = self.height_of(self.core.child(idx, Side::Left));
        let right = self.height_of(self.core.child(idx, Side::Right));
        i64::from(left) - i64::from(right)
    }

    /// Rotate the out-of-balance node `idx` back into the [-1, 1] band,
    /// fixing the stored heights of every node the rotations move.
    ///
    /// The four classic cases collapse to two by parameterizing on the
    /// heavy side: an inner-grandchild imbalance first rotates the heavy
    /// child to straighten the path, then one rotation at `idx` finishes.
    fn rebalance(&mut self, idx: NodeIndex) {
        let heavy = if self.balance_factor(idx) > 0 {
            Side::Left
        } else {
            Side::Right
        };
        let child = self
            .core
            .child(idx, heavy)
            .expect("an out-of-balance node has a child on its heavy side");

        let child_balance = self.balance_factor(child);
        let inner = match heavy {
            Side::Left => child_balance < 0,
            Side::Right => child_balance > 0,
        };
        if inner {
            self.core.rotate(child, heavy);
            self.update_height(child);
            let straightened = self
                .core
                .child(idx, heavy)
                .expect("the rotation promoted a node into the heavy slot");
            self.update_height(straightened);
        }

        self.core.rotate(idx, heavy.opposite());
        self.update_height(idx);
        let promoted = self
            .core
            .parent(idx)
            .expect("the rotation gave the demoted node a parent");
        self.update_height(promoted);
    }

    /// Walk from `start` to the root, refreshing stored heights and
    /// rebalancing every node that left the [-1, 1] band.
    fn retrace(&mut self, start: Option<NodeIndex>) {
        let mut cur = start;
        while let Some(idx) = cur {
            self.update_height(idx);
            if self.balance_factor(idx).abs() > 1 {
                self.rebalance(idx);
                // The rotation demoted `idx` under the new subtree root;
                // continue from above that root.
                cur = self
                    .core
                    .parent(idx)
                    .and_then(|subtree| self.core.parent(subtree));
            } else {
                cur = self.core.parent(idx);
            }
        }
    }

    #[cfg(feature = "unittest")]
    fn after_mutation(&self) {
        self.check_invariants();
    }

    #[cfg(not(feature = "unittest"))]
    fn after_mutation(&self) {}

    pub(crate) fn core(&self) -> &TreeCore<T, Height> {
        &self.core
    }
}

impl<T: Ord> SearchTree<T> for AvlTree<T> {
    fn add(&mut self, value: T) -> Option<T> {
        let replaced = match self.core.insertion_point(&value) {
            InsertionPoint::Existing(idx) => Some(self.core.replace_value(idx, value)),
            InsertionPoint::Root => {
                self.core.attach(None, value, Height(1));
                None
            }
            InsertionPoint::Child { parent, side } => {
                self.core.attach(Some((parent, side)), value, Height(1));
                self.retrace(Some(parent));
                None
            }
        };
        self.after_mutation();
        replaced
    }

    fn remove(&mut self, value: &T) -> Option<T> {
        let idx = self.core.find_index(value)?;
        let target = match self.core.child(idx, Side::Right) {
            Some(right) if self.core.child(idx, Side::Left).is_some() => {
                let successor = self.core.min_from(right);
                self.core.swap_values(idx, successor);
                successor
            }
            _ => idx,
        };
        let child = self
            .core
            .child(target, Side::Left)
            .or(self.core.child(target, Side::Right));
        let parent = self.core.parent(target);
        self.core.transplant(target, child);
        let node = self.core.remove_node(target);
        self.retrace(parent);
        self.after_mutation();
        Some(node.value)
    }

    fn find(&self, value: &T) -> Option<&T> {
        self.core.get(value)
    }

    fn len(&self) -> usize {
        self.core.len()
    }

    fn min(&self) -> Option<&T> {
        self.core.min()
    }

    fn max(&self) -> Option<&T> {
        self.core.max()
    }

    fn clear(&mut self) {
        self.core.clear();
    }

    fn height(&self) -> usize {
        self.core.height()
    }

    fn iter_order(&self, order: TraversalOrder) -> Iter<'_, T> {
        Iter::new(&self.core, order)
    }

    fn cursor(&self, order: TraversalOrder) -> Cursor {
        Cursor::new(&self.core, order)
    }

    fn pull<'t>(&'t self, cursor: &mut Cursor) -> Result<Option<&'t T>, Error> {
        traverse::pull(&self.core, cursor)
    }

    fn root_node(&self) -> Option<NodeRef<'_, T>> {
        NodeRef::root_of(&self.core)
    }
}

impl<T: Ord> Default for AvlTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> FromIterator<T> for AvlTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<T: Ord> Extend<T> for AvlTree<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.add(value);
        }
    }
}
