/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! Randomized treap.
//!
//! Each node carries a priority drawn at insert time, and the tree is
//! simultaneously a search tree on values and a max-heap on priorities.
//! Random priorities make the shape equivalent to a random-insertion BST,
//! giving expected O(log n) operations without any stored balance state.
//!
//! An inserted node is attached at its leaf position and rotated up while
//! its priority exceeds its parent's; a removed node is rotated down below
//! its higher-priority child until it has at most one child, then spliced
//! out. Priority comparisons are strict, so ties leave the tree unchanged.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::arena::NodeIndex;
use crate::debug::NodeRef;
use crate::error::Error;
use crate::node::{Priority, Side};
use crate::traverse::{self, Cursor, Iter, TraversalOrder};
use crate::tree::{InsertionPoint, SearchTree, TreeCore};

/// An ordered set of unique values balanced by random heap priorities.
///
/// See [`SearchTree`] for the operation contract shared with the other
/// disciplines. Priorities can also be assigned explicitly with
/// [`add_with_priority`](Treap::add_with_priority), which pins a value
/// closer to (or further from) the root.
#[derive(Debug, Clone)]
pub struct Treap<T> {
    core: TreeCore<T, Priority>,
    rng: SmallRng,
}

impl<T: Ord> Treap<T> {
    pub fn new() -> Self {
        Self {
            core: TreeCore::new(),
            rng: SmallRng::from_entropy(),
        }
    }

    /// A treap drawing its priorities from a deterministic sequence.
    /// Two treaps built from the same seed with the same operations have
    /// identical shapes, which makes shape-sensitive tests reproducible.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            core: TreeCore::new(),
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Insert `value` with an explicit priority instead of a random one.
    ///
    /// If a comparison-equal value is already stored, the value is replaced
    /// in place and the node's priority is updated, rotating the node up or
    /// down as needed to keep the heap property.
    pub fn add_with_priority(&mut self, value: T, priority: u64) -> Option<T> {
        let replaced = match self.core.insertion_point(&value) {
            InsertionPoint::Existing(idx) => {
                let old = self.core.replace_value(idx, value);
                *self.core.meta_mut(idx) = Priority(priority);
                let moved = self.percolate_up(idx) || self.percolate_down(idx);
                if moved {
                    self.core.bump_epoch();
                }
                Some(old)
            }
            InsertionPoint::Root => {
                self.core.attach(None, value, Priority(priority));
                None
            }
            InsertionPoint::Child { parent, side } => {
                let idx = self
                    .core
                    .attach(Some((parent, side)), value, Priority(priority));
                self.percolate_up(idx);
                None
            }
        };
        self.after_mutation();
        replaced
    }

    /// The priority currently stored for the value comparing equal to
    /// `value`, if any.
    pub fn priority_of(&self, value: &T) -> Option<u64> {
        self.core.find_index(value).map(|idx| self.core.meta(idx).0)
    }

    fn priority(&self, idx: NodeIndex) -> Priority {
        *self.core.meta(idx)
    }

    /// Rotate `idx` up while its priority strictly exceeds its parent's.
    /// Returns whether any rotation happened.
    fn percolate_up(&mut self, idx: NodeIndex) -> bool {
        let mut moved = false;
        while let Some(parent) = self.core.parent(idx) {
            if self.priority(idx) <= self.priority(parent) {
                break;
            }
            let side = if self.core.child(parent, Side::Left) == Some(idx) {
                Side::Left
            } else {
                Side::Right
            };
            self.core.rotate(parent, side.opposite());
            moved = true;
        }
        moved
    }

    /// Rotate `idx` down while a child's priority strictly exceeds its
    /// own, always lifting the higher-priority child. Returns whether any
    /// rotation happened.
    fn percolate_down(&mut self, idx: NodeIndex) -> bool {
        let mut moved = false;
        loop {
            let Some(side) = self.higher_priority_child(idx) else {
                break;
            };
            self.core.rotate(idx, side.opposite());
            moved = true;
        }
        moved
    }

    /// The side of the child whose priority strictly exceeds `idx`'s own,
    /// preferring the larger of the two when both do.
    fn higher_priority_child(&self, idx: NodeIndex) -> Option<Side> {
        let own = self.priority(idx);
        let left = self
            .core
            .child(idx, Side::Left)
            .map(|child| self.priority(child));
        let right = self
            .core
            .child(idx, Side::Right)
            .map(|child| self.priority(child));
        match (left, right) {
            (Some(l), Some(r)) if l > own || r > own => {
                Some(if l >= r { Side::Left } else { Side::Right })
            }
            (Some(l), None) if l > own => Some(Side::Left),
            (None, Some(r)) if r > own => Some(Side::Right),
            _ => None,
        }
    }

    #[cfg(feature = "unittest")]
    fn after_mutation(&self) {
        self.check_invariants();
    }

    #[cfg(not(feature = "unittest"))]
    fn after_mutation(&self) {}

    pub(crate) fn core(&self) -> &TreeCore<T, Priority> {
        &self.core
    }
}

impl<T: Ord> SearchTree<T> for Treap<T> {
    fn add(&mut self, value: T) -> Option<T> {
        // A plain re-add replaces the value in place and keeps the node's
        // stored priority, so the shape is untouched and in-flight cursors
        // stay valid. Only add_with_priority re-prioritizes.
        let replaced = match self.core.insertion_point(&value) {
            InsertionPoint::Existing(idx) => Some(self.core.replace_value(idx, value)),
            InsertionPoint::Root => {
                let priority = self.rng.gen::<u64>();
                self.core.attach(None, value, Priority(priority));
                None
            }
            InsertionPoint::Child { parent, side } => {
                let priority = self.rng.gen::<u64>();
                let idx = self
                    .core
                    .attach(Some((parent, side)), value, Priority(priority));
                self.percolate_up(idx);
                None
            }
        };
        self.after_mutation();
        replaced
    }

    fn remove(&mut self, value: &T) -> Option<T> {
        let idx = self.core.find_index(value)?;
        // Rotate the node down below its higher-priority child until it has
        // at most one child, then splice it out.
        loop {
            let left = self.core.child(idx, Side::Left);
            let right = self.core.child(idx, Side::Right);
            let (Some(l), Some(r)) = (left, right) else {
                break;
            };
            let side = if self.priority(l) >= self.priority(r) {
                Side::Left
            } else {
                Side::Right
            };
            self.core.rotate(idx, side.opposite());
        }
        let child = self
            .core
            .child(idx, Side::Left)
            .or(self.core.child(idx, Side::Right));
        self.core.transplant(idx, child);
        let node = self.core.remove_node(idx);
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

impl<T: Ord> Default for Treap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> FromIterator<T> for Treap<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<T: Ord> Extend<T> for Treap<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.add(value);
        }
    }
}
