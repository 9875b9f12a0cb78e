/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! Red-black tree.
//!
//! The classic color-based discipline: every node is red or black, the root
//! is black, a red node never has a red child, and every root-to-leaf path
//! crosses the same number of black nodes. Together these bound the height
//! at twice the shortest path, so all operations stay O(log n).
//!
//! Fixups are written once per symmetric pair by parameterizing on the
//! [`Side`] of the affected child; an absent child reads as black, so no
//! sentinel node is needed.

use crate::arena::NodeIndex;
use crate::debug::NodeRef;
use crate::error::Error;
use crate::node::{Color, Side};
use crate::traverse::{self, Cursor, Iter, TraversalOrder};
use crate::tree::{InsertionPoint, SearchTree, TreeCore};

/// An ordered set of unique values balanced by node colors.
///
/// See [`SearchTree`] for the operation contract shared with the other
/// disciplines.
#[derive(Debug, Clone)]
pub struct RedBlackTree<T> {
    core: TreeCore<T, Color>,
}

impl<T: Ord> RedBlackTree<T> {
    pub fn new() -> Self {
        Self {
            core: TreeCore::new(),
        }
    }

    /// Color of a possibly-absent node. Absent children are black.
    fn color(&self, idx: Option<NodeIndex>) -> Color {
        idx.map_or(Color::Black, |idx| *self.core.meta(idx))
    }

    fn set_color(&mut self, idx: NodeIndex, color: Color) {
        *self.core.meta_mut(idx) = color;
    }

    /// Restore the red-black properties after attaching the red node `z`.
    ///
    /// Walks toward the root resolving red-red violations: a red uncle is
    /// recolored and the violation moves up two levels; a black uncle is
    /// fixed with at most two rotations and ends the walk.
    fn insert_fixup(&mut self, mut z: NodeIndex) {
        while self.color(self.core.parent(z)) == Color::Red {
            let p = self.core.parent(z).expect("a red node always has a parent");
            let g = self
                .core
                .parent(p)
                .expect("a red node is never the root, so its child has a grandparent");
            let side = if self.core.child(g, Side::Left) == Some(p) {
                Side::Left
            } else {
                Side::Right
            };
            match self.core.child(g, side.opposite()) {
                uncle if self.color(uncle) == Color::Red => {
                    let uncle = uncle.expect("a red uncle is present");
                    self.set_color(p, Color::Black);
                    self.set_color(uncle, Color::Black);
                    self.set_color(g, Color::Red);
                    z = g;
                }
                _ => {
                    if self.core.child(p, side.opposite()) == Some(z) {
                        // Inner grandchild: straighten the path first.
                        z = p;
                        self.core.rotate(z, side);
                    }
                    let p = self.core.parent(z).expect("a red node always has a parent");
                    let g = self
                        .core
                        .parent(p)
                        .expect("the straightened path still has a grandparent");
                    self.set_color(p, Color::Black);
                    self.set_color(g, Color::Red);
                    self.core.rotate(g, side.opposite());
                }
            }
        }
        let root = self.core.root().expect("fixup runs on a non-empty tree");
        self.set_color(root, Color::Black);
    }

    /// Restore the red-black properties after splicing out a black node.
    ///
    /// `x` is the child that took the removed node's place (possibly
    /// absent) and `parent` its parent; `x` carries an extra unit of
    /// blackness that this walk pushes up or discharges with rotations.
    fn delete_fixup(&mut self, mut x: Option<NodeIndex>, mut parent: Option<NodeIndex>) {
        while x != self.core.root() && self.color(x) == Color::Black {
            let Some(p) = parent else {
                break;
            };
            let side = if self.core.child(p, Side::Left) == x {
                Side::Left
            } else {
                Side::Right
            };
            let mut w = self
                .core
                .child(p, side.opposite())
                .expect("a doubly-black node always has a sibling");
            if self.color(Some(w)) == Color::Red {
                // Red sibling: rotate to expose a black one.
                self.set_color(w, Color::Black);
                self.set_color(p, Color::Red);
                self.core.rotate(p, side);
                w = self
                    .core
                    .child(p, side.opposite())
                    .expect("the rotation moved a black sibling into place");
            }
            if self.color(self.core.child(w, Side::Left)) == Color::Black
                && self.color(self.core.child(w, Side::Right)) == Color::Black
            {
                // Both nephews black: recolor and push the extra blackness up.
                self.set_color(w, Color::Red);
                x = Some(p);
                parent = self.core.parent(p);
            } else {
                if self.color(self.core.child(w, side.opposite())) == Color::Black {
                    let near = self
                        .core
                        .child(w, side)
                        .expect("one nephew is red and it is the near one");
                    self.set_color(near, Color::Black);
                    self.set_color(w, Color::Red);
                    self.core.rotate(w, side.opposite());
                    w = self
                        .core
                        .child(p, side.opposite())
                        .expect("the rotation moved the red nephew's parent into place");
                }
                // Far nephew red: one rotation discharges the blackness.
                let p_color = *self.core.meta(p);
                self.set_color(w, p_color);
                self.set_color(p, Color::Black);
                let far = self
                    .core
                    .child(w, side.opposite())
                    .expect("the far nephew is red");
                self.set_color(far, Color::Black);
                self.core.rotate(p, side);
                x = self.core.root();
                break;
            }
        }
        if let Some(x) = x {
            self.set_color(x, Color::Black);
        }
    }

    #[cfg(feature = "unittest")]
    fn after_mutation(&self) {
        self.check_invariants();
    }

    #[cfg(not(feature = "unittest"))]
    fn after_mutation(&self) {}

    pub(crate) fn core(&self) -> &TreeCore<T, Color> {
        &self.core
    }
}

impl<T: Ord> SearchTree<T> for RedBlackTree<T> {
    fn add(&mut self, value: T) -> Option<T> {
        let replaced = match self.core.insertion_point(&value) {
            InsertionPoint::Existing(idx) => Some(self.core.replace_value(idx, value)),
            InsertionPoint::Root => {
                self.core.attach(None, value, Color::Black);
                None
            }
            InsertionPoint::Child { parent, side } => {
                let idx = self.core.attach(Some((parent, side)), value, Color::Red);
                self.insert_fixup(idx);
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
                // Two children: move the in-order successor's value here and
                // splice out the successor instead.
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
        let removed_color = *self.core.meta(target);
        self.core.transplant(target, child);
        let node = self.core.remove_node(target);
        if removed_color == Color::Black {
            self.delete_fixup(child, parent);
        }
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

impl<T: Ord> Default for RedBlackTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> FromIterator<T> for RedBlackTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<T: Ord> Extend<T> for RedBlackTree<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.add(value);
        }
    }
}
