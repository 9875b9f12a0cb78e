/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! Core tree structure shared by the balancing disciplines.
//!
//! The disciplines differ only in their fixup logic after insert/delete.
//! Everything else (the BST walk, the insertion-point search, rotations,
//! splicing, min/max, epoch bookkeeping) lives in [`TreeCore`] and is
//! reused by all three. The implementation is split into sub-modules by
//! discipline:
//!
//! - [`rb`]: red-black (color-based fixups)
//! - [`avl`]: AVL (height-based rotations)
//! - [`treap`]: randomized treap (priority-based rotations)

mod avl;
mod invariants;
mod rb;
mod treap;

pub use avl::AvlTree;
pub use rb::RedBlackTree;
pub use treap::Treap;

use std::cmp::Ordering;

use tracing::trace;

use crate::arena::{NodeArena, NodeIndex};
use crate::debug::NodeRef;
use crate::error::Error;
use crate::node::{Metadata, Node, Side};
use crate::traverse::{Cursor, Iter, TraversalOrder, TreeView};
use crate::unique_id::TreeId;

/// Where a value would attach to the tree, as found by the shared
/// insertion-path walk.
pub(crate) enum InsertionPoint {
    /// The tree is empty; the new node becomes the root.
    Root,
    /// Attach as the given child of `parent`.
    Child { parent: NodeIndex, side: Side },
    /// A comparison-equal value already occupies this node.
    Existing(NodeIndex),
}

/// The node graph, element count, and staleness bookkeeping shared by
/// every discipline. The facade types own one of these and layer their
/// fixup logic on top.
#[derive(Debug)]
pub(crate) struct TreeCore<T, M> {
    arena: NodeArena<T, M>,
    root: Option<NodeIndex>,
    len: usize,
    /// Mutation epoch, bumped on every structural change. Detached cursors
    /// capture it at creation and abort once it moves.
    epoch: u64,
    id: TreeId,
}

impl<T: Ord, M> TreeCore<T, M> {
    pub(crate) fn new() -> Self {
        Self {
            arena: NodeArena::new(),
            root: None,
            len: 0,
            epoch: 0,
            id: TreeId::next(),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn root(&self) -> Option<NodeIndex> {
        self.root
    }

    pub(crate) fn value(&self, idx: NodeIndex) -> &T {
        &self.arena[idx].value
    }

    pub(crate) fn meta(&self, idx: NodeIndex) -> &M {
        &self.arena[idx].meta
    }

    pub(crate) fn meta_mut(&mut self, idx: NodeIndex) -> &mut M {
        &mut self.arena[idx].meta
    }

    pub(crate) fn parent(&self, idx: NodeIndex) -> Option<NodeIndex> {
        self.arena[idx].parent
    }

    pub(crate) fn child(&self, idx: NodeIndex, side: Side) -> Option<NodeIndex> {
        self.arena[idx].child(side)
    }

    /// Number of nodes held by the arena (for invariant checks; equals
    /// `len` unless something leaked).
    pub(crate) fn node_count(&self) -> usize {
        self.arena.len()
    }

    /// Iterate over all nodes in arena (not tree) order.
    pub(crate) fn nodes(&self) -> impl Iterator<Item = (NodeIndex, &Node<T, M>)> {
        self.arena.iter()
    }

    pub(crate) fn bump_epoch(&mut self) {
        self.epoch = self.epoch.wrapping_add(1);
    }

    /// Walk from the root following comparisons to the node holding a
    /// comparison-equal value, if any.
    pub(crate) fn find_index(&self, value: &T) -> Option<NodeIndex> {
        let mut cur = self.root;
        while let Some(idx) = cur {
            match value.cmp(&self.arena[idx].value) {
                Ordering::Equal => return Some(idx),
                Ordering::Less => cur = self.arena[idx].left,
                Ordering::Greater => cur = self.arena[idx].right,
            }
        }
        None
    }

    pub(crate) fn get(&self, value: &T) -> Option<&T> {
        self.find_index(value).map(|idx| &self.arena[idx].value)
    }

    /// Walk from the root to the leaf position where `value` would attach,
    /// or to the existing comparison-equal node.
    pub(crate) fn insertion_point(&self, value: &T) -> InsertionPoint {
        let Some(mut cur) = self.root else {
            return InsertionPoint::Root;
        };
        loop {
            match value.cmp(&self.arena[cur].value) {
                Ordering::Equal => return InsertionPoint::Existing(cur),
                Ordering::Less => match self.arena[cur].left {
                    Some(left) => cur = left,
                    None => {
                        return InsertionPoint::Child {
                            parent: cur,
                            side: Side::Left,
                        }
                    }
                },
                Ordering::Greater => match self.arena[cur].right {
                    Some(right) => cur = right,
                    None => {
                        return InsertionPoint::Child {
                            parent: cur,
                            side: Side::Right,
                        }
                    }
                },
            }
        }
    }

    /// Link a new node into the tree at the given attachment point and
    /// bump the epoch. Pass `None` only when the tree is empty.
    pub(crate) fn attach(
        &mut self,
        at: Option<(NodeIndex, Side)>,
        value: T,
        meta: M,
    ) -> NodeIndex {
        let idx = self.arena.insert(Node::new(value, meta));
        match at {
            None => {
                debug_assert!(self.root.is_none());
                self.root = Some(idx);
            }
            Some((parent, side)) => {
                self.arena[parent].set_child(side, Some(idx));
                self.arena[idx].parent = Some(parent);
            }
        }
        self.len += 1;
        self.bump_epoch();
        trace!(node = ?idx, "attached node");
        idx
    }

    /// Replace the value held by a node in place, without moving the node.
    /// The epoch is deliberately not bumped: the structure did not change,
    /// so in-flight cursors remain valid.
    pub(crate) fn replace_value(&mut self, idx: NodeIndex, value: T) -> T {
        std::mem::replace(&mut self.arena[idx].value, value)
    }

    /// Swap the values of two nodes, leaving both in place. Used by the
    /// two-children delete path (swap with in-order successor).
    pub(crate) fn swap_values(&mut self, a: NodeIndex, b: NodeIndex) {
        let (na, nb) = self.arena.get2_mut(a, b);
        std::mem::swap(&mut na.value, &mut nb.value);
    }

    /// Replace the subtree rooted at `u` with the subtree rooted at `v` in
    /// `u`'s parent. `u`'s own links are left stale; the caller detaches it.
    pub(crate) fn transplant(&mut self, u: NodeIndex, v: Option<NodeIndex>) {
        let parent = self.arena[u].parent;
        match parent {
            None => self.root = v,
            Some(p) => {
                let side = if self.arena[p].left == Some(u) {
                    Side::Left
                } else {
                    Side::Right
                };
                self.arena[p].set_child(side, v);
            }
        }
        if let Some(v) = v {
            self.arena[v].parent = parent;
        }
    }

    /// Unlink a node from the arena after it has been spliced out of the
    /// tree, bumping the epoch.
    pub(crate) fn remove_node(&mut self, idx: NodeIndex) -> Node<T, M> {
        let node = self.arena.remove(idx);
        self.len -= 1;
        self.bump_epoch();
        trace!(node = ?idx, "removed node");
        node
    }

    /// Rotate the subtree rooted at `x` so that `x` moves down in
    /// direction `dir` and its opposite child takes its place.
    ///
    /// `rotate(x, Left)` is the classic left rotation (lifts `x`'s right
    /// child), `rotate(x, Right)` the right rotation. Only links are
    /// rewritten; metadata is untouched, and callers repair color/height
    /// afterwards as their discipline requires.
    pub(crate) fn rotate(&mut self, x: NodeIndex, dir: Side) {
        let lifted_side = dir.opposite();
        let y = self.arena[x]
            .child(lifted_side)
            .expect("rotation requires a child on the lifted side");
        trace!(node = ?x, lifted = ?y, ?dir, "rotate");

        // Move y's inner subtree over to x.
        let inner = self.arena[y].child(dir);
        self.arena[x].set_child(lifted_side, inner);
        if let Some(inner) = inner {
            self.arena[inner].parent = Some(x);
        }

        // Splice y into x's place under x's parent.
        let parent = self.arena[x].parent;
        self.arena[y].parent = parent;
        match parent {
            None => self.root = Some(y),
            Some(p) => {
                let side = if self.arena[p].left == Some(x) {
                    Side::Left
                } else {
                    Side::Right
                };
                self.arena[p].set_child(side, Some(y));
            }
        }

        // x becomes y's child on the rotation side.
        self.arena[y].set_child(dir, Some(x));
        self.arena[x].parent = Some(y);
    }

    /// Leftmost node of the subtree rooted at `idx`.
    pub(crate) fn min_from(&self, mut idx: NodeIndex) -> NodeIndex {
        while let Some(left) = self.arena[idx].left {
            idx = left;
        }
        idx
    }

    /// Rightmost node of the subtree rooted at `idx`.
    pub(crate) fn max_from(&self, mut idx: NodeIndex) -> NodeIndex {
        while let Some(right) = self.arena[idx].right {
            idx = right;
        }
        idx
    }

    pub(crate) fn min(&self) -> Option<&T> {
        self.root.map(|root| self.value(self.min_from(root)))
    }

    pub(crate) fn max(&self) -> Option<&T> {
        self.root.map(|root| self.value(self.max_from(root)))
    }

    /// Drop every node. No-op on an empty tree.
    pub(crate) fn clear(&mut self) {
        if self.len == 0 {
            return;
        }
        self.arena.clear();
        self.root = None;
        self.len = 0;
        self.bump_epoch();
    }

    /// Longest root-to-leaf path, counted in nodes; 0 when empty.
    pub(crate) fn height(&self) -> usize {
        let Some(root) = self.root else {
            return 0;
        };
        let mut stack = vec![(root, 1usize)];
        let mut height = 0;
        while let Some((idx, depth)) = stack.pop() {
            height = height.max(depth);
            if let Some(left) = self.arena[idx].left {
                stack.push((left, depth + 1));
            }
            if let Some(right) = self.arena[idx].right {
                stack.push((right, depth + 1));
            }
        }
        height
    }
}

impl<T: Clone, M: Clone> Clone for TreeCore<T, M> {
    fn clone(&self) -> Self {
        // A clone is a distinct tree: it gets a fresh ID so that cursors
        // created from the source tree cannot be pulled against the copy.
        Self {
            arena: self.arena.clone(),
            root: self.root,
            len: self.len,
            epoch: self.epoch,
            id: TreeId::next(),
        }
    }
}

impl<T: Ord, M: Metadata> TreeView for TreeCore<T, M> {
    type Value = T;

    fn root(&self) -> Option<NodeIndex> {
        self.root
    }

    fn left(&self, idx: NodeIndex) -> Option<NodeIndex> {
        self.arena[idx].left
    }

    fn right(&self, idx: NodeIndex) -> Option<NodeIndex> {
        self.arena[idx].right
    }

    fn value(&self, idx: NodeIndex) -> &T {
        &self.arena[idx].value
    }

    fn meta_label(&self, idx: NodeIndex) -> String {
        self.arena[idx].meta.label()
    }

    fn epoch(&self) -> u64 {
        self.epoch
    }

    fn id(&self) -> TreeId {
        self.id
    }
}

/// The ordered-container contract shared by every discipline, and the
/// surface consumed by collaborators built on top of a search tree.
///
/// Values are kept unique under `Ord`: adding a comparison-equal value
/// replaces the stored one in place. Negative results (`find`/`remove` on
/// an absent value, `min`/`max` of an empty tree) are `None`, not errors.
pub trait SearchTree<T: Ord> {
    /// Insert `value`. If a comparison-equal value is already stored, it is
    /// replaced in place: the node keeps its position, the count does not
    /// change, and the previous value is returned.
    fn add(&mut self, value: T) -> Option<T>;

    /// Remove and return the stored value comparing equal to `value`.
    /// Returns `None` (and leaves the tree untouched) when absent.
    fn remove(&mut self, value: &T) -> Option<T>;

    /// The stored value comparing equal to `value`, if any.
    fn find(&self, value: &T) -> Option<&T>;

    /// Number of stored values.
    fn len(&self) -> usize;

    /// Whether the tree holds no values.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether a value comparing equal to `value` is stored.
    fn contains(&self, value: &T) -> bool {
        self.find(value).is_some()
    }

    /// The smallest stored value.
    fn min(&self) -> Option<&T>;

    /// The largest stored value.
    fn max(&self) -> Option<&T>;

    /// Remove every stored value. No-op when already empty.
    fn clear(&mut self);

    /// Longest root-to-leaf path, counted in nodes; 0 when empty.
    fn height(&self) -> usize;

    /// Borrowed lazy traversal in the given order.
    fn iter_order(&self, order: TraversalOrder) -> Iter<'_, T>;

    /// Borrowed lazy traversal in ascending order.
    fn iter(&self) -> Iter<'_, T> {
        self.iter_order(TraversalOrder::Ascending)
    }

    /// Begin a detached traversal in the given order. The cursor holds no
    /// borrow; feed it back through [`pull`](Self::pull) (or
    /// [`Cursor::next`]) to advance it.
    fn cursor(&self, order: TraversalOrder) -> Cursor;

    /// Pull the next value of a detached traversal.
    ///
    /// Returns `Ok(None)` once exhausted (and on every call after that),
    /// [`Error::ConcurrentModification`] if the tree was structurally
    /// mutated since the cursor was created, and [`Error::ForeignTree`] if
    /// the cursor belongs to a different tree.
    fn pull<'t>(&'t self, cursor: &mut Cursor) -> Result<Option<&'t T>, Error>;

    /// The root node of the debug/export view, exposing each node's
    /// displayable value and children for external renderers.
    fn root_node(&self) -> Option<NodeRef<'_, T>>;
}
