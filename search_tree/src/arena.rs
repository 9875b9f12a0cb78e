/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! Arena storage for search tree nodes.
//!
//! All nodes of a tree live in one slab, and child/parent links are slab
//! keys instead of boxed pointers. This gives better cache locality and
//! makes rotations cheap link rewrites (no node ever moves in memory while
//! it is linked into the tree).

use std::ops::{Index, IndexMut};

use slab::Slab;

use crate::node::Node;

/// Index into the node arena.
///
/// A lightweight handle that is stable across mutations to other slots in
/// the slab. Only ever dereferenced through the arena that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub(crate) struct NodeIndex(usize);

impl NodeIndex {
    /// Return the underlying key for indexing into the slab.
    pub(crate) const fn key(self) -> usize {
        self.0
    }
}

impl From<usize> for NodeIndex {
    fn from(key: usize) -> Self {
        Self(key)
    }
}

/// Arena storage for [`Node`]s.
///
/// A newtype wrapper around [`Slab`] that provides type-safe indexing via
/// [`NodeIndex`] instead of raw `usize` keys.
#[derive(Debug, Clone)]
pub(crate) struct NodeArena<T, M> {
    nodes: Slab<Node<T, M>>,
}

impl<T, M> NodeArena<T, M> {
    /// Create a new empty arena.
    pub(crate) fn new() -> Self {
        Self { nodes: Slab::new() }
    }

    /// Number of nodes currently stored in the arena.
    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Insert a node into the arena, returning its index.
    pub(crate) fn insert(&mut self, node: Node<T, M>) -> NodeIndex {
        NodeIndex(self.nodes.insert(node))
    }

    /// Remove a node from the arena, returning it.
    ///
    /// # Panics
    ///
    /// Panics if the index is invalid.
    pub(crate) fn remove(&mut self, idx: NodeIndex) -> Node<T, M> {
        self.nodes.remove(idx.key())
    }

    /// Mutable access to two distinct nodes at once.
    ///
    /// # Panics
    ///
    /// Panics if the indices are equal or either is invalid.
    pub(crate) fn get2_mut(
        &mut self,
        a: NodeIndex,
        b: NodeIndex,
    ) -> (&mut Node<T, M>, &mut Node<T, M>) {
        self.nodes
            .get2_mut(a.key(), b.key())
            .expect("both node indices must be live and distinct")
    }

    /// Drop every node in the arena.
    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
    }

    /// Iterate over all nodes in the arena.
    ///
    /// Yields `(NodeIndex, &Node)` pairs in slab order, which is unrelated
    /// to the tree order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = (NodeIndex, &Node<T, M>)> {
        self.nodes.iter().map(|(key, node)| (NodeIndex(key), node))
    }
}

impl<T, M> Default for NodeArena<T, M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, M> Index<NodeIndex> for NodeArena<T, M> {
    type Output = Node<T, M>;

    fn index(&self, idx: NodeIndex) -> &Self::Output {
        &self.nodes[idx.key()]
    }
}

impl<T, M> IndexMut<NodeIndex> for NodeArena<T, M> {
    fn index_mut(&mut self, idx: NodeIndex) -> &mut Self::Output {
        &mut self.nodes[idx.key()]
    }
}
