/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! Node model shared by the three balancing disciplines.
//!
//! Every discipline uses the same node shape: a value, child and parent
//! links into the arena, and one piece of per-discipline metadata (a color
//! bit for red-black, a subtree height for AVL, a priority for treaps). The
//! parent link is a plain index (non-owning) and exists only so that fixup
//! walks after insert/delete can move toward the root without recursion.

use crate::arena::NodeIndex;

/// Which child slot of a node, used to write the left/right-symmetric
/// rotation and fixup cases once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Side {
    Left,
    Right,
}

impl Side {
    pub(crate) const fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// A tree node stored in the arena.
#[derive(Debug, Clone)]
pub(crate) struct Node<T, M> {
    /// The contained value; the tree is ordered by `Ord` on this field.
    pub value: T,
    /// Left child (all values compare less).
    pub left: Option<NodeIndex>,
    /// Right child (all values compare greater).
    pub right: Option<NodeIndex>,
    /// Parent link; `None` for the root.
    pub parent: Option<NodeIndex>,
    /// Discipline-specific balancing metadata.
    pub meta: M,
}

impl<T, M> Node<T, M> {
    /// Create a detached node (no links).
    pub(crate) fn new(value: T, meta: M) -> Self {
        Self {
            value,
            left: None,
            right: None,
            parent: None,
            meta,
        }
    }

    pub(crate) fn child(&self, side: Side) -> Option<NodeIndex> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub(crate) fn set_child(&mut self, side: Side, child: Option<NodeIndex>) {
        match side {
            Side::Left => self.left = child,
            Side::Right => self.right = child,
        }
    }
}

/// Balancing metadata carried by each node, one implementation per
/// discipline. `label` feeds the debug/export hook.
pub(crate) trait Metadata: std::fmt::Debug {
    /// Short textual form of the metadata for node labels.
    fn label(&self) -> String;
}

/// Red-black node color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Color {
    Red,
    Black,
}

impl Metadata for Color {
    fn label(&self) -> String {
        match self {
            Color::Red => "red".to_owned(),
            Color::Black => "black".to_owned(),
        }
    }
}

/// AVL subtree height. A leaf has height 1; an absent child reads as 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Height(pub u32);

impl Metadata for Height {
    fn label(&self) -> String {
        format!("h={}", self.0)
    }
}

/// Treap heap priority. Higher priorities sit closer to the root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct Priority(pub u64);

impl Metadata for Priority {
    fn label(&self) -> String {
        format!("p={}", self.0)
    }
}
