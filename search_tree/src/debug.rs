/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! Tree introspection for debugging and external renderers.
//!
//! [`NodeRef`] is a read-only view of one node: its value, a short label
//! describing the balancing metadata (color, height, or priority), and its
//! children. External tooling can walk the structure through it without the
//! crate exposing arena indices or metadata types, and [`NodeRef::dump`]
//! renders a whole subtree as indented text.

use std::fmt;

use crate::arena::NodeIndex;
use crate::node::Side;
use crate::traverse::TreeView;

/// A read-only view of one tree node.
pub struct NodeRef<'a, T> {
    view: &'a (dyn TreeView<Value = T> + 'a),
    idx: NodeIndex,
}

impl<'a, T> NodeRef<'a, T> {
    pub(crate) fn root_of(view: &'a (dyn TreeView<Value = T> + 'a)) -> Option<Self> {
        view.root().map(|idx| Self { view, idx })
    }

    fn at(&self, idx: Option<NodeIndex>) -> Option<Self> {
        idx.map(|idx| Self {
            view: self.view,
            idx,
        })
    }

    /// The value stored at this node.
    pub fn value(&self) -> &'a T {
        self.view.value(self.idx)
    }

    /// Short textual form of the node's balancing metadata, e.g. `red`,
    /// `h=3`, or `p=42`.
    pub fn label(&self) -> String {
        self.view.meta_label(self.idx)
    }

    /// The root of the left subtree (all values compare less).
    pub fn left(&self) -> Option<Self> {
        self.at(self.view.left(self.idx))
    }

    /// The root of the right subtree (all values compare greater).
    pub fn right(&self) -> Option<Self> {
        self.at(self.view.right(self.idx))
    }
}

impl<'a, T: fmt::Display> NodeRef<'a, T> {
    /// Render the subtree below this node as indented text, one node per
    /// line, children tagged with their side:
    ///
    /// ```text
    /// 13 [black]
    ///   L: 8 [red]
    ///   R: 17 [red]
    /// ```
    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.write_into(&mut out, 0, None)
            .expect("writing to a String cannot fail");
        out
    }

    fn write_into(&self, out: &mut String, depth: usize, side: Option<Side>) -> fmt::Result {
        use fmt::Write;

        for _ in 0..depth {
            out.push_str("  ");
        }
        match side {
            Some(Side::Left) => out.push_str("L: "),
            Some(Side::Right) => out.push_str("R: "),
            None => {}
        }
        writeln!(out, "{} [{}]", self.value(), self.label())?;
        if let Some(left) = self.left() {
            left.write_into(out, depth + 1, Some(Side::Left))?;
        }
        if let Some(right) = self.right() {
            right.write_into(out, depth + 1, Some(Side::Right))?;
        }
        Ok(())
    }
}

impl<'a, T> Clone for NodeRef<'a, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T> Copy for NodeRef<'a, T> {}

impl<'a, T: fmt::Debug> fmt::Debug for NodeRef<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("value", self.value())
            .field("label", &self.label())
            .field("left", &self.left().map(|n| n.value()))
            .field("right", &self.right().map(|n| n.value()))
            .finish()
    }
}
