/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! Incremental tree traversal.
//!
//! One frame machine drives all five traversal orders without recursion.
//! The four depth orders share an explicit stack of `(node, step)` frames:
//! each order is a permutation of three actions (descend left, emit the
//! node, descend right), and the `step` counter records how far through
//! that permutation a frame has progressed. Level order uses an explicit
//! FIFO queue instead. Auxiliary memory is therefore O(tree height) for
//! depth orders and O(level width) for level order, never O(n).
//!
//! Two front ends sit on top of the machine:
//!
//! - [`Iter`] borrows the tree and implements [`Iterator`]. While it lives,
//!   the borrow checker rules out mutation, so it needs no revalidation.
//! - [`Cursor`] is detached: it holds no borrow, so the owner may mutate
//!   the tree between pulls. Every pull revalidates the tree's mutation
//!   epoch against the epoch captured at creation and fails with
//!   [`Error::ConcurrentModification`] after any structural change.

use std::collections::VecDeque;

use crate::arena::NodeIndex;
use crate::error::Error;
use crate::unique_id::TreeId;

/// The order in which a traversal visits tree nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraversalOrder {
    /// In-order: left subtree, node, right subtree. Yields sorted values.
    Ascending,
    /// Reverse in-order: right subtree, node, left subtree.
    Descending,
    /// Node, left subtree, right subtree.
    PreOrder,
    /// Left subtree, right subtree, node.
    PostOrder,
    /// Breadth-first, left-to-right within each level.
    LevelOrder,
}

/// Read access the traversal engine needs from a tree: the root, child
/// links, values, and the staleness-check bookkeeping. Implemented by the
/// shared tree core for every discipline.
pub(crate) trait TreeView {
    type Value;

    fn root(&self) -> Option<NodeIndex>;
    fn left(&self, idx: NodeIndex) -> Option<NodeIndex>;
    fn right(&self, idx: NodeIndex) -> Option<NodeIndex>;
    fn value(&self, idx: NodeIndex) -> &Self::Value;
    /// Textual form of the node's balancing metadata, for debug labels.
    fn meta_label(&self, idx: NodeIndex) -> String;
    fn epoch(&self) -> u64;
    fn id(&self) -> TreeId;
}

/// One step of a depth traversal.
#[derive(Debug, Clone, Copy)]
enum Action {
    DescendLeft,
    Emit,
    DescendRight,
}

impl TraversalOrder {
    /// The action permutation that realizes this depth order.
    fn depth_actions(self) -> [Action; 3] {
        use Action::*;
        match self {
            TraversalOrder::Ascending => [DescendLeft, Emit, DescendRight],
            TraversalOrder::Descending => [DescendRight, Emit, DescendLeft],
            TraversalOrder::PreOrder => [Emit, DescendLeft, DescendRight],
            TraversalOrder::PostOrder => [DescendLeft, DescendRight, Emit],
            TraversalOrder::LevelOrder => {
                unreachable!("level order does not use the depth machine")
            }
        }
    }
}

/// A pending node in a depth traversal, tagged with how far through the
/// order's action permutation it has progressed.
#[derive(Debug, Clone, Copy)]
struct Frame {
    node: NodeIndex,
    step: u8,
}

/// The suspended state of one in-flight traversal.
#[derive(Debug, Clone)]
pub(crate) enum FrameState {
    /// Explicit stack for the four depth orders.
    Depth {
        order: TraversalOrder,
        stack: Vec<Frame>,
    },
    /// Explicit FIFO queue for level order.
    Level { queue: VecDeque<NodeIndex> },
}

impl FrameState {
    pub(crate) fn new(order: TraversalOrder, root: Option<NodeIndex>) -> Self {
        match order {
            TraversalOrder::LevelOrder => {
                let mut queue = VecDeque::new();
                if let Some(root) = root {
                    queue.push_back(root);
                }
                FrameState::Level { queue }
            }
            _ => {
                let mut stack = Vec::new();
                if let Some(root) = root {
                    stack.push(Frame {
                        node: root,
                        step: 0,
                    });
                }
                FrameState::Depth { order, stack }
            }
        }
    }

    /// Advance to the next node in the order, doing only the work needed to
    /// reach it. Returns `None` once the traversal is exhausted, and keeps
    /// returning `None` on every later call.
    fn step<T>(&mut self, view: &(dyn TreeView<Value = T> + '_)) -> Option<NodeIndex> {
        match self {
            FrameState::Depth { order, stack } => {
                let actions = order.depth_actions();
                loop {
                    let frame = stack.last_mut()?;
                    if frame.step >= 3 {
                        stack.pop();
                        continue;
                    }
                    let node = frame.node;
                    let action = actions[frame.step as usize];
                    frame.step += 1;
                    match action {
                        Action::Emit => return Some(node),
                        Action::DescendLeft => {
                            if let Some(left) = view.left(node) {
                                stack.push(Frame {
                                    node: left,
                                    step: 0,
                                });
                            }
                        }
                        Action::DescendRight => {
                            if let Some(right) = view.right(node) {
                                stack.push(Frame {
                                    node: right,
                                    step: 0,
                                });
                            }
                        }
                    }
                }
            }
            FrameState::Level { queue } => {
                let node = queue.pop_front()?;
                if let Some(left) = view.left(node) {
                    queue.push_back(left);
                }
                if let Some(right) = view.right(node) {
                    queue.push_back(right);
                }
                Some(node)
            }
        }
    }
}

/// A borrowed lazy traversal implementing [`Iterator`].
///
/// Because this holds a shared borrow of the tree, the tree cannot be
/// mutated while the iterator is alive; use a [`Cursor`] to interleave
/// traversal with other code that needs the tree.
pub struct Iter<'a, T> {
    view: &'a (dyn TreeView<Value = T> + 'a),
    frames: FrameState,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(view: &'a (dyn TreeView<Value = T> + 'a), order: TraversalOrder) -> Self {
        Self {
            frames: FrameState::new(order, view.root()),
            view,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let view = self.view;
        let idx = self.frames.step(view)?;
        Some(view.value(idx))
    }
}

/// The resumable state of one in-progress traversal, detached from the
/// tree it was created from.
///
/// A cursor holds no borrow, so the owner is free to mutate the tree
/// between pulls. In exchange, every pull revalidates the
/// tree: a structural mutation after creation makes the very next pull (and
/// every one after it) fail with [`Error::ConcurrentModification`]. This is
/// an optimistic check against a mutation-epoch counter, not a lock.
///
/// A fresh cursor must be created to traverse again; an exhausted cursor
/// keeps returning `Ok(None)`.
#[derive(Debug, Clone)]
pub struct Cursor {
    tree_id: TreeId,
    epoch: u64,
    frames: FrameState,
    poisoned: Option<Error>,
}

impl Cursor {
    pub(crate) fn new<T>(view: &(dyn TreeView<Value = T> + '_), order: TraversalOrder) -> Self {
        Self {
            tree_id: view.id(),
            epoch: view.epoch(),
            frames: FrameState::new(order, view.root()),
            poisoned: None,
        }
    }

    /// Pull the next value out of `tree`.
    ///
    /// Sugar for [`SearchTree::pull`](crate::SearchTree::pull); see there
    /// for the error contract.
    pub fn next<'t, T, S>(&mut self, tree: &'t S) -> Result<Option<&'t T>, Error>
    where
        T: Ord,
        S: crate::SearchTree<T>,
    {
        tree.pull(self)
    }
}

/// Shared implementation behind [`SearchTree::pull`](crate::SearchTree::pull).
pub(crate) fn pull<'t, T>(
    view: &'t (dyn TreeView<Value = T> + 't),
    cursor: &mut Cursor,
) -> Result<Option<&'t T>, Error> {
    if cursor.tree_id != view.id() {
        // Not poisoning: the cursor may still be valid on its own tree.
        return Err(Error::ForeignTree);
    }
    if let Some(err) = &cursor.poisoned {
        return Err(err.clone());
    }
    if cursor.epoch != view.epoch() {
        let err = Error::ConcurrentModification {
            cursor_epoch: cursor.epoch,
            tree_epoch: view.epoch(),
        };
        cursor.poisoned = Some(err.clone());
        return Err(err);
    }
    Ok(cursor.frames.step(view).map(|idx| view.value(idx)))
}
