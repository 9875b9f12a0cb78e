/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! Ordered, self-balancing search trees with resumable traversal.
//!
//! This crate provides three balancing disciplines over one arena-backed
//! node substrate:
//!
//! - [`RedBlackTree`]: color-based balancing, worst-case O(log n)
//! - [`AvlTree`]: height-based balancing, tightest height bound
//! - [`Treap`]: randomized heap priorities, expected O(log n)
//!
//! All three implement the [`SearchTree`] contract: an ordered set of
//! unique values where adding a comparison-equal value replaces the stored
//! one in place. Traversal comes in five orders ([`TraversalOrder`]) and
//! two shapes: a borrowed [`Iter`] implementing [`Iterator`], and a
//! detached [`Cursor`] that survives across mutations of its source tree
//! and detects them on the next pull instead of yielding stale results.
//!
//! # Example
//!
//! ```
//! use search_tree::{RedBlackTree, SearchTree, TraversalOrder};
//!
//! let mut tree = RedBlackTree::new();
//! tree.add(13);
//! tree.add(8);
//! tree.add(17);
//!
//! let ascending: Vec<_> = tree.iter().copied().collect();
//! assert_eq!(ascending, [8, 13, 17]);
//!
//! // A detached cursor notices mutations made while it is suspended.
//! let mut cursor = tree.cursor(TraversalOrder::Ascending);
//! assert_eq!(tree.pull(&mut cursor), Ok(Some(&8)));
//! tree.add(21);
//! assert!(tree.pull(&mut cursor).is_err());
//! ```

mod arena;
mod debug;
mod error;
mod node;
mod traverse;
mod tree;
mod unique_id;

pub use debug::NodeRef;
pub use error::Error;
pub use traverse::{Cursor, Iter, TraversalOrder};
pub use tree::{AvlTree, RedBlackTree, SearchTree, Treap};
