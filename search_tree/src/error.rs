/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! Error types for traversal cursors.
//!
//! Negative lookup results (`find`/`remove` on an absent value, `min`/`max`
//! on an empty tree) are `Option`s, not errors. The only fallible surface
//! is the detached cursor, which revalidates the source tree on every pull.

use thiserror::Error;

/// A cursor pull failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The source tree was structurally modified after the cursor was
    /// created. The cursor is permanently poisoned; every further pull
    /// keeps returning this error.
    #[error(
        "tree mutated while a traversal was in progress \
         (cursor epoch {cursor_epoch}, tree epoch {tree_epoch})"
    )]
    ConcurrentModification {
        /// Mutation epoch captured when the cursor was created.
        cursor_epoch: u64,
        /// The tree's mutation epoch at the failed pull.
        tree_epoch: u64,
    },

    /// The cursor was pulled against a tree other than the one it was
    /// created from. The cursor itself stays usable on its own tree.
    #[error("cursor was created from a different tree")]
    ForeignTree,
}
