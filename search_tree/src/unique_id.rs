/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! Unique identifier for tree instances.

use std::sync::atomic::{AtomicU64, Ordering};

/// Global counter for unique tree IDs.
static UNIQUE_ID_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Unique identifier for a tree instance.
///
/// Generated from a global atomic counter; two distinct trees (including a
/// tree and its clone) are guaranteed to have different IDs. A detached
/// traversal cursor records the ID of the tree it was created from so that
/// pulling it against a different tree is detected instead of silently
/// yielding nonsense.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub(crate) struct TreeId(u64);

impl TreeId {
    /// Allocate the next unique ID from the global counter.
    pub(crate) fn next() -> Self {
        Self(UNIQUE_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

