//! Recoverable error taxonomy (spec §7).
//!
//! Bounds, lifecycle, and type-domain violations are programmer errors and
//! panic (`get`/`set`/`add_to`/... on an out-of-range index, use of a
//! released array). The two failure modes a caller can legitimately hit at
//! runtime without a bug of their own — asking for a contiguous view larger
//! than this process can address, or building a config that doesn't satisfy
//! its own invariants — are `Result`s instead.

use thiserror::Error;

/// Errors returned by the handful of operations that can fail without it
/// being a caller bug.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// `to_flat` was asked to materialise more elements than
    /// `PageConstants::MAX_CONTIGUOUS_LEN` allows into one contiguous
    /// buffer.
    #[error("cannot flatten {size} elements into one contiguous buffer (limit {limit})")]
    ContiguousLimitExceeded {
        /// Requested element count.
        size: usize,
        /// The ceiling that was exceeded.
        limit: usize,
    },

    /// A configuration value failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// `AdjacencyListBuilder::build` was called while an `Allocator` or
    /// `PositionalAllocator` borrowed from it was still alive, so the
    /// shared heap could not be reclaimed.
    #[error("cannot build: one or more allocators are still open")]
    AllocatorsStillOpen,
}
