//! Memory size estimation utilities
//!
//! Pure functions from element counts to byte counts, used by callers to
//! budget allocations before committing to them. Every estimate is
//! conservative: it never reports fewer bytes than the structure will
//! actually hold once built.

use crate::collections::paging::PageConstants;
use crate::mem::BitUtil;

/// Size of an object reference (pointer) on this platform's layout model.
pub const BYTES_OBJECT_REF: usize = 8;
/// Array/object header overhead.
pub const BYTES_ARRAY_HEADER: usize = 24;
/// Per-instance overhead for a paged container (the `Vec<Page>` handle plus
/// its bookkeeping fields).
pub const BYTES_INSTANCE_OVERHEAD: usize = 16;
/// Alignment granularity applied to every estimate.
pub const ALIGNMENT: usize = 8;

/// Memory estimation calculus (spec component 4.A).
///
/// Every function here is pure: same input, same output, no allocation.
pub struct Estimate;

impl Estimate {
    fn align8(size: usize) -> usize {
        BitUtil::align(size, ALIGNMENT)
    }

    /// `align8(header + n * bytes_per_elem)`.
    ///
    /// ```
    /// use gds_core::mem::Estimate;
    /// assert_eq!(Estimate::size_of_primitive_array(0, 1), 24);
    /// assert_eq!(Estimate::size_of_primitive_array(100, 4), 424);
    /// assert_eq!(Estimate::size_of_primitive_array(100, 8), 824);
    /// ```
    pub fn size_of_primitive_array(n: usize, bytes_per_elem: usize) -> usize {
        Self::align8(BYTES_ARRAY_HEADER + n * bytes_per_elem)
    }

    /// `align8(header + n * 8)`.
    pub fn size_of_reference_array(n: usize) -> usize {
        Self::size_of_primitive_array(n, BYTES_OBJECT_REF)
    }

    /// Size of a huge paged array holding `n` elements of `bytes_per_elem`
    /// bytes each, laid out as `pages_for(n)` pages of `PAGE_SIZE` elements
    /// (the last one a possibly-shorter tail), plus the `Vec<Page>` handle
    /// itself and per-instance bookkeeping.
    ///
    /// ```
    /// use gds_core::mem::Estimate;
    /// use gds_core::collections::paging::PageConstants;
    ///
    /// let n = PageConstants::PAGE_SIZE * 3 + 10;
    /// let estimated = Estimate::size_of_paged(n, 8);
    /// assert!(estimated > 0);
    /// ```
    pub fn size_of_paged(n: usize, bytes_per_elem: usize) -> usize {
        let pages = PageConstants::pages_for(n);
        if pages == 0 {
            return BYTES_INSTANCE_OVERHEAD + Self::size_of_reference_array(0);
        }
        let tail = PageConstants::tail_len(n);
        BYTES_INSTANCE_OVERHEAD
            + Self::size_of_reference_array(pages)
            + (pages - 1) * Self::size_of_primitive_array(PageConstants::PAGE_SIZE, bytes_per_elem)
            + Self::size_of_primitive_array(tail, bytes_per_elem)
    }

    /// Size of a bitset storage of `n_bits` bits, backed by 64-bit words.
    pub fn size_of_bitset(n_bits: usize) -> usize {
        let words = n_bits.div_ceil(64);
        Self::size_of_primitive_array(words, 8) + BYTES_INSTANCE_OVERHEAD
    }

    /// Size of an open-addressed hash container (two backing primitive
    /// arrays of `bytes_per_key`/`bytes_per_value` sized slots) holding `n`
    /// entries at a 0.75 load factor, plus instance overhead.
    pub fn size_of_hash_container(n: usize, bytes_per_key: usize, bytes_per_value: usize) -> usize {
        let raw_capacity = (n as f64 / 0.75).ceil() as usize;
        let capacity = usize::max(2, BitUtil::next_highest_power_of_two(raw_capacity.max(1)));
        BYTES_INSTANCE_OVERHEAD
            + Self::size_of_primitive_array(capacity, bytes_per_key)
            + Self::size_of_primitive_array(capacity, bytes_per_value)
    }
}

/// A whole-build memory budget for a node-labelled, adjacency-compressed
/// graph, composed from the primitives above the way a caller actually
/// plans a build: how many nodes, how many `f64`-valued node properties per
/// node, and a rough bytes-per-node adjacency allowance (degrees vary, so
/// this is necessarily an assumption rather than a measurement).
///
/// This is additive tooling on top of the calculus, not a new primitive: it
/// just adds up `size_of_paged` calls for each component a build needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphBuildEstimate {
    /// Bytes for the node count's offsets array (one `i64` per node).
    pub offsets_bytes: usize,
    /// Bytes for the node count's degrees array (one `i32` per node).
    pub degrees_bytes: usize,
    /// Bytes for all `f64` node property arrays combined.
    pub node_properties_bytes: usize,
    /// Bytes assumed for the adjacency list itself, at the caller-supplied
    /// bytes-per-node allowance.
    pub adjacency_bytes: usize,
}

impl GraphBuildEstimate {
    /// Composes a [`GraphBuildEstimate`] for `node_count` nodes, each
    /// carrying `property_count` `f64` properties, assuming
    /// `bytes_per_node_adjacency` bytes of compressed adjacency per node.
    pub fn compute(
        node_count: usize,
        property_count: usize,
        bytes_per_node_adjacency: usize,
    ) -> Self {
        let offsets_bytes = Estimate::size_of_paged(node_count, 8);
        let degrees_bytes = Estimate::size_of_paged(node_count, 4);
        let node_properties_bytes =
            property_count * Estimate::size_of_paged(node_count, 8);
        let adjacency_bytes = Estimate::size_of_paged(
            node_count.saturating_mul(bytes_per_node_adjacency),
            1,
        );
        Self {
            offsets_bytes,
            degrees_bytes,
            node_properties_bytes,
            adjacency_bytes,
        }
    }

    /// Total bytes across every component.
    pub fn total_bytes(&self) -> usize {
        self.offsets_bytes
            + self.degrees_bytes
            + self.node_properties_bytes
            + self.adjacency_bytes
    }
}
