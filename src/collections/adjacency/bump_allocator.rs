//! Bump-allocated adjacency builder (spec component 4.F).
//!
//! Grounded on the donor's `PagedDataStructure`/`HugeLongArrayBuilder`
//! growth machinery (`gds/src/core/utils/paged/paged_data_structure.rs`,
//! `huge_long_array_builder.rs`): a shared, growable page store behind a
//! `std::sync::Mutex`, with a cache-line-padded atomic counter handing out
//! fresh page indices. Unlike those donor types, which grow a *fixed*
//! element array on demand, this builder hands each caller its own
//! variable-length run and only publishes a page once the caller that owns
//! it is done writing — the single-writer-per-page discipline the spec
//! requires for per-thread allocators.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use super::reorder;
use crate::collections::huge_array::{HugeIntArray, HugeLongArray};
use crate::collections::paging::PageConstants;
use crate::concurrency::use_reordered_adjacency_list;
use crate::errors::CoreError;
use crate::util::log::Log;

/// Cache-line-padded atomic counter, grounded on the donor's
/// `PaddedAtomicUsize` (`paged_data_structure.rs`): prevents false sharing
/// between the page-index counter and whatever else lives on the same
/// cache line when many allocator threads contend on it.
#[repr(align(64))]
struct PaddedAtomicUsize {
    value: AtomicUsize,
}

impl PaddedAtomicUsize {
    fn new(initial: usize) -> Self {
        Self {
            value: AtomicUsize::new(initial),
        }
    }

    fn fetch_add_one(&self) -> usize {
        self.value.fetch_add(1, Ordering::AcqRel)
    }
}

/// Heap shared by every allocator pulled from one [`AdjacencyListBuilder`].
/// Pages are reserved by index (an atomic fetch-add) and published once
/// filled; a slot that is reserved but not yet published is `None`.
struct SharedHeap<T> {
    next_page_index: PaddedAtomicUsize,
    pages: Mutex<Vec<Option<Vec<T>>>>,
}

impl<T> SharedHeap<T> {
    fn new() -> Self {
        Self {
            next_page_index: PaddedAtomicUsize::new(0),
            pages: Mutex::new(Vec::new()),
        }
    }

    fn reserve_page_index(&self) -> usize {
        self.next_page_index.fetch_add_one()
    }

    fn publish_page(&self, index: usize, page: Vec<T>) {
        let mut pages = self.pages.lock().unwrap();
        if pages.len() <= index {
            pages.resize_with(index + 1, || None);
        }
        pages[index] = Some(page);
    }
}

impl<T: Copy> SharedHeap<T> {
    fn write_at(&self, page_index: usize, in_page: usize, src: &[T]) {
        let mut pages = self.pages.lock().unwrap();
        let page = pages
            .get_mut(page_index)
            .and_then(|p| p.as_mut())
            .unwrap_or_else(|| panic!("positional write at non-existent page {}", page_index));
        assert!(
            in_page + src.len() <= page.len(),
            "write of {} elements at in-page offset {} crosses page end (page len {})",
            src.len(),
            in_page,
            page.len()
        );
        page[in_page..in_page + src.len()].copy_from_slice(src);
    }
}

impl<T: Default> SharedHeap<T> {
    /// Consumes the heap, returning its pages in index order. Any reserved
    /// but never-published slot becomes an empty page — it would mean some
    /// allocator reserved a page index and was dropped without writing
    /// anything to it, which is harmless (the page simply holds no data)
    /// but never expected in a well-formed build.
    fn into_sealed_pages(self) -> Vec<Vec<T>> {
        self.pages
            .into_inner()
            .unwrap()
            .into_iter()
            .map(|p| p.unwrap_or_default())
            .collect()
    }
}

/// Single-writer, per-thread allocator handed out by
/// [`AdjacencyListBuilder::new_allocator`]. Bumps a local write cursor
/// through its own current page; when a reservation doesn't fit, the old
/// page (its unused tail wasted) is published and a fresh one reserved.
pub struct Allocator<T> {
    heap: Arc<SharedHeap<T>>,
    current_page: Vec<T>,
    current_page_index: usize,
    top: usize,
    has_page: bool,
}

impl<T: Copy + Default> Allocator<T> {
    fn new(heap: Arc<SharedHeap<T>>) -> Self {
        Self {
            heap,
            current_page: Vec::new(),
            current_page_index: 0,
            top: 0,
            has_page: false,
        }
    }

    fn flush_current_page(&mut self) {
        if self.has_page {
            let page = std::mem::take(&mut self.current_page);
            self.heap.publish_page(self.current_page_index, page);
            self.has_page = false;
        }
    }

    fn start_new_page(&mut self) {
        self.flush_current_page();
        self.current_page_index = self.heap.reserve_page_index();
        self.current_page = vec![T::default(); PageConstants::PAGE_SIZE];
        self.top = 0;
        self.has_page = true;
    }

    /// Reserves `len` elements of page storage, starting a fresh page if
    /// the current one lacks room (wasting its unused tail), and returns
    /// the absolute address together with a mutable view of the reserved
    /// region for the caller to fill. This is the idiomatic-Rust shape of
    /// the spec's `allocate(len, slice_out) -> addr`: rather than an
    /// out-parameter, the reserved region is handed back as part of the
    /// return value, borrowed from the allocator for the caller to write
    /// into directly.
    ///
    /// # Panics
    ///
    /// Panics if `len` exceeds `PageConstants::PAGE_SIZE`: no single
    /// allocation may span more than one page.
    pub fn allocate(&mut self, len: usize) -> (u64, &mut [T]) {
        assert!(
            len <= PageConstants::PAGE_SIZE,
            "allocation of {} elements exceeds page size {}",
            len,
            PageConstants::PAGE_SIZE
        );
        if !self.has_page || self.top + len > self.current_page.len() {
            self.start_new_page();
        }
        let offset = self.top;
        self.top += len;
        let addr = ((self.current_page_index as u64) << PageConstants::PAGE_SHIFT) | offset as u64;
        (addr, &mut self.current_page[offset..offset + len])
    }

    /// Releases this allocator, publishing its final (possibly partial)
    /// page. Equivalent to dropping it; spelled out as a method because
    /// the spec names it explicitly.
    pub fn close(self) {}
}

impl<T: Copy + Default> Drop for Allocator<T> {
    fn drop(&mut self) {
        self.flush_current_page();
    }
}

/// Read-modify-write allocator handed out by
/// [`AdjacencyListBuilder::new_positional_allocator`] for rewriting bytes
/// at an address a prior `allocate` call returned.
///
/// Holds a clone of the builder's `Arc<SharedHeap<T>>`, so like
/// [`Allocator`] it must be closed (or simply dropped) before
/// `AdjacencyListBuilder::build` can reclaim the heap — `build` unwraps the
/// `Arc` and fails with [`CoreError::AllocatorsStillOpen`] while any
/// positional allocator is still alive.
pub struct PositionalAllocator<T> {
    heap: Arc<SharedHeap<T>>,
}

impl<T: Copy> PositionalAllocator<T> {
    /// Writes `src` at `addr`, which must have been returned by some
    /// `Allocator::allocate` call against the same builder.
    ///
    /// # Panics
    ///
    /// Panics if `addr` decodes to a page that doesn't exist yet, or if
    /// the write would cross the end of that page.
    pub fn write_at(&self, addr: u64, src: &[T]) {
        let page_index = (addr >> PageConstants::PAGE_SHIFT) as usize;
        let in_page = (addr & PageConstants::PAGE_MASK as u64) as usize;
        self.heap.write_at(page_index, in_page, src);
    }

    /// Releases this allocator's handle on the shared heap. Equivalent to
    /// dropping it; spelled out, like `Allocator::close`, so callers have
    /// an explicit name for "I'm done writing" before sealing the builder.
    pub fn close(self) {}
}

/// The sealed output of a build: pages of packed adjacency data plus the
/// `offsets`/`degrees` side tables (spec §3, "Adjacency build artifact").
pub struct AdjacencyList<T> {
    pages: Vec<Vec<T>>,
    offsets: HugeLongArray,
    degrees: HugeIntArray,
}

impl<T> AdjacencyList<T> {
    /// The sealed pages, in final (possibly reordered) physical order.
    pub fn pages(&self) -> &[Vec<T>] {
        &self.pages
    }

    /// `offsets[nodeId]` = absolute address of node `nodeId`'s adjacency
    /// run, or 0 if its degree is 0.
    pub fn offsets(&self) -> &HugeLongArray {
        &self.offsets
    }

    /// `degrees[nodeId]` = number of neighbours of node `nodeId`.
    pub fn degrees(&self) -> &HugeIntArray {
        &self.degrees
    }

    /// Decodes an absolute address into `(page_index, in_page)`.
    pub fn decode_address(addr: i64) -> (usize, usize) {
        let addr = addr as u64;
        (
            (addr >> PageConstants::PAGE_SHIFT) as usize,
            (addr & PageConstants::PAGE_MASK as u64) as usize,
        )
    }
}

/// Bump-allocated builder of one [`AdjacencyList`] (spec component 4.F).
/// Parameterised by the page element type (`u8` for a byte/compressed
/// heap, `i64` for an uncompressed long heap).
pub struct AdjacencyListBuilder<T> {
    heap: Arc<SharedHeap<T>>,
}

impl<T> Default for AdjacencyListBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> AdjacencyListBuilder<T> {
    /// Starts a fresh, empty builder.
    pub fn new() -> Self {
        Self {
            heap: Arc::new(SharedHeap::new()),
        }
    }
}

impl<T: Copy + Default> AdjacencyListBuilder<T> {
    /// Creates a new single-writer allocator against this builder's heap.
    /// Intended to be called once per worker thread.
    pub fn new_allocator(&self) -> Allocator<T> {
        Allocator::new(Arc::clone(&self.heap))
    }

    /// Creates a positional allocator for rewriting previously-allocated
    /// addresses.
    pub fn new_positional_allocator(&self) -> PositionalAllocator<T> {
        PositionalAllocator {
            heap: Arc::clone(&self.heap),
        }
    }

    /// Seals the heap into an [`AdjacencyList`]. Consumes the builder, so
    /// the borrow checker rules out the "double build" lifecycle
    /// violation at compile time rather than at runtime.
    ///
    /// If `allow_reordering` and the [`USE_REORDERED_ADJACENCY_LIST`]
    /// toggle are both set and at least one page was built, the
    /// page-reordering optimizer (spec §4.G) runs first, mutating
    /// `offsets` in place.
    ///
    /// [`USE_REORDERED_ADJACENCY_LIST`]: crate::concurrency::use_reordered_adjacency_list
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::AllocatorsStillOpen`] if any `Allocator` or
    /// `PositionalAllocator` handed out by this builder is still alive —
    /// every allocator must be dropped (or explicitly `close()`d) before
    /// its pages can be sealed.
    pub fn build(
        self,
        degrees: HugeIntArray,
        mut offsets: HugeLongArray,
        allow_reordering: bool,
    ) -> Result<AdjacencyList<T>, CoreError> {
        self.build_with_log(degrees, offsets_take(&mut offsets), allow_reordering, None)
    }

    /// As [`Self::build`], additionally reporting the reordering pass (if
    /// it runs) to `log`.
    pub fn build_with_log(
        self,
        degrees: HugeIntArray,
        mut offsets: HugeLongArray,
        allow_reordering: bool,
        log: Option<&dyn Log>,
    ) -> Result<AdjacencyList<T>, CoreError> {
        let heap = Arc::try_unwrap(self.heap).map_err(|_| CoreError::AllocatorsStillOpen)?;
        let mut pages = heap.into_sealed_pages();

        if allow_reordering && use_reordered_adjacency_list() && !pages.is_empty() {
            reorder::reorder_pages(&mut pages, &mut offsets, &degrees);
            if let Some(log) = log {
                log.info(&format!("reordered {} pages", pages.len()));
            }
        }

        Ok(AdjacencyList {
            pages,
            offsets,
            degrees,
        })
    }
}

/// Identity helper so `build`'s signature can take `offsets` by value while
/// still naming it once (keeps the public `build` and `build_with_log`
/// signatures symmetric without duplicating the body).
fn offsets_take(offsets: &mut HugeLongArray) -> HugeLongArray {
    std::mem::replace(offsets, HugeLongArray::new(0))
}
