//! Lock-free draining iteration across worker threads (spec component 4.D,
//! draining iterator).
//!
//! Unlike [`super::huge_cursor`], which borrows pages for read-only
//! traversal, a draining iterator *consumes* a page vector: each page
//! transitions from present to taken exactly once, and the taking caller
//! receives ownership of it. This is the concurrency-safe analogue of the
//! donor's page-growth lock in spirit (claim a slot, then act on it) but
//! runs in the opposite direction: pages are handed out, not allocated.

use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// One unit of work handed to a caller of [`DrainingIterator::next`]: a
/// whole page, plus the global index of its first element.
pub struct DrainingBatch<T> {
    /// The page claimed by this call, or `None` before the first
    /// successful `next()`.
    pub page: Option<T>,
    /// Global index of `page`'s first element.
    pub offset: usize,
}

impl<T> Default for DrainingBatch<T> {
    fn default() -> Self {
        Self {
            page: None,
            offset: 0,
        }
    }
}

/// Consumes a vector of pages, handing each one to exactly one caller.
///
/// # Guarantees
///
/// - Exactly-once delivery: each page index is returned to at most one
///   caller, ever.
/// - Any number of callers may call [`DrainingIterator::next`] concurrently.
/// - Once every page has been claimed, every subsequent call returns
///   `false` forever.
pub struct DrainingIterator<T> {
    slots: Vec<Mutex<Option<T>>>,
    next_index: AtomicUsize,
    page_size: usize,
}

impl<T> DrainingIterator<T> {
    /// Builds a draining iterator over `pages`, where every page but
    /// possibly the last holds `page_size` elements.
    pub fn new(pages: Vec<T>, page_size: usize) -> Self {
        let slots = pages.into_iter().map(|p| Mutex::new(Some(p))).collect();
        Self {
            slots,
            next_index: AtomicUsize::new(0),
            page_size,
        }
    }

    /// Total number of pages this iterator was built from.
    pub fn num_pages(&self) -> usize {
        self.slots.len()
    }

    /// Claims the next available page into `batch`.
    ///
    /// Returns `false` once every page has been claimed (by this caller or
    /// another); `batch` is left untouched in that case.
    pub fn next(&self, batch: &mut DrainingBatch<T>) -> bool {
        loop {
            let k = self.next_index.fetch_add(1, Ordering::AcqRel);
            if k >= self.slots.len() {
                return false;
            }

            let mut slot = self.slots[k].lock();
            if let Some(page) = slot.take() {
                drop(slot);
                batch.page = Some(page);
                batch.offset = k * self.page_size;
                return true;
            }
            // Slot already emptied by another claimant of the same index;
            // this cannot happen with a strictly-increasing counter, but
            // the retry keeps the contract honest if that ever changes.
        }
    }
}
