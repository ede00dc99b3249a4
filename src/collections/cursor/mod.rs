//! Cursor protocol: forward-only page iteration over a huge array, and the
//! lock-free draining variant used to hand pages out to worker threads.

mod draining;
mod huge_cursor;
mod huge_cursor_support;

pub use draining::{DrainingBatch, DrainingIterator};
pub use huge_cursor::{HugeCursor, PagedCursor, SinglePageCursor};
pub use huge_cursor_support::{init_cursor, init_cursor_range, HugeCursorSupport};
