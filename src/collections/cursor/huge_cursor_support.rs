//! Support trait bridging huge array storage and cursor iteration, plus the
//! two free functions that initialise a cursor over a full array or a
//! sub-range.

use super::huge_cursor::HugeCursor;

/// Implemented by every huge array to create and describe cursors over its
/// own pages.
///
/// # Cursor Lifecycle
///
/// ```text
/// new_cursor() -> init_cursor[_range]() -> next() -> ... -> (dropped)
/// ```
///
/// The cursor returned by `new_cursor` is unpositioned; callers must run it
/// through `init_cursor` or `init_cursor_range` and then `next()` before
/// reading any of its fields.
pub trait HugeCursorSupport<'a> {
    /// The type of cursor this array provides.
    type Cursor: HugeCursor<'a>;

    /// Logical length of this array in elements; O(1).
    fn size(&self) -> usize;

    /// Creates a new, unpositioned cursor bound to this array's pages.
    fn new_cursor(&'a self) -> Self::Cursor;

    /// Capacity of the array (may exceed `size()` for a paged tail).
    fn capacity(&self) -> usize {
        self.size()
    }
}

/// Initialises `cursor` to visit the whole array, `[0, size())`.
pub fn init_cursor<'a, S>(support: &S, cursor: &mut S::Cursor)
where
    S: HugeCursorSupport<'a>,
{
    let size = support.size();
    cursor.reset();
    cursor.set_range(0, size);
}

/// Initialises `cursor` to visit `[start, end)`.
///
/// # Panics
///
/// Panics if `start` or `end` fall outside `[0, size]`, or `end < start`.
pub fn init_cursor_range<'a, S>(support: &S, cursor: &mut S::Cursor, start: usize, end: usize)
where
    S: HugeCursorSupport<'a>,
{
    let size = support.size();

    if start > size {
        panic!("start expected to be in [0 : {}] but got {}", size, start);
    }
    if end < start || end > size {
        panic!(
            "end expected to be in [{} : {}] but got {}",
            start, size, end
        );
    }

    cursor.set_range(start, end);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collections::cursor::SinglePageCursor;

    struct TestArray {
        data: Vec<i64>,
    }

    impl TestArray {
        fn new(data: Vec<i64>) -> Self {
            Self { data }
        }
    }

    impl<'a> HugeCursorSupport<'a> for TestArray {
        type Cursor = SinglePageCursor<'a, i64>;

        fn size(&self) -> usize {
            self.data.len()
        }

        fn new_cursor(&'a self) -> Self::Cursor {
            SinglePageCursor::new(&self.data)
        }
    }

    #[test]
    fn init_cursor_full() {
        let array = TestArray::new(vec![1, 2, 3, 4, 5]);
        let mut cursor = array.new_cursor();
        init_cursor(&array, &mut cursor);

        assert!(cursor.next());
        assert_eq!(cursor.offset(), 0);
        assert_eq!(cursor.limit(), 5);
    }

    #[test]
    fn init_cursor_range_basic() {
        let array = TestArray::new(vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);
        let mut cursor = array.new_cursor();
        init_cursor_range(&array, &mut cursor, 2, 7);

        assert!(cursor.next());
        assert_eq!(cursor.offset(), 2);
        assert_eq!(cursor.limit(), 7);
    }

    #[test]
    #[should_panic(expected = "start expected to be in")]
    fn init_cursor_range_invalid_start() {
        let array = TestArray::new(vec![1, 2, 3]);
        let mut cursor = array.new_cursor();
        init_cursor_range(&array, &mut cursor, 10, 11);
    }

    #[test]
    #[should_panic(expected = "end expected to be in")]
    fn init_cursor_range_invalid_end() {
        let array = TestArray::new(vec![1, 2, 3]);
        let mut cursor = array.new_cursor();
        init_cursor_range(&array, &mut cursor, 0, 10);
    }

    #[test]
    #[should_panic(expected = "end expected to be in")]
    fn init_cursor_range_end_before_start() {
        let array = TestArray::new(vec![1, 2, 3, 4, 5]);
        let mut cursor = array.new_cursor();
        init_cursor_range(&array, &mut cursor, 3, 1);
    }

    #[test]
    fn init_cursor_empty_range() {
        let array = TestArray::new(vec![1, 2, 3, 4, 5]);
        let mut cursor = array.new_cursor();
        init_cursor_range(&array, &mut cursor, 2, 2);
        assert!(!cursor.next());
    }
}
