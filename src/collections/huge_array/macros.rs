//! Declarative generation of the huge array family (spec component 4.C).
//!
//! A huge array is a tagged union of a single-page and a paged
//! representation behind one abstract type, chosen once at construction
//! time and never revisited (spec §9, "dynamic dispatch over variants").
//! [`huge_primitive_array_base!`] generates the universal operations shared
//! by every element kind; [`huge_numeric_ops!`], [`huge_integer_ops!`], and
//! [`huge_sorted_ops!`] layer on the operations that only make sense for
//! numeric, integer, or ordered element kinds respectively. Each concrete
//! array type (`HugeByteArray`, `HugeIntArray`, ...) picks the combination
//! that matches its element type.

/// Generates the enum/Single/Paged/Cursor scaffolding and the operations
/// every element kind supports: `new`, `from_vec`, `size`, `size_of`, `get`,
/// `set`, `fill`, `set_all`, `copy_to`, `copy_of`, `to_flat`,
/// `copy_from_slice`, `release`, `Display`, and cursor support.
#[macro_export]
macro_rules! huge_primitive_array_base {
    (
        $huge_name:ident,
        $single_name:ident,
        $paged_name:ident,
        $cursor_name:ident,
        $element_type:ty,
        $doc_desc:expr
    ) => {
        #[doc = $doc_desc]
        ///
        /// Paged once the element count exceeds
        /// `PageConstants::MAX_SINGLE_ARRAY_LEN`; otherwise a single
        /// contiguous page. Both representations answer the same contract;
        /// the choice is permanent once made.
        pub enum $huge_name {
            /// Single-page representation.
            Single($single_name),
            /// Multi-page representation.
            Paged($paged_name),
        }

        impl $huge_name {
            /// Creates a zero-initialised array of `size` elements, picking
            /// the representation from `size` alone.
            pub fn new(size: usize) -> Self {
                if size <= $crate::collections::paging::PageConstants::MAX_SINGLE_ARRAY_LEN {
                    Self::Single($single_name::new(size))
                } else {
                    Self::Paged($paged_name::new(size))
                }
            }

            /// Builds an array from an explicit sequence of values.
            pub fn from_vec(values: Vec<$element_type>) -> Self {
                let size = values.len();
                let mut array = Self::new(size);
                for (i, value) in values.into_iter().enumerate() {
                    array.set(i, value);
                }
                array
            }

            /// Value at `index`.
            ///
            /// # Panics
            ///
            /// Panics if `index >= size()` or the array has been released.
            pub fn get(&self, index: usize) -> $element_type {
                match self {
                    Self::Single(arr) => arr.get(index),
                    Self::Paged(arr) => arr.get(index),
                }
            }

            /// Stores `value` at `index`.
            ///
            /// # Panics
            ///
            /// Panics if `index >= size()` or the array has been released.
            pub fn set(&mut self, index: usize, value: $element_type) {
                match self {
                    Self::Single(arr) => arr.set(index, value),
                    Self::Paged(arr) => arr.set(index, value),
                }
            }

            /// Sets element `i` to `gen(i)` for every `i`, sequentially and
            /// exactly once per index.
            pub fn set_all<F>(&mut self, gen: F)
            where
                F: Fn(usize) -> $element_type,
            {
                match self {
                    Self::Single(arr) => arr.set_all(gen),
                    Self::Paged(arr) => arr.set_all(gen),
                }
            }

            /// Sets every element to `value`.
            pub fn fill(&mut self, value: $element_type) {
                match self {
                    Self::Single(arr) => arr.fill(value),
                    Self::Paged(arr) => arr.fill(value),
                }
            }

            /// Number of elements; O(1) and stable for the array's
            /// lifetime.
            pub fn size(&self) -> usize {
                match self {
                    Self::Single(arr) => arr.size(),
                    Self::Paged(arr) => arr.size(),
                }
            }

            /// Bytes currently held by this array's pages.
            pub fn size_of(&self) -> usize {
                match self {
                    Self::Single(arr) => arr.size_of(),
                    Self::Paged(arr) => arr.size_of(),
                }
            }

            /// Copies the first `length` elements of `self` into `dest`,
            /// zero-filling the remainder of `dest`.
            ///
            /// `length` is silently truncated to `min(self.size(),
            /// dest.size())`.
            pub fn copy_to(&self, dest: &mut $huge_name, length: usize) {
                let length = length.min(self.size()).min(dest.size());
                for i in 0..length {
                    dest.set(i, self.get(i));
                }
                for i in length..dest.size() {
                    dest.set(i, <$element_type>::default());
                }
            }

            /// Creates an independent copy resized to `new_length`: the
            /// shared prefix is copied, any new tail is zero-filled.
            pub fn copy_of(&self, new_length: usize) -> Self {
                let mut result = Self::new(new_length);
                let copy_length = usize::min(self.size(), new_length);
                self.copy_to(&mut result, copy_length);
                result
            }

            /// Materialises the whole array into one contiguous, freshly
            /// owned `Vec` (always a defensive copy, never an aliased
            /// view).
            ///
            /// # Errors
            ///
            /// Returns [`crate::errors::CoreError::ContiguousLimitExceeded`]
            /// if `size()` exceeds
            /// `PageConstants::MAX_CONTIGUOUS_LEN`.
            pub fn to_flat(&self) -> Result<Vec<$element_type>, $crate::errors::CoreError> {
                let size = self.size();
                if size > $crate::collections::paging::PageConstants::MAX_CONTIGUOUS_LEN {
                    return Err($crate::errors::CoreError::ContiguousLimitExceeded {
                        size,
                        limit: $crate::collections::paging::PageConstants::MAX_CONTIGUOUS_LEN,
                    });
                }
                let mut out = Vec::with_capacity(size);
                for i in 0..size {
                    out.push(self.get(i));
                }
                Ok(out)
            }

            /// Copies `src[slice_start..slice_end]` into `self` starting at
            /// index 0. Returns the number of elements actually copied,
            /// which is at most `slice_end - slice_start` and at most
            /// `self.size()`.
            pub fn copy_from_slice(
                &mut self,
                src: &[$element_type],
                slice_start: usize,
                slice_end: usize,
            ) -> usize {
                let slice_end = slice_end.min(src.len());
                let slice_start = slice_start.min(slice_end);
                let available = slice_end - slice_start;
                let count = available.min(self.size());
                for i in 0..count {
                    self.set(i, src[slice_start + i]);
                }
                count
            }

            /// Releases all pages, returning the bytes freed. Idempotent:
            /// returns `0` on every call after the first.
            pub fn release(&mut self) -> usize {
                match self {
                    Self::Single(arr) => arr.release(),
                    Self::Paged(arr) => arr.release(),
                }
            }
        }

        impl std::fmt::Display for $huge_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "[")?;
                for i in 0..self.size() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", self.get(i))?;
                }
                write!(f, "]")
            }
        }

        /// Single-page representation: one contiguous `Vec`, direct
        /// indexing.
        pub struct $single_name {
            data: Vec<$element_type>,
            released: bool,
        }

        impl $single_name {
            pub fn new(size: usize) -> Self {
                assert!(
                    size <= $crate::collections::paging::PageConstants::MAX_SINGLE_ARRAY_LEN,
                    "size {} exceeds MAX_SINGLE_ARRAY_LEN",
                    size
                );
                Self {
                    data: vec![<$element_type>::default(); size],
                    released: false,
                }
            }

            fn check_alive(&self) {
                assert!(!self.released, "operation on a released huge array");
            }

            pub fn get(&self, index: usize) -> $element_type {
                self.check_alive();
                assert!(
                    index < self.data.len(),
                    "index {} out of bounds for size {}",
                    index,
                    self.data.len()
                );
                self.data[index]
            }

            pub fn set(&mut self, index: usize, value: $element_type) {
                self.check_alive();
                assert!(
                    index < self.data.len(),
                    "index {} out of bounds for size {}",
                    index,
                    self.data.len()
                );
                self.data[index] = value;
            }

            pub fn set_all<F>(&mut self, gen: F)
            where
                F: Fn(usize) -> $element_type,
            {
                self.check_alive();
                for i in 0..self.data.len() {
                    self.data[i] = gen(i);
                }
            }

            pub fn fill(&mut self, value: $element_type) {
                self.check_alive();
                self.data.fill(value);
            }

            pub fn size(&self) -> usize {
                self.data.len()
            }

            pub fn size_of(&self) -> usize {
                if self.released {
                    0
                } else {
                    $crate::mem::Estimate::size_of_primitive_array(
                        self.data.len(),
                        std::mem::size_of::<$element_type>(),
                    )
                }
            }

            pub fn release(&mut self) -> usize {
                if self.released {
                    return 0;
                }
                let freed = self.size_of();
                self.data = Vec::new();
                self.released = true;
                freed
            }
        }

        impl<'a> $crate::collections::cursor::HugeCursorSupport<'a> for $single_name {
            type Cursor = $crate::collections::cursor::SinglePageCursor<'a, $element_type>;

            fn size(&self) -> usize {
                self.data.len()
            }

            fn new_cursor(&'a self) -> Self::Cursor {
                $crate::collections::cursor::SinglePageCursor::new(&self.data)
            }
        }

        /// Paged representation: a vector of fixed-size pages, all full
        /// except the last.
        pub struct $paged_name {
            pages: Vec<Vec<$element_type>>,
            size: usize,
            released: bool,
        }

        impl $paged_name {
            pub fn new(size: usize) -> Self {
                use $crate::collections::paging::PageConstants;
                let num_pages = PageConstants::pages_for(size);
                let mut pages = Vec::with_capacity(num_pages);
                for page_idx in 0..num_pages {
                    let page_len = if page_idx == num_pages - 1 {
                        PageConstants::tail_len(size)
                    } else {
                        PageConstants::PAGE_SIZE
                    };
                    pages.push(vec![<$element_type>::default(); page_len]);
                }
                Self {
                    pages,
                    size,
                    released: false,
                }
            }

            fn check_alive(&self) {
                assert!(!self.released, "operation on a released huge array");
            }

            pub fn get(&self, index: usize) -> $element_type {
                self.check_alive();
                assert!(
                    index < self.size,
                    "index {} out of bounds for size {}",
                    index,
                    self.size
                );
                use $crate::collections::paging::PageConstants;
                self.pages[PageConstants::page_index(index)][PageConstants::in_page(index)]
            }

            pub fn set(&mut self, index: usize, value: $element_type) {
                self.check_alive();
                assert!(
                    index < self.size,
                    "index {} out of bounds for size {}",
                    index,
                    self.size
                );
                use $crate::collections::paging::PageConstants;
                self.pages[PageConstants::page_index(index)][PageConstants::in_page(index)] =
                    value;
            }

            pub fn set_all<F>(&mut self, gen: F)
            where
                F: Fn(usize) -> $element_type,
            {
                self.check_alive();
                let mut global_index = 0usize;
                for page in &mut self.pages {
                    for elem in page.iter_mut() {
                        if global_index < self.size {
                            *elem = gen(global_index);
                            global_index += 1;
                        }
                    }
                }
            }

            pub fn fill(&mut self, value: $element_type) {
                self.check_alive();
                for page in &mut self.pages {
                    page.fill(value);
                }
            }

            pub fn size(&self) -> usize {
                self.size
            }

            pub fn size_of(&self) -> usize {
                if self.released {
                    0
                } else {
                    $crate::mem::Estimate::size_of_paged(
                        self.size,
                        std::mem::size_of::<$element_type>(),
                    )
                }
            }

            pub fn release(&mut self) -> usize {
                if self.released {
                    return 0;
                }
                let freed = self.size_of();
                self.pages = Vec::new();
                self.released = true;
                freed
            }
        }

        impl<'a> $crate::collections::cursor::HugeCursorSupport<'a> for $paged_name {
            type Cursor = $crate::collections::cursor::PagedCursor<'a, $element_type>;

            fn size(&self) -> usize {
                self.size
            }

            fn new_cursor(&'a self) -> Self::Cursor {
                $crate::collections::cursor::PagedCursor::new(&self.pages, self.size)
            }
        }

        /// Cursor over either representation of `$huge_name`.
        pub enum $cursor_name<'a> {
            Single($crate::collections::cursor::SinglePageCursor<'a, $element_type>),
            Paged($crate::collections::cursor::PagedCursor<'a, $element_type>),
        }

        impl<'a> $crate::collections::cursor::HugeCursor<'a> for $cursor_name<'a> {
            type Array = [$element_type];

            fn next(&mut self) -> bool {
                match self {
                    Self::Single(cursor) => {
                        $crate::collections::cursor::HugeCursor::next(cursor)
                    }
                    Self::Paged(cursor) => $crate::collections::cursor::HugeCursor::next(cursor),
                }
            }

            fn base(&self) -> usize {
                match self {
                    Self::Single(cursor) => {
                        $crate::collections::cursor::HugeCursor::base(cursor)
                    }
                    Self::Paged(cursor) => $crate::collections::cursor::HugeCursor::base(cursor),
                }
            }

            fn offset(&self) -> usize {
                match self {
                    Self::Single(cursor) => {
                        $crate::collections::cursor::HugeCursor::offset(cursor)
                    }
                    Self::Paged(cursor) => $crate::collections::cursor::HugeCursor::offset(cursor),
                }
            }

            fn limit(&self) -> usize {
                match self {
                    Self::Single(cursor) => {
                        $crate::collections::cursor::HugeCursor::limit(cursor)
                    }
                    Self::Paged(cursor) => $crate::collections::cursor::HugeCursor::limit(cursor),
                }
            }

            fn array(&self) -> Option<&'a Self::Array> {
                match self {
                    Self::Single(cursor) => {
                        $crate::collections::cursor::HugeCursor::array(cursor)
                    }
                    Self::Paged(cursor) => $crate::collections::cursor::HugeCursor::array(cursor),
                }
            }

            fn reset(&mut self) {
                match self {
                    Self::Single(cursor) => {
                        $crate::collections::cursor::HugeCursor::reset(cursor)
                    }
                    Self::Paged(cursor) => $crate::collections::cursor::HugeCursor::reset(cursor),
                }
            }

            fn set_range(&mut self, start: usize, end: usize) {
                match self {
                    Self::Single(cursor) => {
                        $crate::collections::cursor::HugeCursor::set_range(cursor, start, end)
                    }
                    Self::Paged(cursor) => {
                        $crate::collections::cursor::HugeCursor::set_range(cursor, start, end)
                    }
                }
            }
        }

        impl<'a> $crate::collections::cursor::HugeCursorSupport<'a> for $huge_name {
            type Cursor = $cursor_name<'a>;

            fn size(&self) -> usize {
                match self {
                    Self::Single(arr) => {
                        $crate::collections::cursor::HugeCursorSupport::size(arr)
                    }
                    Self::Paged(arr) => $crate::collections::cursor::HugeCursorSupport::size(arr),
                }
            }

            fn new_cursor(&'a self) -> Self::Cursor {
                match self {
                    Self::Single(arr) => $cursor_name::Single(
                        $crate::collections::cursor::HugeCursorSupport::new_cursor(arr),
                    ),
                    Self::Paged(arr) => $cursor_name::Paged(
                        $crate::collections::cursor::HugeCursorSupport::new_cursor(arr),
                    ),
                }
            }
        }
    };
}

/// Adds `add_to` and `get_and_add` to a numeric `$huge_name`, implemented in
/// terms of the element type's own `wrapping_add` (native width handles
/// int32 two's-complement wraparound and byte masking for free; for
/// `f64`, plain `+` is used since floats don't wrap).
#[macro_export]
macro_rules! huge_numeric_ops {
    ($huge_name:ident, $element_type:ty, wrapping) => {
        impl $huge_name {
            /// Adds `delta` to the element at `index`.
            pub fn add_to(&mut self, index: usize, delta: $element_type) {
                let current = self.get(index);
                self.set(index, current.wrapping_add(delta));
            }

            /// Returns the prior value, then adds `delta`. Per spec §5 this
            /// is single-writer, NOT atomic; see
            /// [`crate::concurrency`] for the atomic variant contract.
            pub fn get_and_add(&mut self, index: usize, delta: $element_type) -> $element_type {
                let prior = self.get(index);
                self.set(index, prior.wrapping_add(delta));
                prior
            }
        }
    };
    ($huge_name:ident, $element_type:ty, float) => {
        impl $huge_name {
            /// Adds `delta` to the element at `index`.
            pub fn add_to(&mut self, index: usize, delta: $element_type) {
                let current = self.get(index);
                self.set(index, current + delta);
            }

            /// Returns the prior value, then adds `delta`.
            pub fn get_and_add(&mut self, index: usize, delta: $element_type) -> $element_type {
                let prior = self.get(index);
                self.set(index, prior + delta);
                prior
            }
        }
    };
}

/// Adds `or`/`and` bitwise combinators to an integer-kind `$huge_name`.
#[macro_export]
macro_rules! huge_integer_ops {
    ($huge_name:ident, $element_type:ty) => {
        impl $huge_name {
            /// Bitwise-ORs `value` into the element at `index`.
            pub fn or(&mut self, index: usize, value: $element_type) {
                let current = self.get(index);
                self.set(index, current | value);
            }

            /// Bitwise-ANDs `value` into the element at `index`.
            pub fn and(&mut self, index: usize, value: $element_type) {
                let current = self.get(index);
                self.set(index, current & value);
            }
        }
    };
}

/// Adds `binary_search` to a sorted `$huge_name` (spec restricts this to
/// the long array kind).
#[macro_export]
macro_rules! huge_sorted_ops {
    ($huge_name:ident, $element_type:ty) => {
        impl $huge_name {
            /// Binary-searches a sorted array for `search_value`. Returns
            /// the index if found, else `-(insertion_point) - 1`.
            ///
            /// The spec allows a linear-search fallback below 64 elements
            /// (small scans can beat a branchy binary search there); this
            /// implementation always binary-searches since the two give
            /// identical results and a dedicated short-array path isn't
            /// worth the duplicated logic here.
            pub fn binary_search(&self, search_value: $element_type) -> isize {
                if self.size() == 0 {
                    return -1;
                }
                let mut low = 0isize;
                let mut high = (self.size() - 1) as isize;

                while low <= high {
                    let mid = ((low as u64 + high as u64) >> 1) as isize;
                    let mid_val = self.get(mid as usize);

                    if mid_val < search_value {
                        low = mid + 1;
                    } else if mid_val > search_value {
                        high = mid - 1;
                    } else {
                        return mid;
                    }
                }
                -(low + 1)
            }
        }
    };
}
