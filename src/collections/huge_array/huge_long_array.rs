//! `HugeLongArray` - an `i64` array that can hold more than 2 billion
//! elements.
//!
//! Generated by [`crate::huge_primitive_array_base`],
//! [`crate::huge_numeric_ops`], [`crate::huge_integer_ops`], and
//! [`crate::huge_sorted_ops`]. `binary_search` is only meaningful on a
//! sorted long array; the spec restricts it to this kind.

crate::huge_primitive_array_base!(
    HugeLongArray,
    SingleHugeLongArray,
    PagedHugeLongArray,
    HugeLongArrayCursor,
    i64,
    "A long-indexable `i64` array that can hold more than 2 billion elements."
);

crate::huge_numeric_ops!(HugeLongArray, i64, wrapping);
crate::huge_integer_ops!(HugeLongArray, i64);
crate::huge_sorted_ops!(HugeLongArray, i64);
