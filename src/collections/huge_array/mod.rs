//! The huge array family (spec component 4.C): long-indexable arrays for
//! each primitive element kind plus a generic object array, all built on
//! the shared paging and cursor infrastructure.

#[macro_use]
mod macros;

mod huge_byte_array;
mod huge_double_array;
mod huge_int_array;
mod huge_long_array;
mod huge_object_array;

pub use huge_byte_array::{HugeByteArray, HugeByteArrayCursor, PagedHugeByteArray, SingleHugeByteArray};
pub use huge_double_array::{
    HugeDoubleArray, HugeDoubleArrayCursor, PagedHugeDoubleArray, SingleHugeDoubleArray,
};
pub use huge_int_array::{HugeIntArray, HugeIntArrayCursor, PagedHugeIntArray, SingleHugeIntArray};
pub use huge_long_array::{
    HugeLongArray, HugeLongArrayCursor, PagedHugeLongArray, SingleHugeLongArray,
};
pub use huge_object_array::HugeObjectArray;
