//! `HugeDoubleArray` - an `f64` array that can hold more than 2 billion
//! elements.
//!
//! Generated by [`crate::huge_primitive_array_base`] and
//! [`crate::huge_numeric_ops`] (float variant: plain `+`, no wraparound).
//! Floats have no bitwise combinators and no natural sort order for
//! `binary_search`, so neither [`crate::huge_integer_ops`] nor
//! [`crate::huge_sorted_ops`] applies here; `set`/`get` preserve the exact
//! bit pattern passed in, including NaN payloads and signed infinities,
//! since storage is a plain `Vec<f64>` copy with no normalisation.

crate::huge_primitive_array_base!(
    HugeDoubleArray,
    SingleHugeDoubleArray,
    PagedHugeDoubleArray,
    HugeDoubleArrayCursor,
    f64,
    "A long-indexable `f64` array that can hold more than 2 billion elements."
);

crate::huge_numeric_ops!(HugeDoubleArray, f64, float);
