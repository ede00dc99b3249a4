//! `HugeByteArray` - a `u8` array that can hold more than 2 billion elements.
//!
//! Generated by [`crate::huge_primitive_array_base`] and
//! [`crate::huge_numeric_ops`]. `u8` is the element type, so masking the
//! stored value to 8 bits is automatic: there is no wider value to mask,
//! wrapping on overflow falls out of `u8::wrapping_add` for free.

crate::huge_primitive_array_base!(
    HugeByteArray,
    SingleHugeByteArray,
    PagedHugeByteArray,
    HugeByteArrayCursor,
    u8,
    "A long-indexable `u8` array that can hold more than 2 billion elements."
);

crate::huge_numeric_ops!(HugeByteArray, u8, wrapping);
crate::huge_integer_ops!(HugeByteArray, u8);
