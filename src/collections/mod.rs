//! Huge, page-addressed collections: paging arithmetic, cursor iteration,
//! the huge array family, and the bump-allocated adjacency builder built on
//! top of them.

pub mod adjacency;
pub mod atomic;
pub mod buffer;
pub mod cursor;
pub mod huge_array;
pub mod paging;
