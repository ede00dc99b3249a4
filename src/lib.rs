//! `gds_core`: the storage and memory-management core of a graph-analytics
//! runtime.
//!
//! This crate has no notion of a graph, an algorithm, or a query. What it
//! provides is the substrate everything above it is built on: huge,
//! long-indexable arrays that page themselves once they outgrow a single
//! allocation, a forward-only cursor protocol for walking those pages
//! without materialising them, a bump-allocated builder for packing
//! variable-length adjacency lists into a shared paged heap, an optional
//! pass that reorders those pages for locality, and the pure arithmetic
//! that lets a caller estimate how much memory any of the above will need
//! before committing to it.
//!
//! # Layout
//!
//! - [`collections`] — the huge array family, the cursor protocol, the
//!   adjacency builder and its page-reordering optimizer, and the scratch
//!   buffers the adjacency codec uses.
//! - [`mem`] — bit utilities and the memory-estimation calculus.
//! - [`concurrency`] — the `Concurrency` worker-count newtype and runtime
//!   feature toggles.
//! - [`config`] — builder-validated configuration for the adjacency
//!   builder.
//! - [`errors`] — the crate's recoverable error taxonomy.
//! - [`util`] — ambient utilities, currently just logging.

pub mod collections;
pub mod concurrency;
pub mod config;
pub mod errors;
pub mod mem;
pub mod util;

pub use errors::CoreError;
