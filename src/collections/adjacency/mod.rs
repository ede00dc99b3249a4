//! The bump-allocated adjacency builder (spec component 4.F) and its
//! page-reordering optimizer (spec component 4.G).

mod bump_allocator;
mod reorder;

pub use bump_allocator::{
    Allocator, AdjacencyList, AdjacencyListBuilder, PositionalAllocator,
};
