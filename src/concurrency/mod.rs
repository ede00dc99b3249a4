//! Concurrency primitives: worker-count newtype and runtime feature
//! toggles.

mod concurrency;
mod feature_toggles;

pub use concurrency::Concurrency;
pub use feature_toggles::{set_use_reordered_adjacency_list, use_reordered_adjacency_list};
