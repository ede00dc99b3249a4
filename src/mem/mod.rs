//! Memory layout utilities: bit manipulation and the estimation calculus.

mod bit_util;
mod estimate;

pub use bit_util::BitUtil;
pub use estimate::{Estimate, GraphBuildEstimate};
