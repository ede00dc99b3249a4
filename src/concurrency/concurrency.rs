//! Concurrency level newtype (spec §5).
//!
//! A worker-count that is always at least 1, so call sites never have to
//! special-case "zero workers" themselves.

use std::num::NonZeroUsize;

/// Number of worker threads/tasks to use for a parallel operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Concurrency(NonZeroUsize);

impl Concurrency {
    /// A single-threaded concurrency level.
    pub const SINGLE_THREADED: Concurrency = Concurrency(match NonZeroUsize::new(1) {
        Some(n) => n,
        None => unreachable!(),
    });

    /// Wraps `value`, returning `None` if `value == 0`.
    pub fn new(value: usize) -> Option<Self> {
        NonZeroUsize::new(value).map(Concurrency)
    }

    /// Picks a concurrency level from the available CPU parallelism,
    /// falling back to single-threaded if that can't be determined.
    pub fn available_cores() -> Self {
        Concurrency(NonZeroUsize::new(num_cpus::get()).unwrap_or(NonZeroUsize::new(1).unwrap()))
    }

    /// The worker count as a plain `usize`, always `>= 1`.
    pub fn value(&self) -> usize {
        self.0.get()
    }
}

impl Default for Concurrency {
    fn default() -> Self {
        Self::SINGLE_THREADED
    }
}

impl std::fmt::Display for Concurrency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value())
    }
}

impl TryFrom<usize> for Concurrency {
    type Error = crate::errors::CoreError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Concurrency::new(value)
            .ok_or_else(|| crate::errors::CoreError::InvalidConfig("concurrency must be >= 1".to_string()))
    }
}
