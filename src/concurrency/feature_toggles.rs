//! Global feature toggles (spec §10.E), env-var backed.
//!
//! Grounded on the donor's `FeatureToggle` enum pattern in
//! `util/feature_toggles.rs`, trimmed to the single toggle this crate
//! needs: whether the adjacency builder is allowed to run the page-
//! reordering optimizer.

use lazy_static::lazy_static;
use std::sync::atomic::{AtomicBool, Ordering};

const USE_REORDERED_ADJACENCY_LIST_ENV: &str = "USE_REORDERED_ADJACENCY_LIST";

lazy_static! {
    static ref USE_REORDERED_ADJACENCY_LIST: AtomicBool = AtomicBool::new(
        std::env::var(USE_REORDERED_ADJACENCY_LIST_ENV)
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(true)
    );
}

/// Whether the adjacency builder may reorder pages before building the
/// final immutable structure. Defaults to enabled; override with the
/// `USE_REORDERED_ADJACENCY_LIST` environment variable at process start,
/// or at runtime via [`set_use_reordered_adjacency_list`].
pub fn use_reordered_adjacency_list() -> bool {
    USE_REORDERED_ADJACENCY_LIST.load(Ordering::Relaxed)
}

/// Overrides the toggle for the remainder of the process. Intended for
/// tests; production call sites should prefer the environment variable.
pub fn set_use_reordered_adjacency_list(enabled: bool) {
    USE_REORDERED_ADJACENCY_LIST.store(enabled, Ordering::Relaxed);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_can_be_flipped_at_runtime() {
        let original = use_reordered_adjacency_list();

        set_use_reordered_adjacency_list(false);
        assert!(!use_reordered_adjacency_list());

        set_use_reordered_adjacency_list(true);
        assert!(use_reordered_adjacency_list());

        set_use_reordered_adjacency_list(original);
    }
}
