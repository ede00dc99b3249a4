//! Adjacency build configuration (spec §6, §10.C).
//!
//! `AdjacencyBuildConfig` is a plain data record with a hand-written
//! builder, matching the donor's `PageRankConfig`/`PageRankConfigBuilder`
//! shape rather than a `derive_builder`-generated one.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::concurrency::Concurrency;
use crate::errors::CoreError;

/// Configuration handed to the adjacency builder (spec component 4.F).
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone)]
pub struct AdjacencyBuildConfig {
    concurrency: Concurrency,
    allow_reordering: bool,
}

impl AdjacencyBuildConfig {
    /// Starts building a config with the defaults (single-threaded,
    /// reordering allowed).
    pub fn builder() -> AdjacencyBuildConfigBuilder {
        AdjacencyBuildConfigBuilder::default()
    }

    /// Worker count to use while building adjacency pages.
    pub fn concurrency(&self) -> Concurrency {
        self.concurrency
    }

    /// Whether the builder may run the page-reordering optimizer.
    pub fn allow_reordering(&self) -> bool {
        self.allow_reordering
    }

    /// Checks the record's own invariants.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidConfig`] if `concurrency` is not at
    /// least 1 (structurally impossible via [`Concurrency`], kept here so
    /// callers that construct the record by other means still get a
    /// checked path).
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.concurrency.value() < 1 {
            return Err(CoreError::InvalidConfig(
                "concurrency must be >= 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for AdjacencyBuildConfig {
    fn default() -> Self {
        AdjacencyBuildConfigBuilder::default().build()
    }
}

/// Hand-written builder for [`AdjacencyBuildConfig`].
#[derive(Debug, Clone)]
pub struct AdjacencyBuildConfigBuilder {
    concurrency: Concurrency,
    allow_reordering: bool,
}

impl Default for AdjacencyBuildConfigBuilder {
    fn default() -> Self {
        Self {
            concurrency: Concurrency::default(),
            allow_reordering: true,
        }
    }
}

impl AdjacencyBuildConfigBuilder {
    /// Sets the worker count.
    pub fn concurrency(mut self, concurrency: Concurrency) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Enables or disables the page-reordering optimizer.
    pub fn allow_reordering(mut self, allow_reordering: bool) -> Self {
        self.allow_reordering = allow_reordering;
        self
    }

    /// Builds the record. Always succeeds since every setter already
    /// enforces its own invariant; use [`AdjacencyBuildConfig::validate`]
    /// after construction if the record came from an external source
    /// (deserialisation) that bypassed the builder.
    pub fn build(self) -> AdjacencyBuildConfig {
        AdjacencyBuildConfig {
            concurrency: self.concurrency,
            allow_reordering: self.allow_reordering,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_single_threaded_with_reordering() {
        let config = AdjacencyBuildConfig::default();
        assert_eq!(config.concurrency().value(), 1);
        assert!(config.allow_reordering());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn builder_overrides_defaults() {
        let config = AdjacencyBuildConfig::builder()
            .concurrency(Concurrency::new(8).unwrap())
            .allow_reordering(false)
            .build();

        assert_eq!(config.concurrency().value(), 8);
        assert!(!config.allow_reordering());
    }
}
