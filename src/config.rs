use log::debug;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::errors::SimilarityError;

/// Smallest cluster size reported by default: any single repeated item.
pub const DEFAULT_MINIMUM_CLUSTER_SIZE: usize = 1;

/// Suggested minimum cluster size when relisting whole files line by line.
pub const LINE_RELISTING_MINIMUM_SIZE: usize = 5;

/// Suggested minimum cluster size when relisting whole files word by word.
pub const WORD_RELISTING_MINIMUM_SIZE: usize = 10;

/// Tunables of the clustering engine.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Clusters sharing fewer `Normal` items than this are not reported.
    #[cfg_attr(feature = "serde", serde(default = "default_minimum_cluster_size"))]
    pub minimum_cluster_size: usize,

    /// Number of mismatching items tolerated inside one run before the run
    /// is considered broken.
    #[cfg_attr(feature = "serde", serde(default = "default_tolerance"))]
    pub tolerance: usize,
}

fn default_minimum_cluster_size() -> usize {
    debug!("Using default minimum cluster size: {DEFAULT_MINIMUM_CLUSTER_SIZE}");
    DEFAULT_MINIMUM_CLUSTER_SIZE
}

fn default_tolerance() -> usize {
    debug!("Using default tolerance: 0");
    0
}

impl Default for Config {
    fn default() -> Self {
        Self {
            minimum_cluster_size: default_minimum_cluster_size(),
            tolerance: default_tolerance(),
        }
    }
}

impl Config {
    /// Create a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns `SimilarityError::InvalidMinimumClusterSize` when
    /// `minimum_cluster_size` is 0.
    pub fn new(minimum_cluster_size: usize, tolerance: usize) -> Result<Self, SimilarityError> {
        let config = Self {
            minimum_cluster_size,
            tolerance,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check the configuration, typically after deserialising it.
    ///
    /// # Errors
    ///
    /// Returns `SimilarityError::InvalidMinimumClusterSize` when
    /// `minimum_cluster_size` is 0.
    pub fn validate(&self) -> Result<(), SimilarityError> {
        if self.minimum_cluster_size == 0 {
            return Err(SimilarityError::InvalidMinimumClusterSize(
                self.minimum_cluster_size,
            ));
        }

        Ok(())
    }
}
