//! Tunables for the three metrics.
//!
//! Every field has a serde default, so an empty TOML document yields
//! [`MetricsConfig::default`]. Parsing happens from text only; locating and
//! reading a config file is the caller's business.
//!
//! ```toml
//! parallel = true
//!
//! [eigenvector]
//! max_iter = 200
//! tolerance = 1e-8
//!
//! [clustering]
//! method = "sorted_intersection"
//!
//! [betweenness]
//! sample_size = 100
//! seed = 7
//! normalization = "unnormalized"
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{MetricsError, Result};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricsConfig {
    #[serde(default)]
    pub eigenvector: EigenvectorConfig,
    #[serde(default)]
    pub clustering: ClusteringConfig,
    #[serde(default)]
    pub betweenness: BetweennessConfig,
    /// Run the three metrics concurrently instead of one after another.
    #[serde(default)]
    pub parallel: bool,
}

impl MetricsConfig {
    /// Parse and validate a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`MetricsError::Config`] on malformed TOML or out-of-range values.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(text).map_err(|e| MetricsError::Config(e.message().to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges that serde cannot express.
    ///
    /// The betweenness sample size is checked against the graph at compute
    /// time, since its upper bound is the node count.
    ///
    /// # Errors
    ///
    /// Returns [`MetricsError::Config`] naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        self.eigenvector.validate()
    }
}

/// Power-iteration settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EigenvectorConfig {
    /// Maximum number of iterations before reporting non-convergence.
    /// Default: 100.
    #[serde(default = "default_max_iter")]
    pub max_iter: usize,
    /// Stop when the L2 distance between successive normalized vectors
    /// drops below this. Default: 1e-6.
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
    /// Iterate with `A + I` instead of `A`. Same eigenvectors, but bipartite
    /// graphs stop oscillating. Default: off.
    #[serde(default)]
    pub diagonal_shift: bool,
}

impl Default for EigenvectorConfig {
    fn default() -> Self {
        Self {
            max_iter: default_max_iter(),
            tolerance: default_tolerance(),
            diagonal_shift: false,
        }
    }
}

impl EigenvectorConfig {
    fn validate(&self) -> Result<()> {
        if self.max_iter == 0 {
            return Err(MetricsError::Config(
                "eigenvector.max_iter must be at least 1".to_string(),
            ));
        }
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(MetricsError::Config(format!(
                "eigenvector.tolerance must be a positive finite number, got {}",
                self.tolerance
            )));
        }
        Ok(())
    }
}

/// How links among a node's neighbors are counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClusteringMethod {
    /// Stamp the neighbors of `v` in a scratch array, then probe it.
    #[default]
    NeighborMarks,
    /// Merge-intersect sorted neighbor lists, smaller list driving.
    SortedIntersection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ClusteringConfig {
    #[serde(default)]
    pub method: ClusteringMethod,
}

/// Scaling applied to accumulated betweenness totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BetweennessNormalization {
    /// Divide by `(n-1)(n-2)` when `n > 2`.
    #[default]
    Normalized,
    /// Halve, so each unordered pair is counted once.
    Unnormalized,
}

/// Sampled-Brandes settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BetweennessConfig {
    /// Number of sampled sources. `None` uses every node (exact).
    #[serde(default)]
    pub sample_size: Option<usize>,
    /// Seed for source sampling.
    #[serde(default)]
    pub seed: u64,
    #[serde(default)]
    pub normalization: BetweennessNormalization,
    /// Process sources on the rayon pool.
    #[serde(default)]
    pub parallel: bool,
}

impl BetweennessConfig {
    /// Exact betweenness using every node as a source.
    #[must_use]
    pub fn exact() -> Self {
        Self::default()
    }

    /// Sample `k` sources with the given seed.
    #[must_use]
    pub fn sampled(k: usize, seed: u64) -> Self {
        Self {
            sample_size: Some(k),
            seed,
            ..Self::default()
        }
    }
}

const fn default_max_iter() -> usize {
    100
}

const fn default_tolerance() -> f64 {
    1e-6
}
