//! Source selection for sampled betweenness.

use netmetrics_core::{MetricsError, Result};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::debug;

/// BFS roots chosen for one betweenness run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSample {
    /// Dense node indices, ascending.
    pub sources: Vec<usize>,
    /// `false` when every node is a source (exact betweenness).
    pub sampled: bool,
}

/// Pick `k` of `node_count` nodes uniformly without replacement.
///
/// `None` or `Some(node_count)` selects every node. The same `(node_count,
/// k, seed)` always yields the same sources for a given `rand` release.
///
/// # Errors
///
/// Returns [`MetricsError::InvalidSampleSize`] when `k == 0` or
/// `k > node_count`.
pub fn select_sources(node_count: usize, k: Option<usize>, seed: u64) -> Result<SourceSample> {
    match k {
        Some(k) if k == 0 || k > node_count => {
            Err(MetricsError::InvalidSampleSize { k, node_count })
        }
        Some(k) if k < node_count => {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut sources = rand::seq::index::sample(&mut rng, node_count, k).into_vec();
            sources.sort_unstable();
            debug!(k, node_count, seed, "sampled betweenness sources");
            Ok(SourceSample {
                sources,
                sampled: true,
            })
        }
        _ => Ok(SourceSample {
            sources: (0..node_count).collect(),
            sampled: false,
        }),
    }
}
