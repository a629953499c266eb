//! One-shot analysis: graph statistics plus all three metrics.
//!
//! The metrics share nothing but the read-only graph, so with
//! `MetricsConfig::parallel` they run concurrently via `rayon::join`. Each
//! metric keeps its own outcome: an eigenvector `Convergence` error (plain
//! power iteration on a tree, say) leaves clustering and betweenness intact.
//! Cancellation is the exception and aborts the whole report.

use netmetrics_core::{CancelToken, Graph, GraphStats, MetricsConfig, MetricsError, NodeId, Result};
use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::betweenness::betweenness_centrality_with;
use crate::clustering::clustering;
use crate::eigenvector::eigenvector_centrality_with;
use crate::result::{CentralityResult, ClusteringResult};

/// Everything computed for one graph.
///
/// The fallible metrics are stored as their own `Result`; clustering cannot
/// fail.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport<N: Eq + std::hash::Hash> {
    pub stats: GraphStats,
    pub eigenvector: Result<CentralityResult<N>>,
    pub clustering: ClusteringResult<N>,
    pub betweenness: Result<CentralityResult<N>>,
}

impl<N: NodeId> AnalysisReport<N> {
    /// Unweighted average clustering coefficient.
    #[must_use]
    pub const fn average_clustering(&self) -> f64 {
        self.clustering.average
    }

    /// True when every metric produced a result.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.eigenvector.is_ok() && self.betweenness.is_ok()
    }

    /// Metric failures in report order (eigenvector, then betweenness).
    pub fn errors(&self) -> impl Iterator<Item = &MetricsError> {
        [&self.eigenvector, &self.betweenness]
            .into_iter()
            .filter_map(|outcome| outcome.as_ref().err())
    }
}

/// Compute statistics and the three metrics for `graph`.
///
/// Per-metric failures (`Convergence`, `DegenerateGraph`,
/// `InvalidSampleSize`) are recorded in the report rather than returned.
///
/// # Errors
///
/// - [`MetricsError::Config`] if `config` does not validate.
/// - [`MetricsError::Cancelled`] if `cancel` stopped either metric.
#[instrument(skip(graph, cancel), fields(nodes = graph.node_count(), edges = graph.edge_count()))]
pub fn analyze<N: NodeId + Send + Sync>(
    graph: &Graph<N>,
    config: &MetricsConfig,
    cancel: &CancelToken,
) -> Result<AnalysisReport<N>> {
    config.validate()?;
    let stats = GraphStats::compute(graph);
    info!(
        nodes = stats.node_count,
        edges = stats.edge_count,
        components = stats.component_count,
        "analyzing graph"
    );

    let (eigenvector, clustering, betweenness) = if config.parallel {
        let (eigenvector, (clustering, betweenness)) = rayon::join(
            || eigenvector_centrality_with(graph, &config.eigenvector, cancel),
            || {
                rayon::join(
                    || clustering(graph, &config.clustering),
                    || betweenness_centrality_with(graph, &config.betweenness, cancel),
                )
            },
        );
        (eigenvector, clustering, betweenness)
    } else {
        (
            eigenvector_centrality_with(graph, &config.eigenvector, cancel),
            clustering(graph, &config.clustering),
            betweenness_centrality_with(graph, &config.betweenness, cancel),
        )
    };

    let cancelled = [&eigenvector, &betweenness]
        .into_iter()
        .filter_map(|outcome| outcome.as_ref().err())
        .find(|err| matches!(err, MetricsError::Cancelled { .. }));
    if let Some(err) = cancelled {
        return Err(err.clone());
    }

    let report = AnalysisReport {
        stats,
        eigenvector,
        clustering,
        betweenness,
    };
    for err in report.errors() {
        warn!(code = err.code().code(), %err, "metric failed");
    }
    Ok(report)
}
