//! Eigenvector centrality via power iteration.
//!
//! # Overview
//!
//! Eigenvector centrality scores nodes based on the idea that connections to
//! high-scoring nodes contribute more to a node's score. It's the dominant
//! eigenvector of the adjacency matrix.
//!
//! # Algorithm
//!
//! Power iteration on the adjacency matrix:
//!
//! 1. Initialize scores uniformly to `1/sqrt(n)`.
//! 2. For each node `v`: `score(v) = sum of score(u) for all neighbors u`.
//! 3. Normalize the score vector to unit L2 norm.
//! 4. Stop once the L2 distance between successive vectors is below the
//!    tolerance; fail with `Convergence` after `max_iter` rounds.
//!
//! Bipartite graphs (paths, stars, even cycles) have `-λ` in the spectrum and
//! the plain iteration oscillates instead of settling. With `diagonal_shift`
//! the iteration runs on `A + I`, which has the same eigenvectors but a
//! unique dominant eigenvalue for connected graphs.
//!
//! # Output
//!
//! A [`CentralityResult`] whose scores form a unit vector. Nodes without
//! neighbors score 0.

use netmetrics_core::{CancelToken, EigenvectorConfig, Graph, MetricsError, NodeId, Result};
use tracing::{debug, instrument};

use crate::result::{CentralityResult, Provenance};

/// Compute eigenvector centrality with the given iteration cap and tolerance.
///
/// # Errors
///
/// - [`MetricsError::DegenerateGraph`] if the graph has no edges.
/// - [`MetricsError::Convergence`] if `max_iter` rounds do not reach `tolerance`.
pub fn eigenvector_centrality<N: NodeId>(
    graph: &Graph<N>,
    max_iter: usize,
    tolerance: f64,
) -> Result<CentralityResult<N>> {
    let config = EigenvectorConfig {
        max_iter,
        tolerance,
        ..EigenvectorConfig::default()
    };
    eigenvector_centrality_with(graph, &config, &CancelToken::new())
}

/// Compute eigenvector centrality under a full [`EigenvectorConfig`],
/// checking `cancel` before every iteration.
///
/// # Errors
///
/// - [`MetricsError::DegenerateGraph`] if the graph has no edges or the
///   vector collapses to zero norm.
/// - [`MetricsError::Convergence`] if `max_iter` rounds do not reach the
///   tolerance.
/// - [`MetricsError::Cancelled`] if `cancel` is raised.
#[instrument(skip(graph, cancel), fields(nodes = graph.node_count(), edges = graph.edge_count()))]
pub fn eigenvector_centrality_with<N: NodeId>(
    graph: &Graph<N>,
    config: &EigenvectorConfig,
    cancel: &CancelToken,
) -> Result<CentralityResult<N>> {
    let n = graph.node_count();

    if graph.edge_count() == 0 {
        return Err(MetricsError::degenerate(format!(
            "eigenvector centrality is undefined on a graph with {n} nodes and no edges"
        )));
    }

    let init_val = 1.0 / (n as f64).sqrt();
    let mut scores: Vec<f64> = vec![init_val; n];
    let mut next: Vec<f64> = vec![0.0; n];
    let mut residual = f64::INFINITY;

    for iter in 0..config.max_iter {
        cancel.check(iter)?;

        for (v, slot) in next.iter_mut().enumerate() {
            let mut sum: f64 = graph.neighbors(v).iter().map(|&u| scores[u]).sum();
            if config.diagonal_shift {
                sum += scores[v];
            }
            *slot = sum;
        }

        let norm = l2_norm(&next);
        if norm <= 0.0 || !norm.is_finite() {
            return Err(MetricsError::degenerate(format!(
                "score vector reached norm {norm} at iteration {}",
                iter + 1
            )));
        }
        for x in &mut next {
            *x /= norm;
        }

        residual = l2_distance(&scores, &next);
        std::mem::swap(&mut scores, &mut next);

        if residual < config.tolerance {
            debug!(iterations = iter + 1, residual, "power iteration converged");
            return Ok(CentralityResult::from_dense(
                graph,
                &scores,
                Provenance::PowerIteration {
                    iterations: iter + 1,
                    residual,
                },
            ));
        }
    }

    Err(MetricsError::Convergence {
        iterations: config.max_iter,
        tolerance: config.tolerance,
        residual,
    })
}

fn l2_norm(v: &[f64]) -> f64 {
    v.iter().map(|x| x * x).sum::<f64>().sqrt()
}

fn l2_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y).powi(2))
        .sum::<f64>()
        .sqrt()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
