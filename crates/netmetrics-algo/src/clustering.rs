//! Local and average clustering coefficient.
//!
//! # Definition
//!
//! For a node `v` of degree `d`:
//!
//! ```text
//! C(v) = links among neighbors of v / (d choose 2)     when d >= 2
//! C(v) = 0                                             when d <  2
//! ```
//!
//! The average is taken over **all** nodes, so degree-0 and degree-1 nodes
//! pull it down. The empty graph averages to 0.
//!
//! # Strategies
//!
//! Both cost `O(sum of d(v)^2)` and return identical values.
//!
//! - [`ClusteringMethod::NeighborMarks`]: stamp `v`'s neighbors into a scratch
//!   array, then walk each neighbor's list probing the stamps in O(1).
//! - [`ClusteringMethod::SortedIntersection`]: for each neighbor `u` of `v`,
//!   intersect `N(u)` with the part of `N(v)` after `u`, iterating whichever
//!   list is shorter and binary-searching the longer one.

use netmetrics_core::{ClusteringConfig, ClusteringMethod, Graph, NodeId};
use tracing::{debug, instrument};

use crate::result::ClusteringResult;

/// Average clustering coefficient in `[0, 1]` with the default strategy.
#[must_use]
pub fn average_clustering<N: NodeId>(graph: &Graph<N>) -> f64 {
    mean(&local_dense(graph, ClusteringMethod::default()))
}

/// Per-node local clustering coefficients.
#[must_use]
pub fn local_clustering<N: NodeId>(
    graph: &Graph<N>,
    method: ClusteringMethod,
) -> std::collections::HashMap<N, f64> {
    graph
        .labels()
        .iter()
        .cloned()
        .zip(local_dense(graph, method))
        .collect()
}

/// Local coefficients and their average in one pass.
#[must_use]
#[instrument(skip(graph), fields(nodes = graph.node_count(), edges = graph.edge_count()))]
pub fn clustering<N: NodeId>(graph: &Graph<N>, config: &ClusteringConfig) -> ClusteringResult<N> {
    let dense = local_dense(graph, config.method);
    let average = mean(&dense);
    debug!(average, "clustering computed");

    ClusteringResult {
        local: graph.labels().iter().cloned().zip(dense).collect(),
        average,
    }
}

/// Local coefficient for every dense index.
pub(crate) fn local_dense<N: NodeId>(graph: &Graph<N>, method: ClusteringMethod) -> Vec<f64> {
    match method {
        ClusteringMethod::NeighborMarks => by_marks(graph),
        ClusteringMethod::SortedIntersection => by_intersection(graph),
    }
}

fn by_marks<N: NodeId>(graph: &Graph<N>) -> Vec<f64> {
    let n = graph.node_count();
    let mut stamp = vec![usize::MAX; n];
    let mut coefficients = vec![0.0; n];

    for (v, coefficient) in coefficients.iter_mut().enumerate() {
        let nbrs = graph.neighbors(v);
        if nbrs.len() < 2 {
            continue;
        }
        for &u in nbrs {
            stamp[u] = v;
        }

        let mut links = 0_usize;
        for &u in nbrs {
            links += graph
                .neighbors(u)
                .iter()
                .filter(|&&w| w > u && stamp[w] == v)
                .count();
        }
        *coefficient = ratio(links, nbrs.len());
    }

    coefficients
}

fn by_intersection<N: NodeId>(graph: &Graph<N>) -> Vec<f64> {
    (0..graph.node_count())
        .map(|v| {
            let nbrs = graph.neighbors(v);
            if nbrs.len() < 2 {
                return 0.0;
            }
            let links: usize = nbrs
                .iter()
                .enumerate()
                .map(|(i, &u)| intersection_size(graph.neighbors(u), &nbrs[i + 1..]))
                .sum();
            ratio(links, nbrs.len())
        })
        .collect()
}

/// Size of the intersection of two ascending slices.
fn intersection_size(a: &[usize], b: &[usize]) -> usize {
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    if small.is_empty() {
        return 0;
    }
    // Comparable lengths: linear merge. Skewed lengths: probe the larger list.
    if large.len() / small.len() < 8 {
        let (mut i, mut j, mut count) = (0, 0, 0);
        while i < small.len() && j < large.len() {
            match small[i].cmp(&large[j]) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    count += 1;
                    i += 1;
                    j += 1;
                }
            }
        }
        count
    } else {
        small
            .iter()
            .filter(|x| large.binary_search(x).is_ok())
            .count()
    }
}

fn ratio(links: usize, degree: usize) -> f64 {
    let pairs = degree * (degree - 1) / 2;
    links as f64 / pairs as f64
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
