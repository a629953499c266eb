//! Owned result types returned by the metrics.

use std::collections::HashMap;
use std::hash::Hash;

use netmetrics_core::{Graph, NodeId};
use serde::Serialize;

/// How a [`CentralityResult`] was produced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum Provenance {
    /// Power iteration that converged after `iterations` rounds.
    PowerIteration { iterations: usize, residual: f64 },
    /// Brandes accumulation from `sources` BFS roots.
    Brandes { sources: usize, sampled: bool },
}

/// Node → score mapping for one metric. Never mutated after it is returned.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CentralityResult<N: Eq + Hash> {
    pub scores: HashMap<N, f64>,
    pub provenance: Provenance,
}

impl<N: NodeId> CentralityResult<N> {
    /// Pair dense-index scores with the graph's identifiers.
    pub(crate) fn from_dense(graph: &Graph<N>, dense: &[f64], provenance: Provenance) -> Self {
        let scores = graph
            .labels()
            .iter()
            .cloned()
            .zip(dense.iter().copied())
            .collect();
        Self { scores, provenance }
    }

    #[must_use]
    pub fn get(&self, id: &N) -> Option<f64> {
        self.scores.get(id).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// The `k` highest-scoring nodes, best first. Ties keep no particular order.
    #[must_use]
    pub fn top(&self, k: usize) -> Vec<(&N, f64)> {
        let mut ranked: Vec<(&N, f64)> = self.scores.iter().map(|(id, &s)| (id, s)).collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked.truncate(k);
        ranked
    }
}

/// Per-node local clustering plus the unweighted average over all nodes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClusteringResult<N: Eq + Hash> {
    pub local: HashMap<N, f64>,
    pub average: f64,
}
