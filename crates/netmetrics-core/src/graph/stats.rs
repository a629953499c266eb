//! Summary statistics for an undirected graph.
//!
//! # Statistics Provided
//!
//! - **node_count** / **edge_count**: size of the simple graph after
//!   duplicate edges and self-loops were dropped.
//! - **density**: `2E / (N (N-1))`. Zero for graphs with fewer than two nodes.
//! - **component_count**: connected components, via union-find.
//! - **isolated_node_count**: degree-0 nodes (only possible through self-loop
//!   rows or explicitly declared nodes).
//! - **max_degree** / **mean_degree**.

use petgraph::unionfind::UnionFind;

use crate::graph::build::{Graph, NodeId};

/// Summary statistics for a [`Graph`].
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct GraphStats {
    pub node_count: usize,
    pub edge_count: usize,
    /// `2E / (N (N-1))`, in `[0, 1]`.
    pub density: f64,
    /// Number of connected components. Isolated nodes count as one each.
    pub component_count: usize,
    pub isolated_node_count: usize,
    pub max_degree: usize,
    /// `2E / N`; zero for the empty graph.
    pub mean_degree: f64,
}

impl GraphStats {
    #[must_use]
    pub fn compute<N: NodeId>(graph: &Graph<N>) -> Self {
        let node_count = graph.node_count();
        let edge_count = graph.edge_count();

        let mut components = UnionFind::<usize>::new(node_count);
        for (u, v) in graph.edges() {
            components.union(u, v);
        }
        let component_count = (0..node_count)
            .filter(|&v| components.find_mut(v) == v)
            .count();

        let degrees = (0..node_count).map(|v| graph.degree(v));
        let isolated_node_count = degrees.clone().filter(|&d| d == 0).count();
        let max_degree = degrees.max().unwrap_or(0);

        Self {
            node_count,
            edge_count,
            density: compute_density(node_count, edge_count),
            component_count,
            isolated_node_count,
            max_degree,
            mean_degree: compute_mean_degree(node_count, edge_count),
        }
    }

    /// Return `true` if the graph has no edges.
    #[must_use]
    pub const fn is_edgeless(&self) -> bool {
        self.edge_count == 0
    }

    #[must_use]
    pub const fn is_connected(&self) -> bool {
        self.component_count <= 1
    }
}

fn compute_density(node_count: usize, edge_count: usize) -> f64 {
    if node_count < 2 {
        return 0.0_f64;
    }
    let max_edges = (node_count * (node_count - 1)) as f64 / 2.0;
    edge_count as f64 / max_edges
}

fn compute_mean_degree(node_count: usize, edge_count: usize) -> f64 {
    if node_count == 0 {
        return 0.0_f64;
    }
    2.0 * edge_count as f64 / node_count as f64
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
