//! Graph construction from edge lists.
//!
//! # Layout
//!
//! External identifiers are mapped to dense indices `0..n` in the order they
//! are first seen. Adjacency is stored compressed: `offsets[v]..offsets[v+1]`
//! indexes into `targets`, and each node's slice is sorted ascending by dense
//! index. Sorted slices give O(log d) edge probes and linear-time merge
//! intersection, which the clustering engine relies on.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use tracing::{debug, instrument};

use crate::error::{MetricsError, Result};

/// Anything usable as an external node identifier (integers, strings, ...).
pub trait NodeId: Clone + Eq + Hash + fmt::Debug {}

impl<T: Clone + Eq + Hash + fmt::Debug> NodeId for T {}

// ---------------------------------------------------------------------------
// GraphBuilder
// ---------------------------------------------------------------------------

/// Accumulates nodes and edges before freezing them into a [`Graph`].
#[derive(Debug)]
pub struct GraphBuilder<N> {
    labels: Vec<N>,
    index: HashMap<N, usize>,
    /// Raw `(min, max)` pairs, possibly repeated.
    pairs: Vec<(usize, usize)>,
    self_loops: usize,
}

impl<N: NodeId> Default for GraphBuilder<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: NodeId> GraphBuilder<N> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            labels: Vec::new(),
            index: HashMap::new(),
            pairs: Vec::new(),
            self_loops: 0,
        }
    }

    /// Pre-size for roughly `edges` input rows.
    #[must_use]
    pub fn with_capacity(edges: usize) -> Self {
        Self {
            labels: Vec::with_capacity(edges),
            index: HashMap::with_capacity(edges),
            pairs: Vec::with_capacity(edges),
            self_loops: 0,
        }
    }

    /// Register `id` as a node (no-op if already present) and return its
    /// dense index.
    pub fn add_node(&mut self, id: N) -> usize {
        if let Some(&idx) = self.index.get(&id) {
            return idx;
        }
        let idx = self.labels.len();
        self.labels.push(id.clone());
        self.index.insert(id, idx);
        idx
    }

    /// Add the undirected edge `{u, v}`. Self-loops register the node only.
    pub fn add_edge(&mut self, u: N, v: N) {
        let a = self.add_node(u);
        let b = self.add_node(v);
        if a == b {
            self.self_loops += 1;
            return;
        }
        self.pairs.push((a.min(b), a.max(b)));
    }

    /// Freeze into an immutable [`Graph`], collapsing duplicate edges.
    #[must_use]
    #[instrument(skip_all)]
    pub fn build(mut self) -> Graph<N> {
        let n = self.labels.len();
        let raw_pairs = self.pairs.len();

        self.pairs.sort_unstable();
        self.pairs.dedup();

        let mut degrees = vec![0_usize; n];
        for &(a, b) in &self.pairs {
            degrees[a] += 1;
            degrees[b] += 1;
        }

        let mut offsets = Vec::with_capacity(n + 1);
        let mut running = 0;
        offsets.push(0);
        for d in &degrees {
            running += d;
            offsets.push(running);
        }

        // Pairs are sorted by (min, max): every node first receives its
        // smaller neighbors in ascending order (as `max`), then its larger
        // ones (as `min`), so each slice comes out sorted without a re-sort.
        let mut cursor: Vec<usize> = offsets[..n].to_vec();
        let mut targets = vec![0_usize; running];
        for &(a, b) in &self.pairs {
            targets[cursor[a]] = b;
            cursor[a] += 1;
            targets[cursor[b]] = a;
            cursor[b] += 1;
        }

        debug!(
            nodes = n,
            edges = self.pairs.len(),
            duplicates = raw_pairs - self.pairs.len(),
            self_loops = self.self_loops,
            "graph built"
        );

        Graph {
            labels: self.labels,
            index: self.index,
            offsets,
            targets,
        }
    }
}

// ---------------------------------------------------------------------------
// Graph
// ---------------------------------------------------------------------------

/// Immutable undirected simple graph.
///
/// Nodes are addressed either by their external identifier `N` or by the
/// dense index assigned at construction (`0..node_count()`). Metric code
/// works on dense indices and maps back to identifiers only when building
/// results.
#[derive(Debug, Clone)]
pub struct Graph<N> {
    labels: Vec<N>,
    index: HashMap<N, usize>,
    offsets: Vec<usize>,
    targets: Vec<usize>,
}

impl<N: NodeId> Graph<N> {
    /// Build from two parallel columns: `sources[i] -- targets[i]`.
    ///
    /// # Errors
    ///
    /// Returns [`MetricsError::MalformedEdge`] if the columns differ in
    /// length. The reported row is the first one missing a partner.
    #[instrument(skip_all)]
    pub fn from_columns<S, T>(sources: S, targets: T) -> Result<Self>
    where
        S: IntoIterator<Item = N>,
        T: IntoIterator<Item = N>,
    {
        let mut sources = sources.into_iter();
        let mut targets = targets.into_iter();
        let mut builder = GraphBuilder::with_capacity(sources.size_hint().0);
        let mut row = 0;

        loop {
            match (sources.next(), targets.next()) {
                (Some(u), Some(v)) => builder.add_edge(u, v),
                (None, None) => break,
                _ => return Err(MetricsError::MalformedEdge { row, fields: 1 }),
            }
            row += 1;
        }

        Ok(builder.build())
    }

    /// Build from rows of fields. The first two fields are the endpoints;
    /// anything after them is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`MetricsError::MalformedEdge`] for the first row with fewer
    /// than two fields.
    #[instrument(skip_all)]
    pub fn from_rows<R, I>(rows: I) -> Result<Self>
    where
        R: AsRef<[N]>,
        I: IntoIterator<Item = R>,
    {
        let rows = rows.into_iter();
        let mut builder = GraphBuilder::with_capacity(rows.size_hint().0);

        for (row, fields) in rows.enumerate() {
            match fields.as_ref() {
                [u, v, ..] => builder.add_edge(u.clone(), v.clone()),
                short => {
                    return Err(MetricsError::MalformedEdge {
                        row,
                        fields: short.len(),
                    });
                }
            }
        }

        Ok(builder.build())
    }

    /// Build from `(u, v)` pairs. Cannot fail: every pair has both fields.
    #[must_use]
    pub fn from_edges<I>(edges: I) -> Self
    where
        I: IntoIterator<Item = (N, N)>,
    {
        let edges = edges.into_iter();
        let mut builder = GraphBuilder::with_capacity(edges.size_hint().0);
        for (u, v) in edges {
            builder.add_edge(u, v);
        }
        builder.build()
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.labels.len()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.targets.len() / 2
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Degree of the node at dense index `v`. O(1).
    ///
    /// # Panics
    ///
    /// Panics if `v >= node_count()`.
    #[must_use]
    pub fn degree(&self, v: usize) -> usize {
        self.offsets[v + 1] - self.offsets[v]
    }

    /// Neighbors of dense index `v`, sorted ascending.
    ///
    /// # Panics
    ///
    /// Panics if `v >= node_count()`.
    #[must_use]
    pub fn neighbors(&self, v: usize) -> &[usize] {
        &self.targets[self.offsets[v]..self.offsets[v + 1]]
    }

    /// Whether `{u, v}` is an edge. O(log min(d(u), d(v))).
    #[must_use]
    pub fn has_edge(&self, u: usize, v: usize) -> bool {
        let (probe, key) = if self.degree(u) <= self.degree(v) {
            (u, v)
        } else {
            (v, u)
        };
        self.neighbors(probe).binary_search(&key).is_ok()
    }

    /// Dense index of an external identifier.
    #[must_use]
    pub fn index_of(&self, id: &N) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// External identifier at dense index `v`.
    #[must_use]
    pub fn label(&self, v: usize) -> Option<&N> {
        self.labels.get(v)
    }

    /// All identifiers, in dense-index order.
    #[must_use]
    pub fn labels(&self) -> &[N] {
        &self.labels
    }

    /// Degree looked up by identifier.
    #[must_use]
    pub fn degree_of(&self, id: &N) -> Option<usize> {
        self.index_of(id).map(|v| self.degree(v))
    }

    /// Neighbor identifiers looked up by identifier.
    pub fn neighbors_of(&self, id: &N) -> Option<impl Iterator<Item = &N> + '_> {
        let v = self.index_of(id)?;
        Some(self.neighbors(v).iter().map(|&u| &self.labels[u]))
    }

    /// Every edge once, as `(u, v)` dense indices with `u < v`.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.node_count()).flat_map(move |u| {
            self.neighbors(u)
                .iter()
                .copied()
                .filter(move |&v| v > u)
                .map(move |v| (u, v))
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
