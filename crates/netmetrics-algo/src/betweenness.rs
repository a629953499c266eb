//! Betweenness centrality via Brandes' algorithm, optionally source-sampled.
//!
//! # Overview
//!
//! Betweenness centrality measures how often a node lies on shortest paths
//! between other pairs of nodes. High-betweenness nodes are bridges between
//! otherwise loosely connected regions of the graph.
//!
//! # Algorithm
//!
//! We implement Brandes' algorithm (2001) for unweighted graphs:
//!
//! 1. For each source node `s`, run BFS to compute shortest-path counts
//!    (`sigma`), distances, and shortest-path predecessors.
//! 2. Accumulate dependency scores in reverse BFS order (farthest nodes first):
//!    `delta(v) += sigma(v) / sigma(w) * (1 + delta(w))` for each predecessor
//!    `v` of `w`.
//! 3. Add `delta(v)` to the running total of every `v != s`.
//!
//! Complexity: O(E) per source, O(k * E) overall.
//!
//! # Sampling
//!
//! With `k < n` only `k` sources, drawn uniformly without replacement from a
//! seeded RNG, are processed and the totals are multiplied by `n / k`.
//!
//! # Normalization
//!
//! Every unordered pair is accumulated twice, once from each endpoint.
//!
//! - [`BetweennessNormalization::Normalized`]: divide by `(n-1)(n-2)` when
//!   `n > 2`. A node on every shortest path scores 1.0.
//! - [`BetweennessNormalization::Unnormalized`]: divide by 2, giving the
//!   expected number of pairs whose shortest paths pass through the node.
//!
//! # Parallelism
//!
//! Sources are split into a fixed number of contiguous chunks. Each chunk
//! sums into its own buffer and the buffers are folded into the total in
//! chunk order, sequentially or on the rayon pool. Both paths perform the
//! same floating-point additions in the same order, so the result does not
//! depend on `parallel` or on the thread count.

use std::collections::VecDeque;

use netmetrics_core::{
    BetweennessConfig, BetweennessNormalization, CancelToken, Graph, NodeId, Result,
};
use rayon::prelude::*;
use tracing::{debug, instrument};

use crate::result::{CentralityResult, Provenance};
use crate::sampling::select_sources;

/// Upper bound on the number of per-chunk partial sums.
const SOURCE_CHUNKS: usize = 64;

/// Betweenness from `k` sampled sources (`None` = every node), normalized.
///
/// # Errors
///
/// Returns [`MetricsError::InvalidSampleSize`] when `k == Some(0)` or
/// `k > node_count`.
///
/// [`MetricsError::InvalidSampleSize`]: netmetrics_core::MetricsError::InvalidSampleSize
pub fn betweenness_centrality<N: NodeId + Sync>(
    graph: &Graph<N>,
    k: Option<usize>,
    seed: u64,
) -> Result<CentralityResult<N>> {
    let config = BetweennessConfig {
        sample_size: k,
        seed,
        ..BetweennessConfig::default()
    };
    betweenness_centrality_with(graph, &config, &CancelToken::new())
}

/// Betweenness under a full [`BetweennessConfig`], checking `cancel` before
/// every source.
///
/// # Errors
///
/// - [`MetricsError::InvalidSampleSize`] when the sample size is out of range.
/// - [`MetricsError::Cancelled`] if `cancel` is raised.
///
/// [`MetricsError::InvalidSampleSize`]: netmetrics_core::MetricsError::InvalidSampleSize
/// [`MetricsError::Cancelled`]: netmetrics_core::MetricsError::Cancelled
#[instrument(skip(graph, cancel), fields(nodes = graph.node_count(), edges = graph.edge_count()))]
pub fn betweenness_centrality_with<N: NodeId + Sync>(
    graph: &Graph<N>,
    config: &BetweennessConfig,
    cancel: &CancelToken,
) -> Result<CentralityResult<N>> {
    let n = graph.node_count();
    let sample = select_sources(n, config.sample_size, config.seed)?;
    let sources = &sample.sources;

    let mut totals = vec![0.0_f64; n];

    if !sources.is_empty() {
        let chunk_size = sources.len().div_ceil(SOURCE_CHUNKS);
        let chunks: Vec<(usize, &[usize])> = sources
            .chunks(chunk_size)
            .enumerate()
            .map(|(i, chunk)| (i * chunk_size, chunk))
            .collect();

        if config.parallel {
            // Bounded waves keep at most one partial buffer per worker alive.
            let wave = rayon::current_num_threads().max(1);
            for group in chunks.chunks(wave) {
                let partials: Vec<Vec<f64>> = group
                    .par_iter()
                    .map(|&(offset, chunk)| accumulate_chunk(graph, chunk, offset, cancel))
                    .collect::<Result<_>>()?;
                for partial in &partials {
                    add_into(&mut totals, partial);
                }
            }
        } else {
            for &(offset, chunk) in &chunks {
                let partial = accumulate_chunk(graph, chunk, offset, cancel)?;
                add_into(&mut totals, &partial);
            }
        }
    }

    let scale = scale_factor(n, sources.len(), sample.sampled, config.normalization);
    if let Some(scale) = scale {
        for x in &mut totals {
            *x *= scale;
        }
    }

    debug!(
        sources = sources.len(),
        sampled = sample.sampled,
        ?scale,
        "betweenness accumulated"
    );

    Ok(CentralityResult::from_dense(
        graph,
        &totals,
        Provenance::Brandes {
            sources: sources.len(),
            sampled: sample.sampled,
        },
    ))
}

/// Sum the dependencies of every source in `chunk` into a fresh buffer.
fn accumulate_chunk<N: NodeId>(
    graph: &Graph<N>,
    chunk: &[usize],
    offset: usize,
    cancel: &CancelToken,
) -> Result<Vec<f64>> {
    let mut workspace = BrandesWorkspace::new(graph.node_count());
    let mut partial = vec![0.0_f64; graph.node_count()];
    for (i, &s) in chunk.iter().enumerate() {
        cancel.check(offset + i)?;
        workspace.single_source(graph, s, &mut partial);
    }
    Ok(partial)
}

fn add_into(totals: &mut [f64], partial: &[f64]) {
    for (t, p) in totals.iter_mut().zip(partial) {
        *t += p;
    }
}

/// Multiplier applied to raw Brandes totals, `None` when no scaling applies.
fn scale_factor(
    n: usize,
    sources: usize,
    sampled: bool,
    normalization: BetweennessNormalization,
) -> Option<f64> {
    let base = match normalization {
        BetweennessNormalization::Normalized => {
            if n <= 2 {
                return None;
            }
            1.0 / ((n - 1) as f64 * (n - 2) as f64)
        }
        BetweennessNormalization::Unnormalized => 0.5,
    };
    if sampled {
        Some(base * n as f64 / sources as f64)
    } else {
        Some(base)
    }
}

// ---------------------------------------------------------------------------
// Single-source phase
// ---------------------------------------------------------------------------

/// Per-source scratch arrays, reused across the sources of one chunk.
///
/// Only entries touched by the previous BFS are reset, so a source that
/// reaches a small component costs time proportional to that component.
struct BrandesWorkspace {
    /// Nodes in BFS discovery order (farthest popped first).
    stack: Vec<usize>,
    /// predecessors[w] = nodes immediately before w on shortest paths from s.
    predecessors: Vec<Vec<usize>>,
    /// sigma[t]: number of shortest paths from s to t.
    sigma: Vec<f64>,
    /// dist[t]: distance from s to t, `usize::MAX` = unvisited.
    dist: Vec<usize>,
    delta: Vec<f64>,
    queue: VecDeque<usize>,
}

impl BrandesWorkspace {
    fn new(n: usize) -> Self {
        Self {
            stack: Vec::with_capacity(n),
            predecessors: vec![Vec::new(); n],
            sigma: vec![0.0; n],
            dist: vec![usize::MAX; n],
            delta: vec![0.0; n],
            queue: VecDeque::new(),
        }
    }

    fn single_source<N: NodeId>(&mut self, graph: &Graph<N>, s: usize, totals: &mut [f64]) {
        self.sigma[s] = 1.0;
        self.dist[s] = 0;
        self.queue.push_back(s);

        while let Some(v) = self.queue.pop_front() {
            self.stack.push(v);
            let next_dist = self.dist[v] + 1;

            for &w in graph.neighbors(v) {
                // First visit to w?
                if self.dist[w] == usize::MAX {
                    self.dist[w] = next_dist;
                    self.queue.push_back(w);
                }

                // Shortest path to w via v?
                if self.dist[w] == next_dist {
                    self.sigma[w] += self.sigma[v];
                    self.predecessors[w].push(v);
                }
            }
        }

        // Accumulate dependencies in reverse BFS order.
        while let Some(w) = self.stack.pop() {
            let coeff = (1.0 + self.delta[w]) / self.sigma[w];
            for &v in &self.predecessors[w] {
                self.delta[v] += self.sigma[v] * coeff;
            }
            if w != s {
                totals[w] += self.delta[w];
            }

            self.predecessors[w].clear();
            self.sigma[w] = 0.0;
            self.dist[w] = usize::MAX;
            self.delta[w] = 0.0;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
