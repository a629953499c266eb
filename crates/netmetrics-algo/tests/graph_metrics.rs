//! Known-topology regression tests for graph metrics.
//!
//! Each test uses a hand-crafted graph with known properties. Expected
//! metric values are computed analytically and hardcoded, so any algorithm
//! change that shifts values is caught.

use std::time::Duration;

use netmetrics_algo::betweenness::{betweenness_centrality, betweenness_centrality_with};
use netmetrics_algo::clustering::{average_clustering, local_clustering};
use netmetrics_algo::eigenvector::{eigenvector_centrality, eigenvector_centrality_with};
use netmetrics_algo::{CentralityResult, Provenance};
use netmetrics_core::{
    BetweennessConfig, BetweennessNormalization, CancelToken, ClusteringMethod,
    EigenvectorConfig, Graph, MetricsError,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn path(n: u32) -> Graph<u32> {
    Graph::from_edges((0..n - 1).map(|i| (i, i + 1)))
}

fn complete(n: u32) -> Graph<u32> {
    Graph::from_edges((0..n).flat_map(|i| (i + 1..n).map(move |j| (i, j))))
}

fn star(leaves: u32) -> Graph<u32> {
    Graph::from_edges((1..=leaves).map(|leaf| (0, leaf)))
}

fn l2(result: &CentralityResult<u32>) -> f64 {
    result.scores.values().map(|x| x * x).sum::<f64>().sqrt()
}

// ---------------------------------------------------------------------------
// Clustering
// ---------------------------------------------------------------------------

#[test]
fn triangle_clustering_is_one_everywhere() {
    let g = complete(3);
    let local = local_clustering(&g, ClusteringMethod::NeighborMarks);
    assert_eq!(local.len(), 3);
    assert!(local.values().all(|&c| (c - 1.0).abs() < 1e-12));
    assert!((average_clustering(&g) - 1.0).abs() < 1e-12);
}

#[test]
fn star_clustering_is_zero_everywhere() {
    for leaves in [1, 2, 5, 50] {
        let g = star(leaves);
        let local = local_clustering(&g, ClusteringMethod::SortedIntersection);
        assert!(local.values().all(|&c| c.abs() < f64::EPSILON), "star({leaves})");
        assert!(average_clustering(&g).abs() < f64::EPSILON);
    }
}

#[test]
fn complete_graph_clustering_is_one() {
    assert!((average_clustering(&complete(8)) - 1.0).abs() < 1e-12);
}

#[test]
fn path_clustering_is_zero() {
    assert!(average_clustering(&path(10)).abs() < f64::EPSILON);
}

// ---------------------------------------------------------------------------
// Eigenvector centrality
// ---------------------------------------------------------------------------

#[test]
fn complete_graph_eigenvector_is_uniform_unit_vector() {
    for n in [3, 4, 7, 20] {
        let result = eigenvector_centrality(&complete(n), 100, 1e-6).expect("K_n converges");
        let expected = 1.0 / f64::from(n).sqrt();
        for (id, score) in &result.scores {
            assert!(
                (score - expected).abs() < 1e-9,
                "K_{n} node {id}: {score} != {expected}"
            );
        }
        assert!((l2(&result) - 1.0).abs() < 1e-9);
    }
}

#[test]
fn eigenvector_edgeless_graph_is_degenerate() {
    let g = Graph::from_edges([(1, 1), (2, 2)]);
    assert_eq!(g.edge_count(), 0);
    let err = eigenvector_centrality(&g, 100, 1e-6).expect_err("no edges");
    assert!(matches!(err, MetricsError::DegenerateGraph { .. }));
}

#[test]
fn eigenvector_norm_is_one_after_convergence() {
    // Triangle with a two-node tail: connected and not bipartite.
    let g = Graph::from_edges([(0, 1), (1, 2), (2, 0), (2, 3), (3, 4)]);
    let result = eigenvector_centrality(&g, 500, 1e-10).expect("converges");
    assert!((l2(&result) - 1.0).abs() < 1e-9);
    // The triangle vertex carrying the tail ranks first.
    assert_eq!(result.top(1)[0].0, &2);
}

#[test]
fn eigenvector_too_few_iterations_reports_convergence_error() {
    let g = Graph::from_edges([(0, 1), (1, 2), (2, 0), (2, 3), (3, 4)]);
    let err = eigenvector_centrality(&g, 2, 1e-12).expect_err("two rounds are not enough");
    assert!(matches!(
        err,
        MetricsError::Convergence { iterations: 2, .. }
    ));
}

#[test]
fn eigenvector_shift_converges_on_even_cycle() {
    // C6 is bipartite but regular: the uniform start is already the answer,
    // with or without the shift.
    let g = Graph::from_edges((0..6).map(|i| (i, (i + 1) % 6)));
    let config = EigenvectorConfig {
        diagonal_shift: true,
        ..EigenvectorConfig::default()
    };
    let result = eigenvector_centrality_with(&g, &config, &CancelToken::new()).expect("converges");
    let expected = 1.0 / 6.0_f64.sqrt();
    assert!(result.scores.values().all(|s| (s - expected).abs() < 1e-9));
}

// ---------------------------------------------------------------------------
// Betweenness centrality
// ---------------------------------------------------------------------------

#[test]
fn path_of_five_exact_betweenness() {
    // Normalized by (n-1)(n-2) = 12 over ordered pairs:
    //   node 1 carries 3 pairs → 6/12, node 2 carries 4 pairs → 8/12.
    let g = path(5);
    let bc = betweenness_centrality(&g, Some(5), 0).expect("k == n is exact");

    assert!(bc.scores[&0].abs() < 1e-12);
    assert!(bc.scores[&4].abs() < 1e-12);
    assert!((bc.scores[&1] - 0.5).abs() < 1e-12);
    assert!((bc.scores[&3] - 0.5).abs() < 1e-12);
    assert!((bc.scores[&2] - 2.0 / 3.0).abs() < 1e-12);
    assert!(bc.scores[&2] > bc.scores[&1]);
    assert_eq!(
        bc.provenance,
        Provenance::Brandes {
            sources: 5,
            sampled: false
        }
    );
}

#[test]
fn full_sample_matches_exact() {
    let g = Graph::from_edges([(0, 1), (1, 2), (2, 3), (3, 0), (1, 3), (3, 4), (4, 5)]);
    let exact = betweenness_centrality(&g, None, 0).expect("exact");
    let full = betweenness_centrality(&g, Some(g.node_count()), 1234).expect("k == n");
    assert_eq!(exact.scores, full.scores);
}

#[test]
fn path_of_five_unnormalized_counts_pairs() {
    let config = BetweennessConfig {
        normalization: BetweennessNormalization::Unnormalized,
        ..BetweennessConfig::exact()
    };
    let bc = betweenness_centrality_with(&path(5), &config, &CancelToken::new()).expect("exact");
    assert!((bc.scores[&1] - 3.0).abs() < 1e-12);
    assert!((bc.scores[&2] - 4.0).abs() < 1e-12);
}

#[test]
fn betweenness_rejects_k_zero_and_k_above_n() {
    let g = path(5);
    for k in [0, 6, 100] {
        let err = betweenness_centrality(&g, Some(k), 0).expect_err("out of range");
        assert_eq!(
            err,
            MetricsError::InvalidSampleSize {
                k,
                node_count: 5
            }
        );
    }
}

#[test]
fn sampled_star_keeps_leaves_at_zero() {
    // Leaves never sit between two other nodes, whichever sources are drawn.
    // At least three of the four sources are leaves, and each leaf source
    // credits the center with (leaves - 1).
    let g = star(9);
    let bc = betweenness_centrality(&g, Some(4), 17).expect("sampled");
    for leaf in 1..=9 {
        assert!(bc.scores[&leaf].abs() < 1e-12);
    }
    // Seed 17 draws four leaves: raw 4 * 8 = 32, times N/k = 10/4, over
    // (N-1)(N-2) = 72.
    let expected = 32.0 * (10.0 / 4.0) / 72.0;
    assert!((bc.scores[&0] - expected).abs() < 1e-12, "center = {}", bc.scores[&0]);

    let parallel = BetweennessConfig {
        parallel: true,
        ..BetweennessConfig::sampled(4, 17)
    };
    let bc_parallel =
        betweenness_centrality_with(&g, &parallel, &CancelToken::new()).expect("sampled");
    assert!((bc_parallel.scores[&0] - expected).abs() < 1e-12);
    assert_eq!(
        bc.provenance,
        Provenance::Brandes {
            sources: 4,
            sampled: true
        }
    );
}

#[test]
fn sampled_runs_are_reproducible_per_seed() {
    let g = Graph::from_edges((0..200_u32).map(|i| (i, (i * 7 + 3) % 200)));
    let a = betweenness_centrality(&g, Some(25), 99).expect("sampled");
    let b = betweenness_centrality(&g, Some(25), 99).expect("sampled");
    assert_eq!(a, b);
}

#[test]
fn parallel_betweenness_matches_sequential_bit_for_bit() {
    let g = Graph::from_edges((0..300_u32).flat_map(|i| [(i, (i + 1) % 300), (i, (i * 13) % 300)]));
    let sequential = BetweennessConfig {
        parallel: false,
        ..BetweennessConfig::exact()
    };
    let parallel = BetweennessConfig {
        parallel: true,
        ..BetweennessConfig::exact()
    };
    let a = betweenness_centrality_with(&g, &sequential, &CancelToken::new()).expect("exact");
    let b = betweenness_centrality_with(&g, &parallel, &CancelToken::new()).expect("exact");
    assert_eq!(a.scores, b.scores);
}

// ---------------------------------------------------------------------------
// Idempotence
// ---------------------------------------------------------------------------

#[test]
fn repeated_calls_return_identical_results() {
    let g = Graph::from_edges([(0, 1), (1, 2), (2, 0), (2, 3), (3, 4), (4, 2), (4, 5)]);

    assert_eq!(
        eigenvector_centrality(&g, 300, 1e-9),
        eigenvector_centrality(&g, 300, 1e-9)
    );
    assert_eq!(
        local_clustering(&g, ClusteringMethod::NeighborMarks),
        local_clustering(&g, ClusteringMethod::NeighborMarks)
    );
    assert_eq!(
        betweenness_centrality(&g, Some(3), 5),
        betweenness_centrality(&g, Some(3), 5)
    );
}

#[test]
fn cancelling_during_a_run_stops_between_sources() {
    let n = 5_000_usize;
    let g = Graph::from_edges((0..n).map(|i| (i, (i + 1) % n)));
    let cancel = CancelToken::new();
    let handle = cancel.clone();
    let canceller = std::thread::spawn(move || {
        std::thread::sleep(Duration::from_millis(10));
        handle.cancel();
    });

    let outcome = betweenness_centrality_with(&g, &BetweennessConfig::exact(), &cancel);
    canceller.join().expect("canceller thread");

    match outcome {
        Err(MetricsError::Cancelled { after }) => assert!(after < n, "after = {after}"),
        other => panic!("expected cancellation mid-run, got {other:?}"),
    }
}
