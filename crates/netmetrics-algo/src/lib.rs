#![forbid(unsafe_code)]
//! Centrality and clustering metrics over a [`netmetrics_core::Graph`].
//!
//! # Overview
//!
//! Each metric takes a read-only graph reference, owns its scratch arrays,
//! and returns an owned result. Metrics never depend on one another.
//!
//! - **Eigenvector centrality** (`eigenvector`): which nodes are connected to
//!   other central nodes?
//! - **Clustering coefficient** (`clustering`): how often do a node's
//!   neighbors know each other?
//! - **Betweenness centrality** (`betweenness`): which nodes sit on the
//!   shortest paths between others? Exact or source-sampled.
//! - **Analysis** (`analysis`): all of the above plus graph statistics.
//!
//! # Usage
//!
//! ```rust,ignore
//! use netmetrics_core::{Graph, MetricsConfig, CancelToken};
//! use netmetrics_algo::{analysis::analyze, eigenvector::eigenvector_centrality};
//!
//! let graph = Graph::from_columns(sources, targets)?;
//!
//! let ev = eigenvector_centrality(&graph, 100, 1e-6)?;
//! let avg = netmetrics_algo::clustering::average_clustering(&graph);
//! let bc = netmetrics_algo::betweenness::betweenness_centrality(&graph, Some(100), 42)?;
//!
//! let report = analyze(&graph, &MetricsConfig::default(), &CancelToken::new())?;
//! ```

pub mod analysis;
pub mod betweenness;
pub mod clustering;
pub mod eigenvector;
pub mod result;
pub mod sampling;

pub use analysis::{AnalysisReport, analyze};
pub use result::{CentralityResult, ClusteringResult, Provenance};
