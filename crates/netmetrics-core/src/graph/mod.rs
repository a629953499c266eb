//! Undirected simple graph built from an edge list.
//!
//! # Overview
//!
//! Every metric in netmetrics reads the same immutable [`Graph`]. The graph
//! is built once, from an already-parsed edge list, and never mutated.
//!
//! ## Pipeline
//!
//! ```text
//! (source, target) rows
//!        ↓  Graph::from_columns / from_rows / from_edges
//! GraphBuilder   (dense ids in first-seen order, raw pairs)
//!        ↓  GraphBuilder::build   (sort + dedup, O(E log E))
//! Graph          (offsets + sorted neighbor lists)
//!        ↓  stats::GraphStats::compute()
//! GraphStats     (counts, density, components, degrees)
//! ```
//!
//! ## Simple-graph rules
//!
//! - `{u, v}` and `{v, u}` are the same edge; repeats collapse to one.
//! - Self-loops are dropped without error. The endpoint still becomes a node.
//! - A row missing its target is a [`MetricsError::MalformedEdge`]; no
//!   partially built graph is ever returned.
//!
//! [`MetricsError::MalformedEdge`]: crate::error::MetricsError::MalformedEdge

pub mod build;
pub mod stats;

pub use build::{Graph, GraphBuilder, NodeId};
pub use stats::GraphStats;
