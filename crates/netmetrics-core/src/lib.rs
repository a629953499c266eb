#![forbid(unsafe_code)]
//! netmetrics-core library.
//!
//! Graph store, error taxonomy, configuration, and cancellation shared by the
//! metric implementations in `netmetrics-algo`.
//!
//! # Conventions
//!
//! - **Errors**: Return [`error::Result`], backed by the [`error::MetricsError`]
//!   enum (`thiserror`).
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `debug!`, `trace!`).
//!   Libraries never install a subscriber.

pub mod cancel;
pub mod config;
pub mod error;
pub mod graph;

pub use cancel::CancelToken;
pub use config::{
    BetweennessConfig, BetweennessNormalization, ClusteringConfig, ClusteringMethod,
    EigenvectorConfig, MetricsConfig,
};
pub use error::{ErrorCode, MetricsError, Result};
pub use graph::{Graph, GraphBuilder, GraphStats, NodeId};
