use std::fmt;

use serde::Serialize;

/// Result alias used by every fallible operation in netmetrics.
pub type Result<T> = std::result::Result<T, MetricsError>;

/// Errors reported by graph construction and metric computations.
///
/// None of these are retried internally: running the same computation on the
/// same input fails the same way. Only a caller-side change (more iterations,
/// a different `k`, fixed input rows) resolves them.
#[derive(Debug, Clone, PartialEq, Serialize, thiserror::Error)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum MetricsError {
    /// An input row did not carry both endpoints of an edge.
    #[error("malformed edge at row {row}: expected at least 2 fields, found {fields}")]
    MalformedEdge { row: usize, fields: usize },

    /// Power iteration ran out of iterations before settling.
    #[error(
        "power iteration did not converge after {iterations} iterations \
         (residual {residual:e} > tolerance {tolerance:e})"
    )]
    Convergence {
        iterations: usize,
        tolerance: f64,
        residual: f64,
    },

    /// The score vector collapsed to zero norm (typically an edgeless graph).
    #[error("degenerate graph: {reason}")]
    DegenerateGraph { reason: String },

    /// Betweenness sample size outside `[1, node_count]`.
    #[error("invalid sample size k={k}: must be in [1, {node_count}]")]
    InvalidSampleSize { k: usize, node_count: usize },

    /// A caller raised the [`CancelToken`](crate::cancel::CancelToken).
    #[error("computation cancelled after {after} steps")]
    Cancelled { after: usize },

    /// Configuration text failed to parse or holds out-of-range values.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl MetricsError {
    /// Machine-readable code for this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::MalformedEdge { .. } => ErrorCode::MalformedEdge,
            Self::Convergence { .. } => ErrorCode::Convergence,
            Self::DegenerateGraph { .. } => ErrorCode::DegenerateGraph,
            Self::InvalidSampleSize { .. } => ErrorCode::InvalidSampleSize,
            Self::Cancelled { .. } => ErrorCode::Cancelled,
            Self::Config(_) => ErrorCode::ConfigInvalid,
        }
    }

    #[must_use]
    pub fn degenerate(reason: impl Into<String>) -> Self {
        Self::DegenerateGraph {
            reason: reason.into(),
        }
    }
}

/// Machine-readable error codes for callers that branch on failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    MalformedEdge,
    Convergence,
    DegenerateGraph,
    InvalidSampleSize,
    Cancelled,
    ConfigInvalid,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::MalformedEdge => "E1001",
            Self::ConfigInvalid => "E1002",
            Self::Convergence => "E2001",
            Self::DegenerateGraph => "E2002",
            Self::InvalidSampleSize => "E2003",
            Self::Cancelled => "E3001",
        }
    }

    /// Short human-facing summary for logs.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::MalformedEdge => "Malformed edge row",
            Self::ConfigInvalid => "Invalid metrics configuration",
            Self::Convergence => "Power iteration did not converge",
            Self::DegenerateGraph => "Degenerate graph",
            Self::InvalidSampleSize => "Invalid betweenness sample size",
            Self::Cancelled => "Computation cancelled",
        }
    }

    /// Remediation hint; `None` when there is nothing to change on the caller side.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::MalformedEdge => Some("Every row needs a source and a target identifier."),
            Self::ConfigInvalid => Some("Check tolerances are positive and iteration caps non-zero."),
            Self::Convergence => {
                Some("Raise max_iter, loosen the tolerance, or enable diagonal_shift.")
            }
            Self::DegenerateGraph => Some("Eigenvector centrality needs at least one edge."),
            Self::InvalidSampleSize => Some("Pick k between 1 and the node count."),
            Self::Cancelled => None,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
