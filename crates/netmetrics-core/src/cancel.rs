//! Cooperative cancellation for long-running computations.
//!
//! Power iteration checks the token between iterations and betweenness checks
//! it between sources. Raising the token never interrupts a step in progress.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::{MetricsError, Result};

/// Shared flag a caller raises to abort a computation.
///
/// Clones share the same flag, so one clone can be handed to a computation
/// while another stays with the caller.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }

    /// Return [`MetricsError::Cancelled`] if cancellation was requested.
    ///
    /// `completed` is the number of iterations or sources already finished.
    ///
    /// # Errors
    ///
    /// Returns `Cancelled` once [`cancel`](Self::cancel) has been called.
    pub fn check(&self, completed: usize) -> Result<()> {
        if self.is_cancelled() {
            tracing::warn!(completed, "computation cancelled");
            return Err(MetricsError::Cancelled { after: completed });
        }
        Ok(())
    }
}
