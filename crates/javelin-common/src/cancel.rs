//! Cooperative cancellation.
//!
//! A `CancellationToken` is handed to analysis sessions by the embedding
//! host. Hierarchy walks and whole-tree scans call [`CancellationToken::check`]
//! at loop and recursion boundaries and unwind with
//! [`AnalysisError::Cancelled`] once the flag is raised.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::{AnalysisError, AnalysisResult};

#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    flag: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// A token that can never be cancelled.
    pub fn never() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }

    /// Returns `Err(Cancelled)` once [`cancel`](Self::cancel) has been called
    /// on this token or any of its clones.
    #[inline]
    pub fn check(&self) -> AnalysisResult<()> {
        if self.is_cancelled() {
            Err(AnalysisError::Cancelled)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
#[path = "tests/cancel_tests.rs"]
mod tests;
