//! Error taxonomy for analysis and rewrite operations.
//!
//! Lookups that find nothing are not errors: they return `None` or an empty
//! collection. Only the three conditions below cross component boundaries.

use thiserror::Error;

/// Coarse classification of an [`AnalysisError`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The supplied tree or binding table violates a structural invariant.
    Malformed,
    /// The caller passed an argument outside the operation's domain.
    Precondition,
    /// A long traversal observed its cancellation flag.
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    #[error("malformed input: {reason}")]
    Malformed { reason: String },

    #[error("precondition violated: {reason}")]
    Precondition { reason: String },

    #[error("analysis cancelled")]
    Cancelled,
}

impl AnalysisError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::Malformed {
            reason: reason.into(),
        }
    }

    pub fn precondition(reason: impl Into<String>) -> Self {
        Self::Precondition {
            reason: reason.into(),
        }
    }

    #[inline]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Malformed { .. } => ErrorKind::Malformed,
            Self::Precondition { .. } => ErrorKind::Precondition,
            Self::Cancelled => ErrorKind::Cancelled,
        }
    }

    #[inline]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

pub type AnalysisResult<T> = Result<T, AnalysisError>;

#[cfg(test)]
#[path = "tests/error_tests.rs"]
mod tests;
