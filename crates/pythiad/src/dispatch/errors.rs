//! Error types for query dispatch.

use thiserror::Error;

use pythia_oracle::OracleError;

use crate::resolve::ResolveError;

/// Errors surfaced while dispatching a query.
///
/// The display text of each variant is what the client sees, so resolver and
/// oracle messages are passed through unchanged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// The position names a file outside the analysis scope.
    #[error("forbidden: {path} is not in the analysis scope")]
    ScopeViolation {
        /// The rejected path.
        path: String,
    },

    /// The position string could not be parsed.
    #[error(transparent)]
    MalformedPosition(#[from] ResolveError),

    /// The oracle could not map the position into the program.
    #[error(transparent)]
    Resolution(OracleError),

    /// The oracle failed to answer the query.
    #[error(transparent)]
    Engine(OracleError),

    /// Internal error (e.g., lock poisoned).
    #[error("internal error: {message}")]
    Internal {
        /// Description of the failure.
        message: String,
    },
}

impl QueryError {
    /// Creates a scope violation error.
    #[must_use]
    pub fn scope_violation(path: impl Into<String>) -> Self {
        Self::ScopeViolation { path: path.into() }
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Whether the error must be answered with a forbidden status rather than
    /// reported as query output.
    #[must_use]
    pub const fn is_forbidden(&self) -> bool {
        matches!(self, Self::ScopeViolation { .. })
    }
}
