//! Error types for coordinate parsing and translation.

use thiserror::Error;

/// Errors raised while parsing or resolving source coordinates.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// The text is not of the form `L1.C1-L2.C2` with positive integers.
    #[error("malformed selection: {input:?}")]
    MalformedSelection {
        /// The rejected input.
        input: String,
    },

    /// The text is not of the form `path:#N` or `path:#N,#N2`.
    #[error("malformed position: {input:?}")]
    MalformedPosition {
        /// The rejected input.
        input: String,
    },

    /// The line does not exist in the content.
    #[error("line {line} is out of range (content has {lines} lines)")]
    LineOutOfRange {
        /// Requested line (one-based).
        line: usize,
        /// Number of lines in the content.
        lines: usize,
    },

    /// The column lies beyond the end of its line.
    #[error("column {column} is out of range for line {line} (at most {max})")]
    ColumnOutOfRange {
        /// Line holding the column (one-based).
        line: usize,
        /// Requested column (one-based).
        column: usize,
        /// Largest valid column on that line.
        max: usize,
    },

    /// The selection ends before it starts.
    #[error("selection ends at byte {end} before it starts at byte {start}")]
    InvertedSelection {
        /// Resolved start offset.
        start: usize,
        /// Resolved end offset.
        end: usize,
    },
}

impl ResolveError {
    /// Creates a malformed selection error.
    #[must_use]
    pub fn malformed_selection(input: impl Into<String>) -> Self {
        Self::MalformedSelection {
            input: input.into(),
        }
    }

    /// Creates a malformed position error.
    #[must_use]
    pub fn malformed_position(input: impl Into<String>) -> Self {
        Self::MalformedPosition {
            input: input.into(),
        }
    }
}
