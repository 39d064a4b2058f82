//! Error types for program loading and oracle queries.

use std::sync::Arc;

use camino::Utf8PathBuf;
use thiserror::Error;

use pythia_syntax::SyntaxError;

/// Errors raised while building a [`Program`](crate::Program) from the scope
/// arguments.
#[derive(Debug, Error)]
pub enum LoadError {
    /// A scope argument does not exist or cannot be canonicalised.
    #[error("cannot load {path}: {source}")]
    Root {
        /// The scope argument as supplied.
        path: String,
        /// Underlying error wrapped in Arc for Clone support.
        #[source]
        source: Arc<std::io::Error>,
    },

    /// A file under a scope argument could not be read.
    #[error("cannot read {path}: {source}")]
    Read {
        /// Path of the unreadable file.
        path: Utf8PathBuf,
        /// Underlying error wrapped in Arc for Clone support.
        #[source]
        source: Arc<std::io::Error>,
    },

    /// A path cannot be represented as UTF-8.
    #[error("path is not valid UTF-8: {0}")]
    NonUtf8Path(String),

    /// Directory traversal failed.
    #[error("failed to walk {path}: {message}")]
    Walk {
        /// The root being walked.
        path: String,
        /// Description of the failure.
        message: String,
    },

    /// A file could not be parsed.
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    /// The scope arguments contain no source files in a supported language.
    #[error("no source files found in scope")]
    EmptyScope,
}

impl LoadError {
    /// Creates a new `Root` error.
    #[must_use]
    pub fn root(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::Root {
            path: path.into(),
            source: Arc::new(source),
        }
    }

    /// Creates a new `Read` error.
    #[must_use]
    pub fn read(path: impl Into<Utf8PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source: Arc::new(source),
        }
    }

    /// Creates a new `Walk` error.
    #[must_use]
    pub fn walk(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Walk {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Errors returned by an [`Oracle`](crate::Oracle).
///
/// The messages are shown to the user unchanged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OracleError {
    /// The position does not map into the loaded program.
    #[error("{0}")]
    Resolution(String),

    /// The mode is not one the oracle answers.
    #[error("invalid mode type: {mode:?}")]
    InvalidMode {
        /// The rejected mode.
        mode: String,
    },

    /// The analysis itself failed, e.g. no identifier at the position.
    #[error("{0}")]
    Analysis(String),
}

impl OracleError {
    /// Creates a new `Resolution` error.
    #[must_use]
    pub fn resolution(message: impl Into<String>) -> Self {
        Self::Resolution(message.into())
    }

    /// Creates a new `InvalidMode` error.
    #[must_use]
    pub fn invalid_mode(mode: impl Into<String>) -> Self {
        Self::InvalidMode { mode: mode.into() }
    }

    /// Creates a new `Analysis` error.
    #[must_use]
    pub fn analysis(message: impl Into<String>) -> Self {
        Self::Analysis(message.into())
    }
}
