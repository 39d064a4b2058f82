//! Query inputs: the mode tag and the positions handed to an oracle.

use std::fmt;

use crate::model::FileId;

/// Tag selecting the analysis an oracle performs.
///
/// Mode names are defined by the oracle; the only one with meaning outside it
/// is [`QueryMode::SCOPE_SUMMARY`], which asks about the program as a whole
/// and therefore carries no position.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryMode(String);

impl QueryMode {
    /// Mode that summarises the whole scope.
    pub const SCOPE_SUMMARY: &'static str = "what";

    /// Wraps a mode tag.
    #[must_use]
    pub fn new(mode: impl Into<String>) -> Self {
        Self(mode.into())
    }

    /// The mode tag as received.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this mode bypasses position resolution.
    #[must_use]
    pub fn is_scope_summary(&self) -> bool {
        self.0 == Self::SCOPE_SUMMARY
    }
}

impl From<&str> for QueryMode {
    fn from(mode: &str) -> Self {
        Self::new(mode)
    }
}

impl fmt::Display for QueryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A file path and byte range, not yet checked against the program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSpan {
    /// Absolute path exactly as the client sent it.
    pub path: String,
    /// First byte of the span.
    pub start: usize,
    /// Byte just past the span; equal to `start` for a point.
    pub end: usize,
}

impl SourceSpan {
    /// Creates a span.
    #[must_use]
    pub fn new(path: impl Into<String>, start: usize, end: usize) -> Self {
        Self {
            path: path.into(),
            start,
            end,
        }
    }
}

impl fmt::Display for SourceSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}:#{}", self.path, self.start)
        } else {
            write!(f, "{}:#{},#{}", self.path, self.start, self.end)
        }
    }
}

/// A span that has been located inside the loaded program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPos {
    file: FileId,
    start: usize,
    end: usize,
}

impl ResolvedPos {
    /// Creates a position. Oracles call this from [`Oracle::resolve`] once
    /// they have checked the span.
    ///
    /// [`Oracle::resolve`]: crate::Oracle::resolve
    #[must_use]
    pub const fn new(file: FileId, start: usize, end: usize) -> Self {
        Self { file, start, end }
    }

    /// File containing the position.
    #[must_use]
    pub const fn file(&self) -> FileId {
        self.file
    }

    /// Byte range within the file.
    #[must_use]
    pub const fn bytes(&self) -> std::ops::Range<usize> {
        self.start..self.end
    }
}
