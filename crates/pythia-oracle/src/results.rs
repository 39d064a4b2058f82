//! Query results and their two renderings.
//!
//! Every result has a structured form ([`QueryResult::serial`]) served as
//! JSON and a plain-text form ([`QueryResult::write_plain`]) made of lines
//! shaped `path:L.C-L.C: message`, or `-: message` when a line is not tied to
//! a location. Columns are one-based byte columns.

use std::fmt;
use std::io;

use pythia_syntax::SourceRange;
use serde::{Serialize, Serializer};

/// Output of a single oracle query.
pub trait QueryResult: Send {
    /// Structured form of the result.
    ///
    /// # Errors
    ///
    /// Returns an error if a field cannot be represented as JSON.
    fn serial(&self) -> serde_json::Result<serde_json::Value>;

    /// Writes the human-readable form of the result.
    ///
    /// # Errors
    ///
    /// Propagates write failures from `out`.
    fn write_plain(&self, out: &mut dyn io::Write) -> io::Result<()>;
}

/// A file and a range within it, written `path:L.C-L.C`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    path: String,
    range: SourceRange,
}

impl Location {
    /// Creates a location.
    #[must_use]
    pub fn new(path: impl Into<String>, range: SourceRange) -> Self {
        Self {
            path: path.into(),
            range,
        }
    }

    /// Path of the file.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Range within the file.
    #[must_use]
    pub const fn range(&self) -> SourceRange {
        self.range
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.path, self.range)
    }
}

impl Serialize for Location {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One file in a [`ScopeSummary`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileSummary {
    /// Absolute path.
    pub path: String,
    /// Language the file was parsed as.
    pub language: String,
    /// Number of named declarations.
    pub declarations: usize,
    /// Number of syntax errors Tree-sitter recovered from.
    pub syntax_errors: usize,
}

/// Answer to the `what` mode: what the loaded program consists of.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScopeSummary {
    /// Mode that produced the result.
    pub mode: String,
    /// In-scope file paths.
    pub scope: Vec<String>,
    /// Per-file statistics.
    pub files: Vec<FileSummary>,
}

impl QueryResult for ScopeSummary {
    fn serial(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }

    fn write_plain(&self, out: &mut dyn io::Write) -> io::Result<()> {
        writeln!(out, "-: {} files in scope", self.files.len())?;
        for file in &self.files {
            writeln!(
                out,
                "{}:1.1-1.1: {}, {} declarations, {} syntax errors",
                file.path, file.language, file.declarations, file.syntax_errors
            )?;
        }
        Ok(())
    }
}

/// A syntax node enclosing the queried range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnclosingNode {
    /// Where the node lies.
    pub pos: Location,
    /// Tree-sitter node kind.
    pub kind: String,
}

/// Answer to the `describe` mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Description {
    /// Mode that produced the result.
    pub mode: String,
    /// Innermost node covering the query.
    pub pos: Location,
    /// Kind of that node.
    pub kind: String,
    /// Identifier under the query, if there is one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    /// Enclosing nodes, innermost first, excluding the node itself.
    pub enclosing: Vec<EnclosingNode>,
}

impl QueryResult for Description {
    fn serial(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }

    fn write_plain(&self, out: &mut dyn io::Write) -> io::Result<()> {
        match &self.identifier {
            Some(name) => writeln!(out, "{}: identifier {name} ({})", self.pos, self.kind)?,
            None => writeln!(out, "{}: {}", self.pos, self.kind)?,
        }
        for node in &self.enclosing {
            writeln!(out, "{}: \tinside {}", node.pos, node.kind)?;
        }
        Ok(())
    }
}

/// A declaration matching a queried identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DefinitionSite {
    /// Location of the declared name.
    pub pos: Location,
    /// Kind of the declaring construct.
    pub kind: String,
}

/// Answer to the `definition` mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Definitions {
    /// Mode that produced the result.
    pub mode: String,
    /// Identifier that was looked up.
    pub name: String,
    /// Matching declarations in path order.
    pub definitions: Vec<DefinitionSite>,
}

impl QueryResult for Definitions {
    fn serial(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }

    fn write_plain(&self, out: &mut dyn io::Write) -> io::Result<()> {
        for site in &self.definitions {
            writeln!(out, "{}: defined here as {} {}", site.pos, site.kind, self.name)?;
        }
        Ok(())
    }
}

/// Answer to the `referrers` mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Referrers {
    /// Mode that produced the result.
    pub mode: String,
    /// Identifier that was looked up.
    pub name: String,
    /// Every occurrence of the identifier in path order.
    pub refs: Vec<Location>,
}

impl QueryResult for Referrers {
    fn serial(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }

    fn write_plain(&self, out: &mut dyn io::Write) -> io::Result<()> {
        writeln!(out, "-: {} references to {}", self.refs.len(), self.name)?;
        for location in &self.refs {
            writeln!(out, "{location}: {}", self.name)?;
        }
        Ok(())
    }
}
