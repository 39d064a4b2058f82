//! One-based source ranges.
//!
//! Tree-sitter points are zero-based, while every location shown to a user
//! is one-based. Columns count bytes, matching the selections the resolver
//! accepts.

use std::fmt;

/// Converts a Tree-sitter position (0-based) to one-based display coordinates.
#[must_use]
pub(crate) fn point_to_one_based(pos: tree_sitter::Point) -> (u32, u32) {
    // Line/column numbers will realistically never exceed u32::MAX.
    let line = u32::try_from(pos.row.saturating_add(1)).unwrap_or(u32::MAX);
    let column = u32::try_from(pos.column.saturating_add(1)).unwrap_or(u32::MAX);
    (line, column)
}

/// Start and end of a node in one-based line/column form.
///
/// Displays as `L.C-L.C`, the same notation selections use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SourceRange {
    /// First line (one-based).
    pub start_line: u32,
    /// First column (one-based byte column).
    pub start_column: u32,
    /// Last line (one-based).
    pub end_line: u32,
    /// Column just past the end (one-based byte column).
    pub end_column: u32,
}

impl SourceRange {
    /// Builds the range spanned by a syntax node.
    #[must_use]
    pub fn of_node(node: tree_sitter::Node<'_>) -> Self {
        let (start_line, start_column) = point_to_one_based(node.start_position());
        let (end_line, end_column) = point_to_one_based(node.end_position());
        Self {
            start_line,
            start_column,
            end_line,
            end_column,
        }
    }
}

impl fmt::Display for SourceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}-{}.{}",
            self.start_line, self.start_column, self.end_line, self.end_column
        )
    }
}
