//! Line/column and byte-offset translation.
//!
//! Lines are separated by `\n`. A trailing `\n` ends the last line rather
//! than starting an empty one, and `\r` is an ordinary byte. Columns are
//! one-based *byte* columns, the same unit the oracle reports positions in,
//! so a column of `n` addresses the byte `n - 1` bytes after the line start
//! whatever the encoding of the text. The largest valid column on a line is
//! its length plus one, the position just past its last byte.

use super::errors::ResolveError;

/// One-based line and byte column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LineColumn {
    /// Line number, starting at 1.
    pub line: usize,
    /// Byte column, starting at 1.
    pub column: usize,
}

impl LineColumn {
    /// Creates a line/column pair.
    #[must_use]
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Start offsets of every line in a piece of content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    starts: Vec<usize>,
    len: usize,
    trailing_newline: bool,
}

impl LineIndex {
    /// Scans `content` for line terminators.
    #[must_use]
    pub fn new(content: &[u8]) -> Self {
        let len = content.len();
        let mut starts = vec![0];
        starts.extend(
            content
                .iter()
                .enumerate()
                .filter(|&(index, &byte)| byte == b'\n' && index + 1 < len)
                .map(|(index, _)| index + 1),
        );
        Self {
            starts,
            len,
            trailing_newline: content.last() == Some(&b'\n'),
        }
    }

    /// Number of lines. Empty content has a single empty line.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.starts.len()
    }

    /// Start offset and length (excluding the terminator) of a zero-based
    /// line.
    fn line_bounds(&self, index: usize) -> Option<(usize, usize)> {
        let start = *self.starts.get(index)?;
        let end = match self.starts.get(index + 1) {
            Some(next) => next - 1,
            None if self.trailing_newline => self.len - 1,
            None => self.len,
        };
        Some((start, end - start))
    }

    /// Byte offset of a line/column pair.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::LineOutOfRange`] or
    /// [`ResolveError::ColumnOutOfRange`]; out-of-range values are never
    /// clamped.
    pub fn offset_of(&self, position: LineColumn) -> Result<usize, ResolveError> {
        let out_of_range = || ResolveError::LineOutOfRange {
            line: position.line,
            lines: self.line_count(),
        };
        let index = position.line.checked_sub(1).ok_or_else(out_of_range)?;
        let (start, length) = self.line_bounds(index).ok_or_else(out_of_range)?;
        let max = length + 1;
        if position.column == 0 || position.column > max {
            return Err(ResolveError::ColumnOutOfRange {
                line: position.line,
                column: position.column,
                max,
            });
        }
        Ok(start + position.column - 1)
    }

    /// Line/column pair addressing `offset`, if the offset is addressable.
    #[must_use]
    pub fn line_column_of(&self, offset: usize) -> Option<LineColumn> {
        let index = self.starts.partition_point(|&start| start <= offset);
        let index = index.checked_sub(1)?;
        let (start, length) = self.line_bounds(index)?;
        let column = offset - start + 1;
        (column <= length + 1).then_some(LineColumn::new(index + 1, column))
    }
}
