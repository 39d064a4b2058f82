//! Human selection ranges of the form `L1.C1-L2.C2`.

use std::fmt;
use std::str::FromStr;

use super::errors::ResolveError;
use super::line_index::{LineColumn, LineIndex};

/// Two line/column endpoints as typed by a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SelectionRange {
    /// Where the selection starts.
    pub start: LineColumn,
    /// Where the selection ends.
    pub end: LineColumn,
}

impl SelectionRange {
    /// Parses `L1.C1-L2.C2`.
    ///
    /// Every component must be a positive decimal integer written with ASCII
    /// digits only; signs, whitespace, empty parts and extra separators are
    /// rejected.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::MalformedSelection`] for any other input.
    pub fn parse(input: &str) -> Result<Self, ResolveError> {
        let malformed = || ResolveError::malformed_selection(input);
        let mut endpoints = input.split('-');
        let (Some(start), Some(end), None) = (endpoints.next(), endpoints.next(), endpoints.next())
        else {
            return Err(malformed());
        };
        Ok(Self {
            start: parse_endpoint(start).ok_or_else(malformed)?,
            end: parse_endpoint(end).ok_or_else(malformed)?,
        })
    }

    /// Resolves the selection to `(start, end)` byte offsets in `content`.
    ///
    /// # Errors
    ///
    /// Returns an error if either endpoint lies outside the content or if
    /// the end precedes the start.
    pub fn byte_offsets_in(&self, content: &[u8]) -> Result<(usize, usize), ResolveError> {
        let index = LineIndex::new(content);
        let start = index.offset_of(self.start)?;
        let end = index.offset_of(self.end)?;
        if end < start {
            return Err(ResolveError::InvertedSelection { start, end });
        }
        Ok((start, end))
    }
}

fn parse_endpoint(text: &str) -> Option<LineColumn> {
    let (line, column) = text.split_once('.')?;
    Some(LineColumn::new(parse_positive(line)?, parse_positive(column)?))
}

fn parse_positive(text: &str) -> Option<usize> {
    if text.is_empty() || !text.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    text.parse().ok().filter(|&value| value > 0)
}

impl FromStr for SelectionRange {
    type Err = ResolveError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        Self::parse(input)
    }
}

impl fmt::Display for SelectionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}-{}.{}",
            self.start.line, self.start.column, self.end.line, self.end.column
        )
    }
}
