//! Absolute query positions of the form `path:#N` or `path:#N,#N2`.

use std::fmt;
use std::str::FromStr;

use pythia_oracle::SourceSpan;

use super::errors::ResolveError;

/// A file path with one or two byte offsets, as sent by the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryPos {
    path: String,
    start: usize,
    end: Option<usize>,
}

impl QueryPos {
    /// Parses `path:#N` or `path:#N,#N2`.
    ///
    /// The path is everything before the last `:#`, so paths may contain
    /// colons. Offsets are decimal and the second may not precede the first.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::MalformedPosition`] for any other input.
    pub fn parse(input: &str) -> Result<Self, ResolveError> {
        let malformed = || ResolveError::malformed_position(input);
        let (path, offsets) = input.rsplit_once(":#").ok_or_else(malformed)?;
        if path.is_empty() {
            return Err(malformed());
        }
        let (start, end) = match offsets.split_once(",#") {
            Some((start, end)) => (
                parse_offset(start).ok_or_else(malformed)?,
                Some(parse_offset(end).ok_or_else(malformed)?),
            ),
            None => (parse_offset(offsets).ok_or_else(malformed)?, None),
        };
        if end.is_some_and(|end| end < start) {
            return Err(malformed());
        }
        Ok(Self {
            path: path.to_owned(),
            start,
            end,
        })
    }

    /// The file path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// First byte offset.
    #[must_use]
    pub const fn start(&self) -> usize {
        self.start
    }

    /// Second byte offset, or the first when only one was given.
    #[must_use]
    pub fn end(&self) -> usize {
        self.end.unwrap_or(self.start)
    }

    /// Converts the position into the span handed to the oracle.
    #[must_use]
    pub fn into_span(self) -> SourceSpan {
        let end = self.end();
        SourceSpan::new(self.path, self.start, end)
    }
}

fn parse_offset(text: &str) -> Option<usize> {
    if text.is_empty() || !text.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

impl FromStr for QueryPos {
    type Err = ResolveError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        Self::parse(input)
    }
}

impl fmt::Display for QueryPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.end {
            Some(end) => write!(f, "{}:#{},#{end}", self.path, self.start),
            None => write!(f, "{}:#{}", self.path, self.start),
        }
    }
}
