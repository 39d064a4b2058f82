//! Scope membership guard.
//!
//! The scope is the closed set of absolute file paths the server may read or
//! query. It is fixed at start-up; every path taken from a request is checked
//! against it before the file system or the oracle is touched.

/// Sorted, duplicate-free set of in-scope file paths.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scope {
    files: Vec<String>,
}

impl Scope {
    /// Builds a scope from any collection of paths.
    ///
    /// The input does not need to be sorted.
    #[must_use]
    pub fn new<I, S>(files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut files: Vec<String> = files.into_iter().map(Into::into).collect();
        files.sort_unstable();
        files.dedup();
        Self { files }
    }

    /// Whether `path` is exactly one of the in-scope paths.
    ///
    /// No normalisation is applied: `/a/./x.go`, `/a/x.go/` and `/A/x.go` are
    /// all distinct from `/a/x.go`.
    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.files
            .binary_search_by(|candidate| candidate.as_str().cmp(path))
            .is_ok()
    }

    /// Negation of [`Scope::contains`], read at call sites that reject.
    #[must_use]
    pub fn is_forbidden(&self, path: &str) -> bool {
        !self.contains(path)
    }

    /// In-scope paths in lexicographic order.
    #[must_use]
    pub fn files(&self) -> &[String] {
        &self.files
    }

    /// Number of in-scope paths.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether the scope is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for Scope {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}
