//! In-memory model of the loaded program.

use camino::{Utf8Path, Utf8PathBuf};
use pythia_syntax::{ParsedSource, SupportedLanguage};

/// Index of a file inside a [`Program`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FileId(usize);

impl FileId {
    /// Wraps a file index.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// The wrapped index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// A parsed file belonging to the program.
#[derive(Debug, Clone)]
pub struct SourceFile {
    path: Utf8PathBuf,
    parsed: ParsedSource,
}

impl SourceFile {
    /// Pairs an absolute path with its parsed contents.
    #[must_use]
    pub fn new(path: impl Into<Utf8PathBuf>, parsed: ParsedSource) -> Self {
        Self {
            path: path.into(),
            parsed,
        }
    }

    /// Absolute path of the file.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Language the file was parsed as.
    #[must_use]
    pub const fn language(&self) -> SupportedLanguage {
        self.parsed.language()
    }

    /// Text as it was when the program was loaded.
    #[must_use]
    pub fn text(&self) -> &str {
        self.parsed.source()
    }

    /// Syntax tree of the file.
    #[must_use]
    pub const fn parsed(&self) -> &ParsedSource {
        &self.parsed
    }
}

/// Files making up the analysed program, ordered by path.
///
/// Built once and never modified; the file order is the order of
/// [`Program::paths`].
#[derive(Debug, Clone, Default)]
pub struct Program {
    files: Vec<SourceFile>,
}

impl Program {
    /// Builds a program, keeping the first file seen for any duplicate path.
    #[must_use]
    pub fn new(mut files: Vec<SourceFile>) -> Self {
        files.sort_by(|a, b| a.path.as_str().cmp(b.path.as_str()));
        files.dedup_by(|later, earlier| later.path == earlier.path);
        Self { files }
    }

    /// Number of files.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether the program has no files.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Files in path order, with their identifiers.
    pub fn files(&self) -> impl Iterator<Item = (FileId, &SourceFile)> {
        self.files
            .iter()
            .enumerate()
            .map(|(index, file)| (FileId(index), file))
    }

    /// The file with the given identifier.
    #[must_use]
    pub fn file(&self, id: FileId) -> Option<&SourceFile> {
        self.files.get(id.0)
    }

    /// Finds a file by its exact absolute path.
    #[must_use]
    pub fn lookup(&self, path: &str) -> Option<FileId> {
        self.files
            .binary_search_by(|file| file.path.as_str().cmp(path))
            .ok()
            .map(FileId)
    }

    /// Absolute paths of every file, sorted.
    #[must_use]
    pub fn paths(&self) -> Vec<String> {
        self.files
            .iter()
            .map(|file| file.path.as_str().to_owned())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use pythia_syntax::Parser;
    use rstest::{fixture, rstest};

    use super::*;

    fn go_file(path: &str, body: &str) -> SourceFile {
        let parsed = Parser::new(SupportedLanguage::Go)
            .expect("parser init")
            .parse(body)
            .expect("parse");
        SourceFile::new(path, parsed)
    }

    #[fixture]
    fn program() -> Program {
        Program::new(vec![
            go_file("/a/y.go", "package a\n"),
            go_file("/a/x.go", "package a\n"),
            go_file("/a/y.go", "package b\n"),
        ])
    }

    #[rstest]
    fn files_are_sorted_and_unique(program: Program) {
        assert_eq!(program.paths(), ["/a/x.go", "/a/y.go"]);
        assert_eq!(program.len(), 2);
    }

    #[rstest]
    fn duplicates_keep_the_first_file(program: Program) {
        let id = program.lookup("/a/y.go").expect("y.go is loaded");
        let file = program.file(id).expect("id is valid");
        assert_eq!(file.text(), "package a\n");
    }

    #[rstest]
    #[case("/a/z.go")]
    #[case("/a/x.go/")]
    #[case("a/x.go")]
    fn lookup_requires_an_exact_path(program: Program, #[case] path: &str) {
        assert_eq!(program.lookup(path), None);
    }
}
